//! Spelling suggestions by edit distance.

use crate::error::{Error, Result};

const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// Matches input words to the closest entries of a fixed dictionary, where
/// "closest" is Levenshtein edit distance.
///
/// The dictionary is never mutated after construction; if the underlying
/// name index changes, build a new suggester. A full `suggest` call is
/// O(dictionary size × input length²), fine for ad hoc lookups over a few
/// thousand names but not for a per-message hot path — callers gate it
/// behind a failed exact lookup.
pub struct SpellingSuggester {
    dictionary: Vec<String>,
}

impl SpellingSuggester {
    /// Build a suggester over `dictionary`. Words are deduplicated and
    /// sorted so results come back in a deterministic order.
    pub fn new<I, S>(dictionary: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words: Vec<String> = dictionary.into_iter().map(Into::into).collect();
        words.sort();
        words.dedup();
        if words.is_empty() {
            return Err(Error::EmptyDictionary);
        }
        Ok(Self { dictionary: words })
    }

    /// Suggest with the default tolerance: up to `len(input) - 1` edits,
    /// considering at most ten distance buckets. An empty input has no
    /// tolerance at all and suggests nothing.
    pub fn suggest(&self, input: &str) -> Vec<String> {
        let Some(max_distance) = input.chars().count().checked_sub(1) else {
            return Vec::new();
        };
        self.suggest_within(input, max_distance, DEFAULT_SUGGESTION_LIMIT)
    }

    /// Suggest the dictionary entries closest to `input`.
    ///
    /// Entries farther than `max_distance` edits are dropped. The rest are
    /// bucketed by distance in the order each distance is first seen; only
    /// the first `max_results` distinct distances are eligible, and every
    /// entry at the smallest eligible distance is returned. Ties at that
    /// distance are never cut, and an input with no entry in range yields
    /// an empty list rather than an error.
    pub fn suggest_within(
        &self,
        input: &str,
        max_distance: usize,
        max_results: usize,
    ) -> Vec<String> {
        let mut buckets: Vec<(usize, Vec<&String>)> = Vec::new();
        for word in &self.dictionary {
            let distance = strsim::levenshtein(word, input);
            if distance > max_distance {
                continue;
            }
            match buckets.iter_mut().find(|(d, _)| *d == distance) {
                Some((_, words)) => words.push(word),
                None => buckets.push((distance, vec![word])),
            }
        }

        let Some(best) = buckets.iter().take(max_results).map(|(d, _)| *d).min() else {
            return Vec::new();
        };
        buckets
            .into_iter()
            .find(|(d, _)| *d == best)
            .map(|(_, words)| words.into_iter().cloned().collect())
            .unwrap_or_default()
    }
}
