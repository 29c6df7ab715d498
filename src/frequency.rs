use std::collections::BTreeMap;

use log::{debug, trace};

use crate::error::{HuffmanError, Result};

/// Exact symbol counts of a text, together with the text length.
///
/// Probabilities are kept as the fraction `count / total` so that the tree
/// builder can detect the root with integer arithmetic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<char, u64>,
    total: u64,
}

impl FrequencyTable {
    /// Counts every `char` of `text`.
    pub fn from_text(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }

        let mut counts = BTreeMap::new();
        let mut total = 0u64;
        for symbol in text.chars() {
            *counts.entry(symbol).or_insert(0) += 1;
            total += 1;
        }

        debug!(
            "Counted {} symbols, {} distinct",
            total,
            counts.len()
        );
        for (symbol, count) in &counts {
            trace!("Symbol {:?}: {}/{}", symbol, count, total);
        }

        Ok(FrequencyTable { counts, total })
    }

    /// Builds a table from precomputed counts. Zero counts are dropped, so the
    /// result may be empty. Fails when the counts add up past `u64::MAX`.
    pub fn from_counts<I>(counts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, u64)>,
    {
        let mut table = FrequencyTable::default();
        for (symbol, count) in counts.into_iter().filter(|(_, c)| *c > 0) {
            // Every per-symbol count is bounded by the total.
            table.total = table.total.checked_add(count).ok_or_else(|| {
                HuffmanError::invalid_argument(format!(
                    "symbol counts overflow u64 at {:?}",
                    symbol
                ))
            })?;
            *table.counts.entry(symbol).or_insert(0) += count;
        }
        Ok(table)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn count(&self, symbol: char) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    pub fn probability(&self, symbol: char) -> Option<f64> {
        self.count(symbol)
            .map(|count| count as f64 / self.total as f64)
    }

    /// Symbols with their counts, in symbol order.
    pub fn counts(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }

    pub fn probabilities(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        let total = self.total as f64;
        self.counts()
            .map(move |(symbol, count)| (symbol, count as f64 / total))
    }
}
