use log::debug;

use crate::frequency::FrequencyTable;
use crate::huffman::CodeTable;

/// Shannon entropy of the distribution, in bits per symbol.
pub fn entropy_from_freq(freq: &FrequencyTable) -> f64 {
    let entropy: f64 = freq
        .probabilities()
        .map(|(_, p)| -p * p.log2())
        .sum();

    debug!(
        "Calculated entropy: {:.4} bits/symbol (Total samples: {})",
        entropy,
        freq.total()
    );
    entropy
}

/// Expected code length in bits per symbol. Symbols missing from `table`
/// contribute nothing.
pub fn average_code_length(freq: &FrequencyTable, table: &CodeTable) -> f64 {
    freq.probabilities()
        .filter_map(|(symbol, p)| table.get(&symbol).map(|code| p * code.len() as f64))
        .sum()
}
