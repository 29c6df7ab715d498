//! Greedy Huffman code construction for the characters of a text.
//!
//! ```
//! let table = huffman_codes::huffman_codes("aaabbc").unwrap();
//! assert_eq!(table[&'a'].len(), 1);
//! assert_eq!(table[&'b'].len(), 2);
//! assert_eq!(table[&'c'].len(), 2);
//! ```

pub mod config;
pub mod error;
pub mod frequency;
pub mod huffman;
pub mod stats;

pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use huffman::{CodeTable, HuffmanTree, Node, NodeId, build_code_table, build_huffman_tree};

/// Counts `text`, builds the tree and derives one code per distinct symbol.
pub fn huffman_codes(text: &str) -> Result<CodeTable> {
    let freq = FrequencyTable::from_text(text)?;
    let tree = build_huffman_tree(&freq)?;
    Ok(build_code_table(&tree))
}
