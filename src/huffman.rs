use std::cmp::Ordering;
use std::collections::BTreeMap;

use log::{debug, trace};

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;

pub type CodeTable = BTreeMap<char, String>;

/// Index of a node inside a [`HuffmanTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    label: String,
    count: u64,
    bit: u8,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
    merged: bool,
    is_root: bool,
    is_leaf: bool,
}

impl Node {
    fn leaf(symbol: char, count: u64) -> Self {
        Node {
            label: symbol.to_string(),
            count,
            bit: 0,
            left: None,
            right: None,
            parent: None,
            merged: false,
            is_root: false,
            is_leaf: true,
        }
    }

    fn internal(left: (NodeId, &Node), right: (NodeId, &Node)) -> Self {
        let (left_id, left) = left;
        let (right_id, right) = right;
        Node {
            label: format!("{}{}", left.label, right.label),
            count: left.count + right.count,
            bit: 0,
            left: Some(left_id),
            right: Some(right_id),
            parent: None,
            merged: false,
            is_root: false,
            is_leaf: false,
        }
    }

    /// Merge priority: smaller count first, equal counts fall back to the
    /// lexicographically smaller label.
    fn priority_cmp(&self, other: &Node) -> Ordering {
        self.count
            .cmp(&other.count)
            .then_with(|| self.label.cmp(&other.label))
    }

    /// Concatenation of every symbol under this node.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The original symbol, for leaves only.
    pub fn symbol(&self) -> Option<char> {
        if self.is_leaf {
            self.label.chars().next()
        } else {
            None
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn bit(&self) -> u8 {
        self.bit
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_merged(&self) -> bool {
        self.merged
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }
}

/// Arena holding every node created while building the tree.
///
/// Leaves occupy the first slots in symbol order, internal nodes follow in the
/// order they were merged. Nothing is removed, so the whole construction can
/// be inspected afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    total: u64,
    root: NodeId,
}

impl HuffmanTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree; see [`HuffmanTree::get`].
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i), node))
    }

    pub fn leaves(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes().filter(|(_, node)| node.is_leaf)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Length of the input the tree was built from.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn probability(&self, id: NodeId) -> f64 {
        self.node(id).count as f64 / self.total as f64
    }

    /// Bits from the root down to `id`, collected by climbing parent links.
    pub fn code_for(&self, id: NodeId) -> String {
        let mut bits = Vec::new();
        let mut current = self.node(id);
        while !current.is_root {
            bits.push(current.bit);
            match current.parent {
                Some(parent) => current = self.node(parent),
                None => break,
            }
        }
        bits.iter()
            .rev()
            .map(|&bit| if bit == 1 { '1' } else { '0' })
            .collect()
    }
}

/// Unmerged node that should be merged next, if any is left.
fn select_min(nodes: &[Node]) -> Option<NodeId> {
    nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| !node.merged)
        .min_by(|(_, a), (_, b)| a.priority_cmp(b))
        .map(|(i, _)| NodeId(i))
}

fn take_child(nodes: &mut [Node], id: NodeId, bit: u8) {
    let node = &mut nodes[id.0];
    node.merged = true;
    node.bit = bit;
}

pub fn build_huffman_tree(frequencies: &FrequencyTable) -> Result<HuffmanTree> {
    debug!(
        "Building Huffman tree from {} unique symbols",
        frequencies.len()
    );

    if frequencies.is_empty() {
        return Err(HuffmanError::InsufficientAlphabet { symbols: 0 });
    }

    let total = frequencies.total();
    let mut nodes: Vec<Node> = frequencies
        .counts()
        .map(|(symbol, count)| Node::leaf(symbol, count))
        .collect();

    if nodes.len() == 1 {
        debug!("Single-symbol alphabet, the leaf is the root");
        nodes[0].is_root = true;
        return Ok(HuffmanTree {
            nodes,
            total,
            root: NodeId(0),
        });
    }

    let insufficient = || HuffmanError::InsufficientAlphabet {
        symbols: frequencies.len(),
    };

    loop {
        let a = select_min(&nodes).ok_or_else(insufficient)?;
        take_child(&mut nodes, a, 0);
        // `a` is merged now, so it cannot be picked again.
        let b = select_min(&nodes).ok_or_else(insufficient)?;
        take_child(&mut nodes, b, 1);

        let parent_id = NodeId(nodes.len());
        let mut parent = Node::internal((a, &nodes[a.0]), (b, &nodes[b.0]));
        nodes[a.0].parent = Some(parent_id);
        nodes[b.0].parent = Some(parent_id);

        trace!(
            "Merged {:?} ({}) and {:?} ({}) into {:?} ({}/{})",
            nodes[a.0].label,
            nodes[a.0].count,
            nodes[b.0].label,
            nodes[b.0].count,
            parent.label,
            parent.count,
            total
        );

        let done = parent.count >= total;
        parent.is_root = done;
        nodes.push(parent);

        if done {
            debug!("Tree construction complete, {} nodes", nodes.len());
            return Ok(HuffmanTree {
                nodes,
                total,
                root: parent_id,
            });
        }
    }
}

pub fn build_code_table(tree: &HuffmanTree) -> CodeTable {
    let mut table = CodeTable::new();
    for (id, leaf) in tree.leaves() {
        let Some(symbol) = leaf.symbol() else {
            continue;
        };
        let code = tree.code_for(id);
        trace!("Assigning code to symbol {:?}: '{}'", symbol, code);
        table.insert(symbol, code);
    }
    debug!("Code table built, {} entries", table.len());
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_for(text: &str) -> HuffmanTree {
        build_huffman_tree(&FrequencyTable::from_text(text).unwrap()).unwrap()
    }

    fn codes_for(text: &str) -> CodeTable {
        build_code_table(&tree_for(text))
    }

    #[test]
    fn single_symbol_gets_empty_code() {
        let tree = tree_for("aaaa");
        assert_eq!(tree.len(), 1);
        assert!(tree.node(tree.root()).is_root());
        assert!(tree.node(tree.root()).is_leaf());

        let table = build_code_table(&tree);
        assert_eq!(table.len(), 1);
        assert_eq!(table[&'a'], "");
    }

    #[test]
    fn two_equal_symbols() {
        let table = codes_for("abab");
        assert_eq!(table[&'a'], "0");
        assert_eq!(table[&'b'], "1");
    }

    #[test]
    fn ties_break_on_label() {
        // c+b first, then a ties with "cb" at 3/6 and wins on label.
        let table = codes_for("aaabbc");
        assert_eq!(table[&'a'], "0");
        assert_eq!(table[&'c'], "10");
        assert_eq!(table[&'b'], "11");
    }

    #[test]
    fn abracadabra() {
        let table = codes_for("abracadabra");
        assert_eq!(table[&'a'], "0");
        assert_eq!(table[&'r'], "10");
        assert_eq!(table[&'b'], "110");
        assert_eq!(table[&'c'], "1110");
        assert_eq!(table[&'d'], "1111");
    }

    #[test]
    fn tree_links_are_consistent() {
        let tree = tree_for("abracadabra");
        assert_eq!(tree.len(), 2 * 5 - 1);
        assert_eq!(tree.nodes().filter(|(_, n)| n.is_root()).count(), 1);

        let root = tree.node(tree.root());
        assert_eq!(root.count(), tree.total());
        assert_eq!(root.label().len(), 5);
        assert!(!root.is_merged());
        assert_eq!(root.parent(), None);
        assert!((tree.probability(tree.root()) - 1.0).abs() < f64::EPSILON);

        for (id, node) in tree.nodes() {
            if node.is_root() {
                continue;
            }
            assert!(node.is_merged());
            let parent = tree.node(node.parent().unwrap());
            let expected_bit = if parent.left() == Some(id) { 0 } else { 1 };
            assert_eq!(node.bit(), expected_bit);
            assert!(parent.left() == Some(id) || parent.right() == Some(id));
        }

        for (_, node) in tree.nodes().filter(|(_, n)| !n.is_leaf()) {
            let left = tree.node(node.left().unwrap());
            let right = tree.node(node.right().unwrap());
            assert_eq!(node.count(), left.count() + right.count());
            assert_eq!(node.label(), format!("{}{}", left.label(), right.label()));
            assert_eq!(node.symbol(), None);
        }
    }

    #[test]
    fn leaves_come_first_in_symbol_order() {
        let tree = tree_for("cabbage");
        let symbols: Vec<char> = tree.leaves().filter_map(|(_, n)| n.symbol()).collect();
        assert_eq!(symbols, vec!['a', 'b', 'c', 'e', 'g']);
        assert!(tree.leaves().all(|(id, _)| id.index() < symbols.len()));
    }

    #[test]
    fn foreign_node_ids_are_not_found() {
        let small = tree_for("ab");
        let large = tree_for("abracadabra");
        let (far, _) = large.nodes().last().unwrap();
        assert!(small.get(far).is_none());
        assert_eq!(small.get(small.root()), Some(small.node(small.root())));
    }

    #[test]
    fn empty_alphabet_is_rejected() {
        let empty = FrequencyTable::from_counts(std::iter::empty()).unwrap();
        assert!(matches!(
            build_huffman_tree(&empty),
            Err(HuffmanError::InsufficientAlphabet { symbols: 0 })
        ));
    }

    #[test]
    fn builds_from_counts() {
        let freq = FrequencyTable::from_counts([('x', 1), ('y', 1), ('z', 2)]).unwrap();
        let table = build_code_table(&build_huffman_tree(&freq).unwrap());
        assert_eq!(table[&'x'], "00");
        assert_eq!(table[&'y'], "01");
        assert_eq!(table[&'z'], "1");
    }
}
