//! Ordered index structures for VireoDB.
//!
//! The central type is [`TimeTree`], an unbalanced binary search tree keyed
//! by timestamp. It exists for one job: absorbing a sensor's readings and
//! answering range-aggregate queries over them. Trees are built per query
//! and discarded, so no rebalancing is attempted; lookup cost degrades to
//! O(n) on sorted input and that is accepted.

#![deny(missing_docs)]

use serde::{Deserialize, Serialize};

/// Running aggregate over the values found in a key range.
///
/// `min` and `max` start at their sentinel values (`f64::MAX` and
/// `f64::MIN`) and are only meaningful once `count > 0`; callers that need
/// to distinguish "no data" from real extrema check
/// [`RangeAggregate::is_empty`] first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeAggregate {
    /// How many values fell inside the range.
    pub count: u64,
    /// Sum of those values.
    pub sum: f64,
    /// Smallest value seen, `f64::MAX` while empty.
    pub min: f64,
    /// Largest value seen, `f64::MIN` while empty.
    pub max: f64,
}

impl Default for RangeAggregate {
    fn default() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            min: f64::MAX,
            max: f64::MIN,
        }
    }
}

impl RangeAggregate {
    fn absorb(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Mean of the absorbed values, or `0.0` when nothing was absorbed.
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    /// Whether the range matched no values at all.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Node<K> {
    key: K,
    value: f64,
    left: Option<Box<Node<K>>>,
    right: Option<Box<Node<K>>>,
}

impl<K> Node<K> {
    fn new(key: K, value: f64) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }
}

/// Binary search tree mapping keys to `f64` values.
///
/// Duplicate keys are rejected silently: inserting a key that is already
/// present leaves the stored value untouched. Removal promotes the in-order
/// successor when the doomed node has two children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeTree<K> {
    root: Option<Box<Node<K>>>,
    len: usize,
}

impl<K> Default for TimeTree<K> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<K: Ord + Copy> TimeTree<K> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert `key` with `value`.
    ///
    /// If `key` is already present the call is a no-op and the earlier
    /// value wins. Callers that want replacement semantics remove the key
    /// first.
    pub fn insert(&mut self, key: K, value: f64) {
        if Self::insert_node(&mut self.root, key, value) {
            self.len += 1;
        }
    }

    fn insert_node(slot: &mut Option<Box<Node<K>>>, key: K, value: f64) -> bool {
        match slot {
            None => {
                *slot = Some(Box::new(Node::new(key, value)));
                true
            }
            Some(node) => {
                if key < node.key {
                    Self::insert_node(&mut node.left, key, value)
                } else if key > node.key {
                    Self::insert_node(&mut node.right, key, value)
                } else {
                    // Equal key: keep the existing entry.
                    false
                }
            }
        }
    }

    /// Value stored under `key`, if any.
    pub fn get(&self, key: K) -> Option<f64> {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            if key < node.key {
                cur = node.left.as_deref();
            } else if key > node.key {
                cur = node.right.as_deref();
            } else {
                return Some(node.value);
            }
        }
        None
    }

    /// Remove `key` if present; absent keys are a no-op.
    pub fn remove(&mut self, key: K) {
        if Self::remove_node(&mut self.root, key) {
            self.len -= 1;
        }
    }

    fn remove_node(slot: &mut Option<Box<Node<K>>>, key: K) -> bool {
        let Some(node) = slot.as_deref_mut() else {
            return false;
        };
        if key < node.key {
            return Self::remove_node(&mut node.left, key);
        }
        if key > node.key {
            return Self::remove_node(&mut node.right, key);
        }
        match (node.left.take(), node.right.take()) {
            (None, None) => *slot = None,
            (Some(left), None) => *slot = Some(left),
            (None, Some(right)) => *slot = Some(right),
            (Some(left), Some(right)) => {
                // Two children: copy the in-order successor up, then delete
                // it from the right subtree.
                let (succ_key, succ_value) = Self::min_entry(&right);
                node.key = succ_key;
                node.value = succ_value;
                node.left = Some(left);
                let mut rest = Some(right);
                Self::remove_node(&mut rest, succ_key);
                node.right = rest;
            }
        }
        true
    }

    fn min_entry(node: &Node<K>) -> (K, f64) {
        let mut cur = node;
        while let Some(left) = cur.left.as_deref() {
            cur = left;
        }
        (cur.key, cur.value)
    }

    /// Aggregate every value whose key lies in `lo..=hi`, bounds included.
    ///
    /// The walk prunes: it descends left only while `lo` is strictly below
    /// the node's key and right only while `hi` is strictly above it, so
    /// subtrees wholly outside the range are never visited.
    pub fn aggregate_range(&self, lo: K, hi: K) -> RangeAggregate {
        let mut agg = RangeAggregate::default();
        Self::aggregate_node(self.root.as_deref(), lo, hi, &mut agg);
        agg
    }

    fn aggregate_node(node: Option<&Node<K>>, lo: K, hi: K, agg: &mut RangeAggregate) {
        let Some(node) = node else {
            return;
        };
        if lo < node.key {
            Self::aggregate_node(node.left.as_deref(), lo, hi, agg);
        }
        if lo <= node.key && node.key <= hi {
            agg.absorb(node.value);
        }
        if hi > node.key {
            Self::aggregate_node(node.right.as_deref(), lo, hi, agg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_order(tree: &TimeTree<u32>) -> Vec<(u32, f64)> {
        fn walk(node: Option<&Node<u32>>, out: &mut Vec<(u32, f64)>) {
            if let Some(node) = node {
                walk(node.left.as_deref(), out);
                out.push((node.key, node.value));
                walk(node.right.as_deref(), out);
            }
        }
        let mut out = Vec::new();
        walk(tree.root.as_deref(), &mut out);
        out
    }

    fn sample_tree() -> TimeTree<u32> {
        let mut tree = TimeTree::new();
        for key in [50u32, 30, 70, 20, 40, 60, 80] {
            tree.insert(key, key as f64 / 10.0);
        }
        tree
    }

    #[test]
    fn insert_and_get() {
        let tree = sample_tree();
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.get(40), Some(4.0));
        assert_eq!(tree.get(80), Some(8.0));
        assert_eq!(tree.get(55), None);
    }

    #[test]
    fn duplicate_insert_keeps_first_value() {
        let mut tree = TimeTree::new();
        tree.insert(10u32, 1.0);
        tree.insert(10, 99.0);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(10), Some(1.0));
    }

    #[test]
    fn remove_leaf() {
        let mut tree = sample_tree();
        tree.remove(20);
        assert_eq!(tree.get(20), None);
        assert_eq!(tree.len(), 6);
        assert_eq!(
            in_order(&tree).iter().map(|e| e.0).collect::<Vec<_>>(),
            vec![30, 40, 50, 60, 70, 80]
        );
    }

    #[test]
    fn remove_single_child_node() {
        let mut tree = TimeTree::new();
        for key in [50u32, 30, 20] {
            tree.insert(key, 0.0);
        }
        tree.remove(30);
        assert_eq!(tree.get(30), None);
        assert_eq!(tree.get(20), Some(0.0));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn remove_two_children_promotes_successor() {
        let mut tree = sample_tree();
        tree.remove(50);
        assert_eq!(tree.get(50), None);
        assert_eq!(tree.len(), 6);
        // 60 is the in-order successor of 50 and must now sit at the root
        // with its own value intact.
        assert_eq!(tree.root.as_ref().map(|n| n.key), Some(60));
        assert_eq!(tree.get(60), Some(6.0));
        assert_eq!(
            in_order(&tree).iter().map(|e| e.0).collect::<Vec<_>>(),
            vec![20, 30, 40, 60, 70, 80]
        );
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut tree = sample_tree();
        tree.remove(55);
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn aggregate_bounds_are_inclusive() {
        let tree = sample_tree();
        let agg = tree.aggregate_range(30, 70);
        assert_eq!(agg.count, 5);
        assert_eq!(agg.min, 3.0);
        assert_eq!(agg.max, 7.0);
        assert!((agg.average() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn aggregate_empty_range_yields_sentinels() {
        let tree = sample_tree();
        let agg = tree.aggregate_range(81, 99);
        assert!(agg.is_empty());
        assert_eq!(agg.count, 0);
        assert_eq!(agg.average(), 0.0);
        assert_eq!(agg.min, f64::MAX);
        assert_eq!(agg.max, f64::MIN);
    }

    #[test]
    fn aggregate_matches_linear_scan() {
        let mut tree = TimeTree::new();
        // 37 is coprime with 100, so this visits every key in 0..100 in a
        // scrambled order.
        for i in 0..100u32 {
            let key = (i * 37) % 100;
            tree.insert(key, key as f64);
        }
        for (lo, hi) in [(0u32, 99u32), (10, 10), (25, 74), (90, 9)] {
            let agg = tree.aggregate_range(lo, hi);
            let expected: Vec<f64> = (0..100u32)
                .filter(|k| lo <= *k && *k <= hi)
                .map(f64::from)
                .collect();
            assert_eq!(agg.count as usize, expected.len());
            assert!((agg.sum - expected.iter().sum::<f64>()).abs() < 1e-9);
        }
    }

    #[test]
    fn tree_survives_serde_round_trip() {
        let tree = sample_tree();
        let encoded = serde_json::to_string(&tree).unwrap();
        let decoded: TimeTree<u32> = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.len(), tree.len());
        assert_eq!(in_order(&decoded), in_order(&tree));
    }
}
