//! Tree builder
//!
//! Projects the flat record set into a sorted forest. The projection is
//! rebuilt from scratch on every read; nothing is patched incrementally.

use crate::store::NodeRecord;
use crate::tree::node::TreeNode;
use crate::tree::path;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Build the ordered forest of tree nodes for a set of records.
///
/// A record is attached to the folder at its parent path when one exists.
/// Records whose parent is missing (or is a file) surface as roots. Every
/// level is sorted folders-first, then by name (case-sensitive, byte-wise),
/// with the full path as a final tie-breaker.
pub fn build_tree(records: &[NodeRecord]) -> Vec<TreeNode> {
    let index: HashMap<&str, usize> = records
        .iter()
        .enumerate()
        .map(|(i, record)| (record.path.as_str(), i))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut roots = Vec::new();

    for (i, record) in records.iter().enumerate() {
        let parent = path::parent_of(&record.path);
        match index.get(parent) {
            Some(&p) if p != i && records[p].is_folder() => children[p].push(i),
            _ => roots.push(i),
        }
    }

    let mut forest: Vec<TreeNode> = roots
        .into_iter()
        .map(|i| materialize(i, records, &children))
        .collect();
    sort_level(&mut forest);
    forest
}

fn materialize(i: usize, records: &[NodeRecord], children: &[Vec<usize>]) -> TreeNode {
    let mut node = TreeNode::from_record(&records[i]);
    if let Some(list) = node.children.as_mut() {
        list.extend(
            children[i]
                .iter()
                .map(|&child| materialize(child, records, children)),
        );
        sort_level(list);
    }
    node
}

fn sort_level(nodes: &mut [TreeNode]) {
    nodes.sort_by(compare);
}

fn compare(a: &TreeNode, b: &TreeNode) -> Ordering {
    b.is_folder()
        .cmp(&a.is_folder())
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.path.cmp(&b.path))
}

/// Count every node in a forest.
pub fn count_nodes(forest: &[TreeNode]) -> usize {
    forest
        .iter()
        .map(|node| 1 + count_nodes(node.children()))
        .sum()
}
