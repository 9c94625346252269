//! Fibonacci heap over an index arena.
//!
//! A Fibonacci heap is a forest of heap-ordered multi-way trees whose roots
//! form a circular doubly linked list. Every node also sits in the circular
//! list of its siblings, knows its parent and one of its children, its degree
//! and whether it has lost a child since it last became a child (the mark).
//!
//! Nodes live in a `Vec` and refer to each other by index, so splicing lists
//! stays O(1) without shared ownership. Slots of popped nodes are recycled.
//!
//! - `push`: splice a singleton tree next to the minimum, O(1).
//! - `pop`: promote the minimum's children to roots, then consolidate roots of
//!   equal degree, O(log n) amortized.
//! - `decrease_key`: cut the node if it now beats its parent, then cascade
//!   through marked ancestors, O(1) amortized.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::data_structures::priority_queue::{check_priority, Priority, PriorityQueue};
use crate::{Error, Result};

#[derive(Debug, Clone)]
struct Node<V, P> {
    priority: P,
    value: V,
    degree: usize,
    marked: bool,
    parent: Option<usize>,
    child: Option<usize>,
    left: usize,
    right: usize,
}

/// Fibonacci min-heap with a value -> node index
#[derive(Debug, Clone)]
pub struct FibonacciHeap<V, P>
where
    V: Copy + Eq + Hash + Debug,
    P: Priority,
{
    nodes: Vec<Node<V, P>>,
    free: Vec<usize>,
    index: HashMap<V, usize>,
    min: Option<usize>,
    len: usize,
}

impl<V, P> FibonacciHeap<V, P>
where
    V: Copy + Eq + Hash + Debug,
    P: Priority,
{
    /// Creates an empty heap
    pub fn new() -> Self {
        FibonacciHeap {
            nodes: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            min: None,
            len: 0,
        }
    }

    /// Degrees of the current roots, starting at the minimum
    pub fn root_degrees(&self) -> Vec<usize> {
        match self.min {
            Some(min) => self
                .siblings(min)
                .into_iter()
                .map(|root| self.nodes[root].degree)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Returns true if `value` sits in a tree but is not a root and is marked
    pub fn is_marked(&self, value: &V) -> bool {
        self.index
            .get(value)
            .map_or(false, |&node| self.nodes[node].marked)
    }

    fn allocate(&mut self, priority: P, value: V) -> usize {
        let node = Node {
            priority,
            value,
            degree: 0,
            marked: false,
            parent: None,
            child: None,
            left: 0,
            right: 0,
        };
        let id = match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.nodes[id].left = id;
        self.nodes[id].right = id;
        id
    }

    /// Every node of the circular list containing `start`, beginning with it
    fn siblings(&self, start: usize) -> Vec<usize> {
        let mut out = vec![start];
        let mut current = self.nodes[start].right;
        while current != start {
            out.push(current);
            current = self.nodes[current].right;
        }
        out
    }

    /// Inserts `node` to the right of `anchor` in anchor's list
    fn splice_after(&mut self, anchor: usize, node: usize) {
        let right = self.nodes[anchor].right;
        self.nodes[node].left = anchor;
        self.nodes[node].right = right;
        self.nodes[right].left = node;
        self.nodes[anchor].right = node;
    }

    /// Detaches `node` from its list, leaving it a singleton
    fn unlink(&mut self, node: usize) {
        let left = self.nodes[node].left;
        let right = self.nodes[node].right;
        self.nodes[left].right = right;
        self.nodes[right].left = left;
        self.nodes[node].left = node;
        self.nodes[node].right = node;
    }

    fn add_root(&mut self, node: usize) {
        self.nodes[node].parent = None;
        self.nodes[node].marked = false;
        match self.min {
            Some(min) => {
                self.splice_after(min, node);
                if self.nodes[node].priority < self.nodes[min].priority {
                    self.min = Some(node);
                }
            }
            None => {
                self.nodes[node].left = node;
                self.nodes[node].right = node;
                self.min = Some(node);
            }
        }
    }

    /// Makes `child` a child of `parent`; both are roots on entry
    fn link(&mut self, child: usize, parent: usize) {
        self.unlink(child);
        match self.nodes[parent].child {
            Some(first) => self.splice_after(first, child),
            None => self.nodes[parent].child = Some(child),
        }
        self.nodes[child].parent = Some(parent);
        self.nodes[child].marked = false;
        self.nodes[parent].degree += 1;
    }

    fn consolidate(&mut self) {
        let start = match self.min {
            Some(start) => start,
            None => return,
        };

        let mut by_degree: Vec<Option<usize>> = Vec::new();
        for root in self.siblings(start) {
            let mut tree = root;
            let mut degree = self.nodes[tree].degree;
            loop {
                if degree >= by_degree.len() {
                    by_degree.resize(degree + 1, None);
                }
                let other = match by_degree[degree].take() {
                    Some(other) => other,
                    None => break,
                };
                let (parent, child) = if self.nodes[other].priority < self.nodes[tree].priority {
                    (other, tree)
                } else {
                    (tree, other)
                };
                self.link(child, parent);
                tree = parent;
                degree += 1;
            }
            by_degree[degree] = Some(tree);
        }

        self.min = None;
        for root in by_degree.into_iter().flatten() {
            let better = match self.min {
                Some(min) => self.nodes[root].priority < self.nodes[min].priority,
                None => true,
            };
            if better {
                self.min = Some(root);
            }
        }
    }

    /// Moves `node` from `parent`'s child list to the root list
    fn cut(&mut self, node: usize, parent: usize) {
        if self.nodes[node].right == node {
            self.nodes[parent].child = None;
        } else {
            if self.nodes[parent].child == Some(node) {
                self.nodes[parent].child = Some(self.nodes[node].right);
            }
            self.unlink(node);
        }
        self.nodes[parent].degree -= 1;
        self.add_root(node);
    }

    fn cascading_cut(&mut self, mut node: usize) {
        while let Some(parent) = self.nodes[node].parent {
            if !self.nodes[node].marked {
                self.nodes[node].marked = true;
                return;
            }
            self.cut(node, parent);
            node = parent;
        }
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let mut seen = 0;
        if let Some(min) = self.min {
            let mut stack = self.siblings(min);
            for &root in &stack {
                assert!(self.nodes[root].parent.is_none());
                assert!(!self.nodes[root].marked);
                assert!(self.nodes[min].priority <= self.nodes[root].priority);
            }
            while let Some(node) = stack.pop() {
                seen += 1;
                assert_eq!(self.index[&self.nodes[node].value], node);
                assert_eq!(self.nodes[self.nodes[node].right].left, node);
                if let Some(child) = self.nodes[node].child {
                    let children = self.siblings(child);
                    assert_eq!(children.len(), self.nodes[node].degree);
                    for &c in &children {
                        assert_eq!(self.nodes[c].parent, Some(node));
                        assert!(self.nodes[node].priority <= self.nodes[c].priority);
                    }
                    stack.extend(children);
                } else {
                    assert_eq!(self.nodes[node].degree, 0);
                }
            }
        }
        assert_eq!(seen, self.len);
        assert_eq!(self.index.len(), self.len);
    }
}

impl<V, P> Default for FibonacciHeap<V, P>
where
    V: Copy + Eq + Hash + Debug,
    P: Priority,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, P> PriorityQueue<V, P> for FibonacciHeap<V, P>
where
    V: Copy + Eq + Hash + Debug,
    P: Priority,
{
    fn name(&self) -> &'static str {
        "FibonacciHeap"
    }

    fn push(&mut self, priority: P, value: V) -> Result<()> {
        let priority = check_priority(priority)?;
        if self.index.contains_key(&value) {
            return self.decrease_key(value, priority).map(|_| ());
        }

        let node = self.allocate(priority, value);
        self.add_root(node);
        self.index.insert(value, node);
        self.len += 1;
        Ok(())
    }

    fn pop(&mut self) -> Result<(V, P)> {
        let min = self.min.ok_or(Error::EmptyQueue)?;

        if let Some(child) = self.nodes[min].child.take() {
            for node in self.siblings(child) {
                self.unlink(node);
                self.nodes[node].parent = None;
                self.nodes[node].marked = false;
                self.splice_after(min, node);
            }
            self.nodes[min].degree = 0;
        }

        let next = self.nodes[min].right;
        self.unlink(min);
        if next == min {
            self.min = None;
        } else {
            self.min = Some(next);
            self.consolidate();
        }

        let Node { priority, value, .. } = self.nodes[min].clone();
        self.index.remove(&value);
        self.free.push(min);
        self.len -= 1;
        Ok((value, priority))
    }

    fn peek(&self) -> Option<(V, P)> {
        self.min.map(|min| (self.nodes[min].value, self.nodes[min].priority))
    }

    fn decrease_key(&mut self, value: V, new_priority: P) -> Result<bool> {
        let new_priority = check_priority(new_priority)?;
        let node = match self.index.get(&value) {
            Some(&node) => node,
            None => return Ok(false),
        };
        if new_priority >= self.nodes[node].priority {
            return Ok(false);
        }

        self.nodes[node].priority = new_priority;
        if let Some(parent) = self.nodes[node].parent {
            if new_priority < self.nodes[parent].priority {
                self.cut(node, parent);
                self.cascading_cut(parent);
            }
        }

        if let Some(min) = self.min {
            if new_priority < self.nodes[min].priority {
                self.min = Some(node);
            }
        }
        Ok(true)
    }

    fn contains(&self, value: &V) -> bool {
        self.index.contains_key(value)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.index.clear();
        self.min = None;
        self.len = 0;
    }
}
