use std::cmp::Ordering;

use tracing::warn;

use crate::container::ContainerError;
use crate::container::value::{Value, ValueKind};

struct Node {
    key: Value,
    value: Value,
    parent: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
}

/// An unbalanced binary search tree with declared key and value kinds.
///
/// Nodes live in an arena and refer to each other by stable indices, so
/// parent and child links never dangle and removal is plain index
/// relinking. Keys are unique: for every node, all keys in its left subtree
/// compare less than its key and all keys in its right subtree compare
/// greater. No rebalancing is performed.
pub struct Tree {
    key_kind: ValueKind,
    value_kind: ValueKind,
    nodes: Vec<Node>,
    free: Vec<usize>,
    root: Option<usize>,
    len: usize,
}

impl Tree {
    /// Creates an empty tree.
    ///
    /// Fails with [`ContainerError::UnsupportedType`] if `key_kind` is not a
    /// valid key kind.
    pub fn new(key_kind: ValueKind, value_kind: ValueKind) -> Result<Self, ContainerError> {
        if !key_kind.is_key_kind() {
            return Err(ContainerError::UnsupportedType(key_kind));
        }
        Ok(Self {
            key_kind,
            value_kind,
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
        })
    }

    pub fn key_kind(&self) -> ValueKind {
        self.key_kind
    }

    pub fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    /// Number of entries in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `key` → `value`, overwriting the entry in place if the key is
    /// already present. The old payloads are released on overwrite.
    pub fn set(&mut self, key: Value, value: Value) -> Result<(), ContainerError> {
        if key.kind() != self.key_kind {
            return Err(ContainerError::TypeMismatch {
                expected: self.key_kind,
                found: key.kind(),
            });
        }
        if value.kind() != self.value_kind {
            return Err(ContainerError::TypeMismatch {
                expected: self.value_kind,
                found: value.kind(),
            });
        }

        let Some(mut cur) = self.root else {
            let idx = self.alloc(key, value, None);
            self.root = Some(idx);
            self.len += 1;
            return Ok(());
        };
        loop {
            match key.cmp_key(&self.nodes[cur].key)? {
                Ordering::Less => match self.nodes[cur].left {
                    Some(left) => cur = left,
                    None => {
                        let idx = self.alloc(key, value, Some(cur));
                        self.nodes[cur].left = Some(idx);
                        self.len += 1;
                        return Ok(());
                    }
                },
                Ordering::Greater => match self.nodes[cur].right {
                    Some(right) => cur = right,
                    None => {
                        let idx = self.alloc(key, value, Some(cur));
                        self.nodes[cur].right = Some(idx);
                        self.len += 1;
                        return Ok(());
                    }
                },
                Ordering::Equal => {
                    let node = &mut self.nodes[cur];
                    node.key = key;
                    node.value = value;
                    return Ok(());
                }
            }
        }
    }

    /// Looks up `key`, tolerating a miss.
    ///
    /// A miss is logged and answered with the zero placeholder of the
    /// declared value kind instead of failing the caller.
    pub fn get(&self, key: &Value) -> Value {
        match self.find(key) {
            Some(idx) => self.nodes[idx].value.clone(),
            None => {
                warn!("{}", ContainerError::KeyNotFound);
                Value::zero(self.value_kind)
            }
        }
    }

    /// Looks up `key` without the placeholder fallback.
    pub fn lookup(&self, key: &Value) -> Option<&Value> {
        self.find(key).map(|idx| &self.nodes[idx].value)
    }

    pub fn contains(&self, key: &Value) -> bool {
        self.find(key).is_some()
    }

    /// Removes `key` if present; absent keys are a no-op.
    pub fn remove(&mut self, key: &Value) {
        let Some(idx) = self.find(key) else {
            return;
        };
        match (self.nodes[idx].left, self.nodes[idx].right) {
            (Some(_), Some(right)) => self.remove_two_children(idx, right),
            _ => self.splice(idx),
        }
    }

    /// Lazy in-order traversal over `(key, value)` pairs. Each call starts a
    /// fresh pass.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter {
            tree: self,
            stack: Vec::new(),
        };
        iter.push_left(self.root);
        iter
    }

    fn find(&self, key: &Value) -> Option<usize> {
        let mut cur = self.root;
        while let Some(idx) = cur {
            match key.cmp_key(&self.nodes[idx].key) {
                Ok(Ordering::Less) => cur = self.nodes[idx].left,
                Ok(Ordering::Greater) => cur = self.nodes[idx].right,
                Ok(Ordering::Equal) => return Some(idx),
                Err(_) => return None,
            }
        }
        None
    }

    fn alloc(&mut self, key: Value, value: Value, parent: Option<usize>) -> usize {
        let node = Node {
            key,
            value,
            parent,
            left: None,
            right: None,
        };
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Returns a node's slot to the free list, releasing its payloads.
    fn release(&mut self, idx: usize) {
        let (key_kind, value_kind) = (self.key_kind, self.value_kind);
        let node = &mut self.nodes[idx];
        node.key = Value::zero(key_kind);
        node.value = Value::zero(value_kind);
        node.parent = None;
        node.left = None;
        node.right = None;
        self.free.push(idx);
    }

    fn replace_child(&mut self, parent: Option<usize>, old: usize, new: Option<usize>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                if self.nodes[p].left == Some(old) {
                    self.nodes[p].left = new;
                } else {
                    self.nodes[p].right = new;
                }
            }
        }
    }

    /// Zero- or one-child removal: the sole child (if any) takes the node's
    /// place under its parent.
    fn splice(&mut self, idx: usize) {
        let parent = self.nodes[idx].parent;
        let child = self.nodes[idx].left.or(self.nodes[idx].right);
        self.replace_child(parent, idx, child);
        if let Some(c) = child {
            self.nodes[c].parent = parent;
        }
        self.len -= 1;
        self.release(idx);
    }

    /// Two-child removal via the in-order successor, the left-most node of
    /// the right subtree.
    ///
    /// The successor's payload moves into the deleted node; the successor
    /// never has a left child, so its right child (if any) is relinked to the
    /// successor's former parent when the successor's slot is removed.
    fn remove_two_children(&mut self, idx: usize, right: usize) {
        let mut succ = right;
        while let Some(left) = self.nodes[succ].left {
            succ = left;
        }

        let (key_kind, value_kind) = (self.key_kind, self.value_kind);
        let key = std::mem::replace(&mut self.nodes[succ].key, Value::zero(key_kind));
        let value = std::mem::replace(&mut self.nodes[succ].value, Value::zero(value_kind));
        self.nodes[idx].key = key;
        self.nodes[idx].value = value;

        let parent = self.nodes[succ].parent;
        let child = self.nodes[succ].right;
        self.replace_child(parent, succ, child);
        if let Some(c) = child {
            self.nodes[c].parent = parent;
        }
        self.len -= 1;
        self.release(succ);
    }

    fn eq_nodes(&self, a: Option<usize>, other: &Tree, b: Option<usize>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(i), Some(j)) => {
                let x = &self.nodes[i];
                let y = &other.nodes[j];
                x.key == y.key
                    && x.value == y.value
                    && self.eq_nodes(x.left, other, y.left)
                    && self.eq_nodes(x.right, other, y.right)
            }
            _ => false,
        }
    }
}

/// Equality is structural and shape-sensitive: declared kinds, size, and a
/// node-for-node comparison of key, value, left subtree, and right subtree.
/// Two trees holding the same entries but built in different insertion
/// orders may compare unequal.
impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        self.key_kind == other.key_kind
            && self.value_kind == other.value_kind
            && self.len == other.len
            && self.eq_nodes(self.root, other, other.root)
    }
}

/// In-order iterator over a [`Tree`].
pub struct Iter<'a> {
    tree: &'a Tree,
    stack: Vec<usize>,
}

impl<'a> Iter<'a> {
    fn push_left(&mut self, mut cur: Option<usize>) {
        while let Some(idx) = cur {
            self.stack.push(idx);
            cur = self.tree.nodes[idx].left;
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Value, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let tree = self.tree;
        self.push_left(tree.nodes[idx].right);
        let node = &tree.nodes[idx];
        Some((&node.key, &node.value))
    }
}
