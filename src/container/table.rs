use crate::container::ContainerError;
use crate::container::tree::Tree;
use crate::container::value::{Value, ValueKind};

/// A fixed-size hash table whose buckets are [`Tree`]s.
///
/// The bucket count is set at creation and never changes; callers size the
/// table for their expected load up front. Colliding keys share a bucket and
/// are kept apart by the bucket's own key ordering, so collision chains stay
/// correct under every tree operation, deletion included.
pub struct HashTable {
    key_kind: ValueKind,
    value_kind: ValueKind,
    buckets: Vec<Tree>,
}

/// Polynomial rolling hash over the bytes of `s`, reduced mod `buckets`.
///
/// Stable for the lifetime of a table: the same text and bucket count always
/// land in the same bucket.
pub fn str_hash(s: &str, buckets: usize) -> usize {
    let mut hash: u32 = 0;
    for &byte in s.as_bytes() {
        hash = (byte as u32).wrapping_add(hash.wrapping_mul(31));
    }
    hash as usize % buckets
}

impl HashTable {
    /// Creates a table with `bucket_count` empty buckets.
    ///
    /// Kind validation matches [`Tree::new`].
    pub fn new(
        bucket_count: usize,
        key_kind: ValueKind,
        value_kind: ValueKind,
    ) -> Result<Self, ContainerError> {
        assert!(bucket_count > 0, "bucket count must be non-zero");
        let mut buckets = Vec::with_capacity(bucket_count);
        for _ in 0..bucket_count {
            buckets.push(Tree::new(key_kind, value_kind)?);
        }
        Ok(Self {
            key_kind,
            value_kind,
            buckets,
        })
    }

    pub fn key_kind(&self) -> ValueKind {
        self.key_kind
    }

    pub fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    /// Number of buckets, fixed at creation.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of entries across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Tree::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Tree::is_empty)
    }

    /// The bucket a key hashes to.
    ///
    /// `Int` keys use their unsigned 32-bit bit pattern mod the bucket
    /// count; `Text` keys use [`str_hash`]. `Real` is never a key kind, so
    /// a `Real` operand falls into bucket 0 and misses there.
    pub fn bucket_index(&self, key: &Value) -> usize {
        match key {
            Value::Int(n) => (*n as u32 as usize) % self.buckets.len(),
            Value::Text(s) => str_hash(s, self.buckets.len()),
            Value::Real(_) => 0,
        }
    }

    pub fn set(&mut self, key: Value, value: Value) -> Result<(), ContainerError> {
        let idx = self.bucket_index(&key);
        self.buckets[idx].set(key, value)
    }

    /// Looks up `key`, tolerating a miss the way [`Tree::get`] does.
    pub fn get(&self, key: &Value) -> Value {
        self.buckets[self.bucket_index(key)].get(key)
    }

    /// Looks up `key` without the placeholder fallback.
    pub fn lookup(&self, key: &Value) -> Option<&Value> {
        self.buckets[self.bucket_index(key)].lookup(key)
    }

    pub fn contains(&self, key: &Value) -> bool {
        self.buckets[self.bucket_index(key)].contains(key)
    }

    pub fn remove(&mut self, key: &Value) {
        let idx = self.bucket_index(key);
        self.buckets[idx].remove(key);
    }
}

/// Equality requires the same declared kinds, the same bucket count, and
/// bucket-for-bucket tree equality at every index.
impl PartialEq for HashTable {
    fn eq(&self, other: &Self) -> bool {
        self.key_kind == other.key_kind
            && self.value_kind == other.value_kind
            && self.buckets.len() == other.buckets.len()
            && self
                .buckets
                .iter()
                .zip(other.buckets.iter())
                .all(|(a, b)| a == b)
    }
}
