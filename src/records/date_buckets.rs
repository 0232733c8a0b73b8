use super::model::Scheduled;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Records grouped by `YYYY-MM-DD` date key
///
/// Serialized as a plain JSON object mapping each date key to the list of
/// records for that day. Keys are kept as strings so that entries with a
/// malformed date survive a load/save cycle untouched.
///
/// A bucket is never left empty: removing its last record removes the key,
/// and empty lists found in a file are dropped on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DateBuckets<T> {
    buckets: BTreeMap<String, Vec<T>>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for DateBuckets<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut buckets = BTreeMap::<String, Vec<T>>::deserialize(deserializer)?;
        buckets.retain(|_, records| !records.is_empty());
        Ok(Self { buckets })
    }
}

impl<T> Default for DateBuckets<T> {
    fn default() -> Self {
        Self {
            buckets: BTreeMap::new(),
        }
    }
}

impl<T: Scheduled> DateBuckets<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no bucket exists
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of records across all buckets
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Date keys in ascending key order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.buckets.contains_key(key)
    }

    /// Records for one date key, empty when the bucket does not exist
    pub fn bucket(&self, key: &str) -> &[T] {
        self.buckets.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn iter(&self) -> impl DoubleEndedIterator<Item = (&String, &Vec<T>)> {
        self.buckets.iter()
    }

    /// Check whether a record with this exact process number sits in the bucket
    pub fn contains_process(&self, key: &str, process: &str) -> bool {
        self.position(key, process).is_some()
    }

    /// Append a record to the end of a bucket, creating the bucket if needed
    pub fn push(&mut self, key: impl Into<String>, record: T) {
        self.buckets.entry(key.into()).or_default().push(record);
    }

    /// First record in the bucket with this exact process number
    pub fn find_mut(&mut self, key: &str, process: &str) -> Option<&mut T> {
        self.buckets
            .get_mut(key)?
            .iter_mut()
            .find(|r| r.process() == process)
    }

    /// Remove and return the first record with this exact process number
    ///
    /// Drops the bucket when it becomes empty.
    pub fn take(&mut self, key: &str, process: &str) -> Option<T> {
        let pos = self.position(key, process)?;
        let bucket = self.buckets.get_mut(key)?;
        let record = bucket.remove(pos);
        if bucket.is_empty() {
            self.buckets.remove(key);
        }
        Some(record)
    }

    /// Count of records in a bucket sharing a process number
    pub fn count_process(&self, key: &str, process: &str) -> usize {
        self.bucket(key)
            .iter()
            .filter(|r| r.process() == process)
            .count()
    }

    fn position(&self, key: &str, process: &str) -> Option<usize> {
        self.buckets
            .get(key)?
            .iter()
            .position(|r| r.process() == process)
    }
}
