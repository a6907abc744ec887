//! A single grow-only key/value mapping behind its own reader/writer lock.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use tokio::sync::RwLock;

/// One mapping of the lookup cache.
///
/// Entries are never removed or expired. Each table owns its lock, so a
/// writer on one table never blocks readers of another.
#[derive(Debug)]
pub struct LookupTable<K, V> {
    name: &'static str,
    entries: RwLock<HashMap<K, V>>,
}

impl<K, V> LookupTable<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub async fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.read().await.get(key).cloned()
    }

    /// Insert with overwrite semantics.
    pub async fn insert(&self, key: K, value: V) {
        self.entries.write().await.insert(key, value);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_get_and_insert() {
        let table: LookupTable<String, i64> = LookupTable::new("voices");
        assert!(table.is_empty().await);
        assert_eq!(table.get("Aria").await, None);

        table.insert("Aria".to_string(), 4).await;
        assert_eq!(table.get("Aria").await, Some(4));
        assert_eq!(table.get("aria").await, None);
        assert_eq!(table.len().await, 1);
        assert_eq!(table.name(), "voices");
    }

    #[tokio::test]
    async fn test_insert_overwrites() {
        let table: LookupTable<i64, bool> = LookupTable::new("campaigns");
        table.insert(9, false).await;
        table.insert(9, true).await;
        assert_eq!(table.get(&9).await, Some(true));
        assert_eq!(table.len().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_same_key() {
        let table: Arc<LookupTable<String, i64>> = Arc::new(LookupTable::new("categories"));

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let table = Arc::clone(&table);
                tokio::spawn(async move {
                    table.insert("Interested".to_string(), 11).await;
                    table.get("Interested").await
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap(), Some(11));
        }
        assert_eq!(table.len().await, 1);
    }
}
