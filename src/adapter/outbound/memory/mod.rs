//! In-memory notification store, used for dry runs and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use serde_json::Value;

use crate::domain::{Fields, NotificationRecord};
use crate::error::{Error, Result};
use crate::port::NotificationStore;

/// In-memory store with document-merge semantics.
///
/// Like the Firestore adapter, every write merges the record's fields into
/// any existing document and restamps `createdAt`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, Fields>>,
    writes: RwLock<usize>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored document by notification id.
    #[must_use]
    pub fn get(&self, notif_id: &str) -> Option<Fields> {
        self.documents.read().get(notif_id).cloned()
    }

    /// Number of distinct documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }

    /// Number of upserts received, including merges into existing documents.
    #[must_use]
    pub fn write_count(&self) -> usize {
        *self.writes.read()
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn upsert(&self, record: &NotificationRecord) -> Result<()> {
        let Value::Object(fields) = serde_json::to_value(record)? else {
            return Err(Error::Store("record did not serialize to a map".into()));
        };

        let mut documents = self.documents.write();
        let document = documents.entry(record.notif_id.to_string()).or_default();
        document.extend(fields);
        document.insert(
            "createdAt".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
        *self.writes.write() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EventId, ProductId};

    fn record(stock: f64) -> NotificationRecord {
        NotificationRecord::low_stock(
            ProductId::new("sp-1"),
            &EventId::new("evt-1"),
            "Gasket".into(),
            String::new(),
            stock,
            10.0,
        )
    }

    #[tokio::test]
    async fn redelivery_merges_into_one_document() {
        let store = MemoryStore::new();
        store.upsert(&record(8.0)).await.unwrap();
        let first = store.get("sp-1_evt-1").unwrap();
        store.upsert(&record(8.0)).await.unwrap();
        let second = store.get("sp-1_evt-1").unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.write_count(), 2);
        for key in ["notifId", "title", "body", "productId", "stock", "read"] {
            assert_eq!(first[key], second[key], "field {key} changed");
        }
        assert!(second.contains_key("createdAt"));
    }

    #[tokio::test]
    async fn merge_keeps_foreign_fields() {
        let store = MemoryStore::new();
        store.upsert(&record(8.0)).await.unwrap();
        store
            .documents
            .write()
            .get_mut("sp-1_evt-1")
            .unwrap()
            .insert("archived".into(), Value::Bool(true));
        store.upsert(&record(8.0)).await.unwrap();

        assert_eq!(store.get("sp-1_evt-1").unwrap()["archived"], true);
    }
}
