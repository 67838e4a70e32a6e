//! In-Memory State Store Adapter
//!
//! Stores interview snapshots in memory.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::capture::CaptureState;
use crate::domain::foundation::SessionId;
use crate::ports::{StateStore, StateStoreError};

/// In-memory storage for interview snapshots
#[derive(Debug, Clone, Default)]
pub struct InMemoryStateStore {
    states: Arc<RwLock<HashMap<SessionId, CaptureState>>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data
    pub async fn clear(&self) {
        self.states.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.states.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.states.read().await.is_empty()
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn save(&self, id: SessionId, state: &CaptureState) -> Result<(), StateStoreError> {
        self.states.write().await.insert(id, state.clone());
        Ok(())
    }

    async fn load(&self, id: SessionId) -> Result<CaptureState, StateStoreError> {
        self.states
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StateStoreError::NotFound(id))
    }

    async fn exists(&self, id: SessionId) -> Result<bool, StateStoreError> {
        Ok(self.states.read().await.contains_key(&id))
    }

    async fn delete(&self, id: SessionId) -> Result<(), StateStoreError> {
        self.states.write().await.remove(&id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<SessionId>, StateStoreError> {
        let mut ids: Vec<SessionId> = self.states.read().await.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn test_state(topic: &str) -> CaptureState {
        CaptureState {
            topic: topic.to_string(),
            output_format_description: "Summary".to_string(),
            num_questions: 3,
            questions: Vec::new(),
            answers: BTreeMap::new(),
            questions_generated: false,
            synthesis_complete: false,
            final_output: None,
        }
    }

    #[tokio::test]
    async fn test_in_memory_save_and_load() {
        let store = InMemoryStateStore::new();
        let id = SessionId::new();

        store.save(id, &test_state("A")).await.unwrap();

        assert_eq!(store.load(id).await.unwrap().topic, "A");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_in_memory_load_nonexistent() {
        let store = InMemoryStateStore::new();
        let result = store.load(SessionId::new()).await;
        assert!(matches!(result, Err(StateStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_in_memory_save_replaces() {
        let store = InMemoryStateStore::new();
        let id = SessionId::new();

        store.save(id, &test_state("A")).await.unwrap();
        store.save(id, &test_state("B")).await.unwrap();

        assert_eq!(store.load(id).await.unwrap().topic, "B");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_in_memory_exists_delete_and_clear() {
        let store = InMemoryStateStore::new();
        let id = SessionId::new();

        store.save(id, &test_state("A")).await.unwrap();
        assert!(store.exists(id).await.unwrap());

        store.delete(id).await.unwrap();
        assert!(!store.exists(id).await.unwrap());
        store.delete(id).await.unwrap();

        store.save(SessionId::new(), &test_state("B")).await.unwrap();
        store.clear().await;
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_in_memory_list_is_sorted() {
        let store = InMemoryStateStore::new();
        let ids: Vec<SessionId> = (0..5).map(|_| SessionId::new()).collect();
        for id in &ids {
            store.save(*id, &test_state("x")).await.unwrap();
        }

        let mut expected = ids.clone();
        expected.sort();
        assert_eq!(store.list().await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let store = InMemoryStateStore::new();
        let clone = store.clone();
        let id = SessionId::new();

        clone.save(id, &test_state("A")).await.unwrap();

        assert!(store.exists(id).await.unwrap());
    }
}
