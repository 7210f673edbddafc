// src/cache/memory.rs

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::cache::SnapshotCache;
use crate::common::error::AppError;
use crate::models::scheduling::CareRequest;

// Fake em memória da porta de cache, para testes e execuções efêmeras.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<Uuid, Vec<CareRequest>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotCache for MemoryCache {
    async fn load(&self, psychologist_id: Uuid) -> Result<Option<Vec<CareRequest>>, AppError> {
        Ok(self.entries.lock().unwrap().get(&psychologist_id).cloned())
    }

    async fn save(
        &self,
        psychologist_id: Uuid,
        requests: &[CareRequest],
    ) -> Result<(), AppError> {
        self.entries
            .lock()
            .unwrap()
            .insert(psychologist_id, requests.to_vec());
        Ok(())
    }
}
