pub mod file;
pub mod memory;

pub use file::FileCache;
pub use memory::MemoryCache;

use async_trait::async_trait;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::scheduling::CareRequest;

/// Porta de persistência do último snapshot de pendentes, uma entrada por
/// psicólogo.
///
/// Um retrato possivelmente defasado, nunca fonte de verdade. O workflow de
/// triagem o lê somente quando a busca no store falha e o reescreve a cada
/// busca bem-sucedida e a cada aceite/rejeição.
#[async_trait]
pub trait SnapshotCache: Send + Sync {
    async fn load(&self, psychologist_id: Uuid) -> Result<Option<Vec<CareRequest>>, AppError>;

    async fn save(&self, psychologist_id: Uuid, requests: &[CareRequest])
    -> Result<(), AppError>;
}
