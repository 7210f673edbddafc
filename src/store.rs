pub mod http;
pub mod memory;

pub use http::HttpStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::clinic::{NewPatient, Patient, Psychologist};
use crate::models::scheduling::{CareRequest, NewCareRequest, Resolution};

/// Contrato do serviço externo de solicitações.
///
/// O backend real (`HttpStore`) e o mock em memória (`MemoryStore`)
/// implementam o mesmo contrato; os workflows recebem o store por injeção e
/// não sabem qual dos dois está por trás.
#[async_trait]
pub trait RequestStore: Send + Sync {
    async fn list_psychologists(&self) -> Result<Vec<Psychologist>, AppError>;

    async fn create_request(&self, payload: NewCareRequest) -> Result<CareRequest, AppError>;

    // Todas as solicitações endereçadas ao psicólogo, em qualquer status.
    // O filtro de pendentes é responsabilidade do workflow de triagem.
    async fn list_requests(&self, psychologist_id: Uuid) -> Result<Vec<CareRequest>, AppError>;

    async fn update_request_status(
        &self,
        request_id: Uuid,
        resolution: Resolution,
        note: &str,
    ) -> Result<CareRequest, AppError>;

    async fn list_patients(&self, psychologist_id: Uuid) -> Result<Vec<Patient>, AppError>;

    async fn create_patient(&self, payload: NewPatient) -> Result<Patient, AppError>;
}
