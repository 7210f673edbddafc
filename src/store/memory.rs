// src/store/memory.rs

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::clinic::{NewPatient, Patient, Psychologist};
use crate::models::scheduling::{CareRequest, NewCareRequest, RequestStatus, Resolution, Urgency};
use crate::models::user::AuthUser;
use crate::store::RequestStore;

// Estado interno do mock, protegido por um único Mutex.
#[derive(Default)]
struct Internal {
    psychologists: Vec<Psychologist>,
    requests: Vec<CareRequest>,
    patients: Vec<Patient>,

    // Simula queda de rede: com true, toda chamada falha.
    offline: bool,

    // Contador de criações, usado pelos testes para garantir que validação
    // reprovada nunca chega ao store.
    create_request_calls: usize,
}

/// Mock em memória do serviço de solicitações.
///
/// Faz o papel do backend durante desenvolvimento e testes: atribui ids,
/// carimba `created_at`, aplica as mesmas invariantes do serviço real
/// (transição de status única, e-mail de paciente único por psicólogo) e
/// pode ser colocado "offline" para exercitar o fallback de cache.
#[derive(Clone)]
pub struct MemoryStore {
    internal: Arc<Mutex<Internal>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            internal: Arc::new(Mutex::new(Internal::default())),
        }
    }

    // Cenário de demonstração: o usuário logado como psicólogo, dois
    // colegas de cadastro e duas solicitações pendentes aguardando triagem.
    pub fn with_fixtures(user: &AuthUser) -> Self {
        let store = Self::new();
        {
            let mut internal = store.internal.lock().unwrap();

            internal.psychologists.push(Psychologist {
                id: user.id,
                name: user.name.clone(),
                specialty: "Psicologia Clínica".to_string(),
            });
            internal.psychologists.push(Psychologist {
                id: Uuid::new_v4(),
                name: "Dra. Ana Souza".to_string(),
                specialty: "Psicologia Infantil".to_string(),
            });
            internal.psychologists.push(Psychologist {
                id: Uuid::new_v4(),
                name: "Dr. Carlos Lima".to_string(),
                specialty: "Terapia Cognitivo-Comportamental".to_string(),
            });

            internal.requests.push(CareRequest {
                id: Uuid::new_v4(),
                patient_id: Uuid::new_v4(),
                patient_name: "Mariana Castro".to_string(),
                patient_email: "mariana.castro@email.com".to_string(),
                patient_phone: "(11) 98888-1234".to_string(),
                preferred_psychologist_id: user.id,
                description: "Tenho sentido crises de ansiedade frequentes e preciso de \
                              acompanhamento."
                    .to_string(),
                urgency: Urgency::Alta,
                status: RequestStatus::Pendente,
                resolution_note: None,
                preferred_dates: Vec::new(),
                preferred_times: Vec::new(),
                created_at: Utc::now(),
            });
            internal.requests.push(CareRequest {
                id: Uuid::new_v4(),
                patient_id: Uuid::new_v4(),
                patient_name: "Pedro Henrique Dias".to_string(),
                patient_email: "pedro.dias@email.com".to_string(),
                patient_phone: "(11) 97777-5678".to_string(),
                preferred_psychologist_id: user.id,
                description: "Gostaria de iniciar terapia para trabalhar autoconhecimento."
                    .to_string(),
                urgency: Urgency::Baixa,
                status: RequestStatus::Pendente,
                resolution_note: None,
                preferred_dates: Vec::new(),
                preferred_times: Vec::new(),
                created_at: Utc::now(),
            });
        }
        store
    }

    pub fn seed_psychologist(&self, psychologist: Psychologist) {
        self.internal
            .lock()
            .unwrap()
            .psychologists
            .push(psychologist);
    }

    pub fn set_offline(&self, offline: bool) {
        self.internal.lock().unwrap().offline = offline;
    }

    pub fn create_request_calls(&self) -> usize {
        self.internal.lock().unwrap().create_request_calls
    }

    fn ensure_online(internal: &Internal) -> Result<(), AppError> {
        if internal.offline {
            return Err(AppError::StoreUnavailable(
                "mock em modo offline".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RequestStore for MemoryStore {
    async fn list_psychologists(&self) -> Result<Vec<Psychologist>, AppError> {
        let internal = self.internal.lock().unwrap();
        Self::ensure_online(&internal)?;
        Ok(internal.psychologists.clone())
    }

    async fn create_request(&self, payload: NewCareRequest) -> Result<CareRequest, AppError> {
        let mut internal = self.internal.lock().unwrap();
        internal.create_request_calls += 1;
        Self::ensure_online(&internal)?;

        // O psicólogo escolhido precisa existir no momento do envio.
        if !internal
            .psychologists
            .iter()
            .any(|p| p.id == payload.preferred_psychologist_id)
        {
            return Err(AppError::PsychologistNotFound);
        }

        let request = CareRequest {
            id: Uuid::new_v4(),
            patient_id: payload.patient_id,
            patient_name: payload.patient_name,
            patient_email: payload.patient_email,
            patient_phone: payload.patient_phone,
            preferred_psychologist_id: payload.preferred_psychologist_id,
            description: payload.description,
            urgency: payload.urgency,
            status: RequestStatus::Pendente,
            resolution_note: None,
            preferred_dates: payload.preferred_dates,
            preferred_times: payload.preferred_times,
            created_at: Utc::now(),
        };
        internal.requests.push(request.clone());
        Ok(request)
    }

    async fn list_requests(&self, psychologist_id: Uuid) -> Result<Vec<CareRequest>, AppError> {
        let internal = self.internal.lock().unwrap();
        Self::ensure_online(&internal)?;
        Ok(internal
            .requests
            .iter()
            .filter(|r| r.preferred_psychologist_id == psychologist_id)
            .cloned()
            .collect())
    }

    async fn update_request_status(
        &self,
        request_id: Uuid,
        resolution: Resolution,
        note: &str,
    ) -> Result<CareRequest, AppError> {
        let mut internal = self.internal.lock().unwrap();
        Self::ensure_online(&internal)?;

        let request = internal
            .requests
            .iter_mut()
            .find(|r| r.id == request_id)
            .ok_or(AppError::RequestNotFound)?;

        // A transição é única: quem já foi aceito ou rejeitado não volta.
        if request.status != RequestStatus::Pendente {
            return Err(AppError::RequestAlreadyResolved);
        }

        request.status = resolution.into();
        request.resolution_note = Some(note.to_string());
        Ok(request.clone())
    }

    async fn list_patients(&self, psychologist_id: Uuid) -> Result<Vec<Patient>, AppError> {
        let internal = self.internal.lock().unwrap();
        Self::ensure_online(&internal)?;
        Ok(internal
            .patients
            .iter()
            .filter(|p| p.psychologist_id == psychologist_id)
            .cloned()
            .collect())
    }

    async fn create_patient(&self, payload: NewPatient) -> Result<Patient, AppError> {
        let mut internal = self.internal.lock().unwrap();
        Self::ensure_online(&internal)?;

        // E-mail único dentro da lista de cada psicólogo.
        if internal
            .patients
            .iter()
            .any(|p| p.psychologist_id == payload.psychologist_id && p.email == payload.email)
        {
            return Err(AppError::PatientAlreadyExists);
        }

        let patient = Patient {
            id: Uuid::new_v4(),
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            birth_date: payload.birth_date,
            age: payload.age,
            status: payload.status,
            psychologist_id: payload.psychologist_id,
        };
        internal.patients.push(patient.clone());
        Ok(patient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::clinic::PatientStatus;

    fn psicologa() -> Psychologist {
        Psychologist {
            id: Uuid::new_v4(),
            name: "Dra. Ana Souza".to_string(),
            specialty: "Psicologia Infantil".to_string(),
        }
    }

    fn payload(psychologist_id: Uuid) -> NewCareRequest {
        NewCareRequest {
            patient_id: Uuid::new_v4(),
            patient_name: "João Silva".to_string(),
            patient_email: "joao@email.com".to_string(),
            patient_phone: "(11) 99999-9999".to_string(),
            preferred_psychologist_id: psychologist_id,
            description: "Preciso de acompanhamento.".to_string(),
            urgency: Urgency::Media,
            preferred_dates: Vec::new(),
            preferred_times: Vec::new(),
        }
    }

    #[tokio::test]
    async fn solicitacao_criada_nasce_pendente_com_data() {
        let store = MemoryStore::new();
        let psi = psicologa();
        store.seed_psychologist(psi.clone());

        let request = store.create_request(payload(psi.id)).await.unwrap();

        assert_eq!(request.status, RequestStatus::Pendente);
        assert!(request.resolution_note.is_none());
        assert!(request.created_at <= Utc::now());
    }

    #[tokio::test]
    async fn criar_solicitacao_para_psicologo_inexistente_falha() {
        let store = MemoryStore::new();
        let result = store.create_request(payload(Uuid::new_v4())).await;
        assert!(matches!(result, Err(AppError::PsychologistNotFound)));
    }

    #[tokio::test]
    async fn segunda_triagem_da_mesma_solicitacao_e_recusada() {
        let store = MemoryStore::new();
        let psi = psicologa();
        store.seed_psychologist(psi.clone());
        let request = store.create_request(payload(psi.id)).await.unwrap();

        store
            .update_request_status(request.id, Resolution::Aceito, "ok")
            .await
            .unwrap();
        let again = store
            .update_request_status(request.id, Resolution::Rejeitado, "então não")
            .await;

        assert!(matches!(again, Err(AppError::RequestAlreadyResolved)));
    }

    #[tokio::test]
    async fn email_de_paciente_e_unico_por_psicologo() {
        let store = MemoryStore::new();
        let dono = Uuid::new_v4();
        let outro = Uuid::new_v4();

        let novo = |psicologo: Uuid| NewPatient {
            name: "João Silva".to_string(),
            email: "joao@email.com".to_string(),
            phone: "(11) 99999-9999".to_string(),
            birth_date: chrono::NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            age: 30,
            status: PatientStatus::Ativo,
            psychologist_id: psicologo,
        };

        store.create_patient(novo(dono)).await.unwrap();
        let duplicado = store.create_patient(novo(dono)).await;
        assert!(matches!(duplicado, Err(AppError::PatientAlreadyExists)));

        // O mesmo e-mail pode existir na lista de outro psicólogo.
        store.create_patient(novo(outro)).await.unwrap();
    }

    #[tokio::test]
    async fn modo_offline_derruba_todas_as_chamadas() {
        let store = MemoryStore::new();
        store.set_offline(true);

        assert!(matches!(
            store.list_psychologists().await,
            Err(AppError::StoreUnavailable(_))
        ));
        assert!(matches!(
            store.list_requests(Uuid::new_v4()).await,
            Err(AppError::StoreUnavailable(_))
        ));
    }
}
