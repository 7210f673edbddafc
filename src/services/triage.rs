// src/services/triage.rs

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::cache::SnapshotCache;
use crate::common::error::AppError;
use crate::models::clinic::{NewPatient, Patient, PatientStatus};
use crate::models::scheduling::{CareRequest, RequestStatus, Resolution};
use crate::store::RequestStore;

// Notas de resolução gravadas junto com a mudança de status.
const ACCEPT_NOTE: &str = "Paciente aceito e cadastrado no sistema";
const REJECT_NOTE: &str = "Solicitação rejeitada pelo psicólogo";

// A solicitação não carrega nascimento nem idade; o cadastro nasce com
// placeholders que o psicólogo corrige depois.
const PLACEHOLDER_AGE: u32 = 30;

fn placeholder_birth_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 1, 1).expect("data fixa válida")
}

/// De onde veio a lista de pendentes exibida.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    /// Busca ao vivo no store.
    Store,
    /// Store fora do ar; servimos o último snapshot salvo, possivelmente
    /// defasado.
    StaleCache,
    /// Store fora do ar e nenhum snapshot salvo; a lista vem vazia.
    Unavailable,
}

#[derive(Debug, Clone)]
pub struct PendingLoad {
    pub requests: Vec<CareRequest>,
    pub origin: DataOrigin,
}

/// Workflow de triagem do psicólogo: carrega a fila de pendentes (com
/// fallback para o snapshot local quando o store está fora do ar) e resolve
/// cada solicitação como aceita ou rejeitada.
pub struct TriageService {
    store: Arc<dyn RequestStore>,
    cache: Arc<dyn SnapshotCache>,

    // Solicitações com resolução em andamento. Enquanto um id está aqui,
    // aceitar ou rejeitar o mesmo id é recusado; ids diferentes seguem em
    // paralelo.
    in_flight: Mutex<HashSet<Uuid>>,

    // Fila de pendentes em memória, por psicólogo.
    pending: Mutex<HashMap<Uuid, Vec<CareRequest>>>,
}

// Reserva de um id em triagem; devolve o id ao conjunto quando cai,
// inclusive nos caminhos de erro.
struct InFlightClaim<'a> {
    ids: &'a Mutex<HashSet<Uuid>>,
    id: Uuid,
}

impl Drop for InFlightClaim<'_> {
    fn drop(&mut self) {
        self.ids.lock().unwrap().remove(&self.id);
    }
}

impl TriageService {
    pub fn new(store: Arc<dyn RequestStore>, cache: Arc<dyn SnapshotCache>) -> Self {
        Self {
            store,
            cache,
            in_flight: Mutex::new(HashSet::new()),
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Carrega as solicitações pendentes do psicólogo. No caminho feliz a
    /// lista vem do store e o snapshot local é reescrito; se o store estiver
    /// fora do ar, vale o último snapshot salvo.
    pub async fn load_pending(&self, reviewer: Uuid) -> Result<PendingLoad, AppError> {
        match self.store.list_requests(reviewer).await {
            Ok(all) => {
                // 1. Só pendentes entram na fila de triagem.
                let requests: Vec<CareRequest> = all
                    .into_iter()
                    .filter(|r| r.status == RequestStatus::Pendente)
                    .collect();

                // 2. Atualiza o snapshot local. Falha aqui não derruba a
                //    tela; o snapshot é melhor esforço.
                if let Err(e) = self.cache.save(reviewer, &requests).await {
                    tracing::warn!("Falha ao salvar snapshot de pendentes: {}", e);
                }

                self.pending
                    .lock()
                    .unwrap()
                    .insert(reviewer, requests.clone());
                Ok(PendingLoad {
                    requests,
                    origin: DataOrigin::Store,
                })
            }
            Err(e) => {
                tracing::warn!("📴 Store indisponível, tentando snapshot local: {}", e);

                let cached = match self.cache.load(reviewer).await {
                    Ok(cached) => cached,
                    Err(cache_err) => {
                        tracing::warn!("Falha ao ler snapshot local: {}", cache_err);
                        None
                    }
                };

                let (requests, origin) = match cached {
                    Some(requests) => (requests, DataOrigin::StaleCache),
                    None => (Vec::new(), DataOrigin::Unavailable),
                };

                self.pending
                    .lock()
                    .unwrap()
                    .insert(reviewer, requests.clone());
                Ok(PendingLoad { requests, origin })
            }
        }
    }

    /// Lista de pacientes do psicólogo, direto do store.
    pub async fn roster(&self, reviewer: Uuid) -> Result<Vec<Patient>, AppError> {
        self.store.list_patients(reviewer).await
    }

    /// Fila atual em memória, sem nova ida ao store.
    pub fn current_pending(&self, reviewer: Uuid) -> Vec<CareRequest> {
        self.pending
            .lock()
            .unwrap()
            .get(&reviewer)
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_processing(&self, request_id: Uuid) -> bool {
        self.in_flight.lock().unwrap().contains(&request_id)
    }

    /// Aceita a solicitação: cadastra o paciente a partir da fotografia da
    /// solicitação e então marca a solicitação como aceita.
    pub async fn accept(&self, request: &CareRequest, reviewer: Uuid) -> Result<(), AppError> {
        let _claim = self.claim(request.id)?;

        // 1. Duplicidade por e-mail na lista do psicólogo. Se já existe,
        //    nada é gravado.
        let roster = self.store.list_patients(reviewer).await?;
        if roster.iter().any(|p| p.email == request.patient_email) {
            return Err(AppError::PatientAlreadyExists);
        }

        // 2. Cadastra o paciente com os dados que a solicitação carrega.
        self.store
            .create_patient(NewPatient {
                name: request.patient_name.clone(),
                email: request.patient_email.clone(),
                phone: request.patient_phone.clone(),
                birth_date: placeholder_birth_date(),
                age: PLACEHOLDER_AGE,
                status: PatientStatus::Ativo,
                psychologist_id: reviewer,
            })
            .await?;

        // 3. Marca a solicitação como aceita. As duas gravações não são
        //    atômicas: se esta falhar, o paciente recém-criado permanece e a
        //    solicitação continua pendente.
        self.store
            .update_request_status(request.id, Resolution::Aceito, ACCEPT_NOTE)
            .await?;

        tracing::info!(
            "✅ Solicitação {} aceita; paciente {} cadastrado",
            request.id,
            request.patient_name
        );

        // 4. Tira da fila e reescreve o snapshot local.
        self.drop_from_pending(reviewer, request.id).await;
        Ok(())
    }

    /// Rejeita a solicitação. A confirmação do psicólogo acontece antes, na
    /// camada de interface; aqui a decisão já está tomada.
    pub async fn reject(&self, request_id: Uuid, reviewer: Uuid) -> Result<(), AppError> {
        let _claim = self.claim(request_id)?;

        self.store
            .update_request_status(request_id, Resolution::Rejeitado, REJECT_NOTE)
            .await?;

        tracing::info!("Solicitação {} rejeitada", request_id);

        self.drop_from_pending(reviewer, request_id).await;
        Ok(())
    }

    fn claim(&self, request_id: Uuid) -> Result<InFlightClaim<'_>, AppError> {
        let mut ids = self.in_flight.lock().unwrap();
        if !ids.insert(request_id) {
            return Err(AppError::OperationInFlight);
        }
        Ok(InFlightClaim {
            ids: &self.in_flight,
            id: request_id,
        })
    }

    async fn drop_from_pending(&self, reviewer: Uuid, request_id: Uuid) {
        let updated = {
            let mut pending = self.pending.lock().unwrap();
            match pending.get_mut(&reviewer) {
                Some(queue) => {
                    queue.retain(|r| r.id != request_id);
                    queue.clone()
                }
                // Sem fila carregada não há snapshot a reescrever.
                None => return,
            }
        };
        // O store já é a verdade; snapshot desatualizado só custa um aviso.
        if let Err(e) = self.cache.save(reviewer, &updated).await {
            tracing::warn!("Falha ao atualizar snapshot de pendentes: {}", e);
        }
    }
}
