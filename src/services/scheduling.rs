// src/services/scheduling.rs

use std::sync::{Arc, Mutex};

use validator::Validate;

use crate::common::error::AppError;
use crate::models::clinic::Psychologist;
use crate::models::scheduling::{CareRequest, NewCareRequest, ScheduleForm};
use crate::models::user::AuthUser;
use crate::store::RequestStore;

// Telefone usado quando o perfil do usuário não tem um.
const PHONE_PLACEHOLDER: &str = "(11) 99999-9999";

/// Workflow de envio de solicitação: valida o formulário, monta o payload a
/// partir do usuário logado e faz exatamente uma chamada de criação por
/// envio confirmado.
pub struct SchedulingService {
    store: Arc<dyn RequestStore>,

    // Guarda de reentrada: um envio por vez.
    submitting: Mutex<bool>,
}

// Reserva da guarda de envio; a devolve quando cai, inclusive se o futuro
// do envio for descartado no meio.
struct SubmitClaim<'a> {
    flag: &'a Mutex<bool>,
}

impl Drop for SubmitClaim<'_> {
    fn drop(&mut self) {
        *self.flag.lock().unwrap() = false;
    }
}

impl SchedulingService {
    pub fn new(store: Arc<dyn RequestStore>) -> Self {
        Self {
            store,
            submitting: Mutex::new(false),
        }
    }

    // Passthrough para popular o seletor do formulário.
    pub async fn list_psychologists(&self) -> Result<Vec<Psychologist>, AppError> {
        self.store.list_psychologists().await
    }

    pub fn is_submitting(&self) -> bool {
        *self.submitting.lock().unwrap()
    }

    pub async fn submit(
        &self,
        form: &ScheduleForm,
        user: &AuthUser,
    ) -> Result<CareRequest, AppError> {
        // 1. Validação primeiro: formulário incompleto nunca chega ao store.
        form.validate()?;
        let psychologist_id = form
            .preferred_psychologist_id
            // validate() já garantiu o campo; o ramo existe só pelo tipo.
            .ok_or(AppError::PsychologistNotFound)?;

        // 2. Recusa reenvio enquanto houver um envio em andamento. A guarda
        //    cai nos dois desfechos.
        let _claim = self.claim()?;

        // 3. Monta o payload: fotografia do usuário logado + campos do
        //    formulário. Datas/horários preferidos seguem vazios.
        let payload = NewCareRequest {
            patient_id: user.id,
            patient_name: user.name.clone(),
            patient_email: user.email.clone(),
            patient_phone: user
                .phone
                .clone()
                .unwrap_or_else(|| PHONE_PLACEHOLDER.to_string()),
            preferred_psychologist_id: psychologist_id,
            description: form.description.clone(),
            urgency: form.urgency,
            preferred_dates: Vec::new(),
            preferred_times: Vec::new(),
        };

        // 4. Exatamente uma chamada de criação; sem retry. Se falhar, o
        //    chamador decide se reapresenta o formulário.
        let result = self.store.create_request(payload).await;

        match &result {
            Ok(request) => {
                tracing::info!("✅ Solicitação {} enviada para o psicólogo", request.id);
            }
            Err(e) => {
                tracing::error!("🔥 Falha ao enviar solicitação: {}", e);
            }
        }
        result
    }

    fn claim(&self) -> Result<SubmitClaim<'_>, AppError> {
        let mut submitting = self.submitting.lock().unwrap();
        if *submitting {
            return Err(AppError::OperationInFlight);
        }
        *submitting = true;
        Ok(SubmitClaim {
            flag: &self.submitting,
        })
    }
}
