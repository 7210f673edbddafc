// src/models/scheduling.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// --- ENUMS ---

// Mesmos valores que trafegam no contrato do store: "baixa" | "media" | "alta"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Baixa,
    #[default]
    Media,
    Alta,
}

impl Urgency {
    pub const ALL: [Urgency; 3] = [Urgency::Baixa, Urgency::Media, Urgency::Alta];

    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Baixa => "Baixa urgência",
            Urgency::Media => "Média urgência",
            Urgency::Alta => "Alta urgência",
        }
    }

    // Texto das opções no formulário de solicitação.
    pub fn form_label(&self) -> &'static str {
        match self {
            Urgency::Baixa => "Baixa - Posso aguardar",
            Urgency::Media => "Média - Prefiro em breve",
            Urgency::Alta => "Alta - Preciso urgentemente",
        }
    }
}

// "pendente" | "aceito" | "rejeitado". A transição é única: uma solicitação
// sai de pendente para um estado terminal e nunca volta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pendente,
    Aceito,
    Rejeitado,
}

impl RequestStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Pendente => "Pendente",
            RequestStatus::Aceito => "Aceito",
            RequestStatus::Rejeitado => "Rejeitado",
        }
    }
}

// Desfecho de uma triagem. O store só aceita estes dois valores em
// `update_request_status`; "pendente" nunca é um destino válido.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Aceito,
    Rejeitado,
}

impl From<Resolution> for RequestStatus {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Aceito => RequestStatus::Aceito,
            Resolution::Rejeitado => RequestStatus::Rejeitado,
        }
    }
}

// --- SOLICITAÇÃO ---

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareRequest {
    pub id: Uuid,

    // Fotografia da identidade do solicitante no momento do envio.
    // Não acompanha mudanças futuras no perfil do usuário.
    pub patient_id: Uuid,
    pub patient_name: String,
    pub patient_email: String,
    pub patient_phone: String,

    pub preferred_psychologist_id: Uuid,
    pub description: String,
    pub urgency: Urgency,

    pub status: RequestStatus,
    pub resolution_note: Option<String>,

    // O formulário atual não coleta datas/horários preferidos; os campos
    // seguem no contrato e trafegam vazios.
    pub preferred_dates: Vec<NaiveDate>,
    pub preferred_times: Vec<String>,

    pub created_at: DateTime<Utc>,
}

// Payload de criação: os campos acima menos id/status/createdAt, que são
// atribuídos pelo store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCareRequest {
    pub patient_id: Uuid,
    pub patient_name: String,
    pub patient_email: String,
    pub patient_phone: String,
    pub preferred_psychologist_id: Uuid,
    pub description: String,
    pub urgency: Urgency,
    #[serde(default)]
    pub preferred_dates: Vec<NaiveDate>,
    #[serde(default)]
    pub preferred_times: Vec<String>,
}

// Entrada do formulário de agendamento
#[derive(Debug, Clone, Default, Validate)]
pub struct ScheduleForm {
    #[validate(required(message = "Selecione um psicólogo."))]
    pub preferred_psychologist_id: Option<Uuid>,

    #[validate(length(min = 1, message = "Descreva sua necessidade de atendimento."))]
    pub description: String,

    pub urgency: Urgency,
}
