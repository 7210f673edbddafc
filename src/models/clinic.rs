// src/models/clinic.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- PSICÓLOGO ---

// Dados de referência, somente leitura; o cadastro é mantido pelo backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Psychologist {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
}

// --- PACIENTE ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PatientStatus {
    #[default]
    Ativo,
    #[serde(rename = "Em pausa")]
    EmPausa,
    Inativo,
}

impl PatientStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PatientStatus::Ativo => "Ativo",
            PatientStatus::EmPausa => "Em pausa",
            PatientStatus::Inativo => "Inativo",
        }
    }
}

// Um paciente só passa a existir quando o psicólogo aceita a solicitação.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub age: u32,
    pub status: PatientStatus,

    // Dono do prontuário: o psicólogo que aceitou a solicitação.
    pub psychologist_id: Uuid,
}

// Payload de criação (o id é atribuído pelo store).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub age: u32,
    pub status: PatientStatus,
    pub psychologist_id: Uuid,
}
