// src/store/http.rs

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::clinic::{NewPatient, Patient, Psychologist};
use crate::models::scheduling::{CareRequest, NewCareRequest, Resolution};
use crate::store::RequestStore;

/// Cliente do backend real de solicitações.
///
/// Toda falha de transporte ou resposta inesperada é traduzida aqui mesmo
/// para `AppError`; as camadas de cima nunca veem um erro cru do `reqwest`.
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateStatusBody<'a> {
    status: Resolution,
    resolution_note: &'a str,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // Erro genérico para respostas fora do esperado.
    fn unexpected(status: StatusCode) -> AppError {
        AppError::StoreUnavailable(format!("resposta inesperada do backend: {}", status))
    }
}

#[async_trait]
impl RequestStore for HttpStore {
    async fn list_psychologists(&self) -> Result<Vec<Psychologist>, AppError> {
        let response = self.client.get(self.url("/psychologists")).send().await?;
        if !response.status().is_success() {
            return Err(Self::unexpected(response.status()));
        }
        Ok(response.json().await?)
    }

    async fn create_request(&self, payload: NewCareRequest) -> Result<CareRequest, AppError> {
        let response = self
            .client
            .post(self.url("/requests"))
            .json(&payload)
            .send()
            .await?;

        match response.status() {
            s if s.is_success() => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(AppError::PsychologistNotFound),
            s => Err(Self::unexpected(s)),
        }
    }

    async fn list_requests(&self, psychologist_id: Uuid) -> Result<Vec<CareRequest>, AppError> {
        let response = self
            .client
            .get(self.url("/requests"))
            .query(&[("psychologistId", psychologist_id.to_string())])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::unexpected(response.status()));
        }
        Ok(response.json().await?)
    }

    async fn update_request_status(
        &self,
        request_id: Uuid,
        resolution: Resolution,
        note: &str,
    ) -> Result<CareRequest, AppError> {
        let body = UpdateStatusBody {
            status: resolution,
            resolution_note: note,
        };
        let response = self
            .client
            .patch(self.url(&format!("/requests/{}/status", request_id)))
            .json(&body)
            .send()
            .await?;

        match response.status() {
            s if s.is_success() => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(AppError::RequestNotFound),
            // O backend recusa a segunda triagem da mesma solicitação.
            StatusCode::CONFLICT => Err(AppError::RequestAlreadyResolved),
            s => Err(Self::unexpected(s)),
        }
    }

    async fn list_patients(&self, psychologist_id: Uuid) -> Result<Vec<Patient>, AppError> {
        let response = self
            .client
            .get(self.url("/patients"))
            .query(&[("psychologistId", psychologist_id.to_string())])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::unexpected(response.status()));
        }
        Ok(response.json().await?)
    }

    async fn create_patient(&self, payload: NewPatient) -> Result<Patient, AppError> {
        let response = self
            .client
            .post(self.url("/patients"))
            .json(&payload)
            .send()
            .await?;

        match response.status() {
            s if s.is_success() => Ok(response.json().await?),
            // E-mail já cadastrado na lista do psicólogo.
            StatusCode::CONFLICT => Err(AppError::PatientAlreadyExists),
            s => Err(Self::unexpected(s)),
        }
    }
}
