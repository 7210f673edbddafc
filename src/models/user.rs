// src/models/user.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Usuário autenticado, fornecido pelo provedor de identidade externo.
// Consumimos estes dados; autenticação em si não acontece aqui.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,

    // Nem todo perfil tem telefone; o envio da solicitação usa um
    // placeholder fixo quando ausente.
    pub phone: Option<String>,
}
