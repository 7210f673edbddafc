use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Os workflows capturam falhas do store/cache na fronteira e as traduzem
// para estas variantes; nenhuma falha crua de transporte chega à interface.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Paciente já cadastrado na lista do psicólogo")]
    PatientAlreadyExists,

    #[error("Solicitação não encontrada")]
    RequestNotFound,

    #[error("Psicólogo não encontrado")]
    PsychologistNotFound,

    #[error("A solicitação já foi triada")]
    RequestAlreadyResolved,

    #[error("Já existe uma operação em andamento para este registro")]
    OperationInFlight,

    #[error("Já existe uma confirmação aguardando resposta")]
    GatePending,

    // Falha de rede ou do próprio store. A mensagem detalhada vai para o
    // log; o usuário recebe um aviso genérico.
    #[error("Serviço de solicitações indisponível: {0}")]
    StoreUnavailable(String),

    #[error("Erro no cache local: {0}")]
    CacheError(String),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno")]
    InternalServerError(#[from] anyhow::Error),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::StoreUnavailable(e.to_string())
    }
}

impl AppError {
    // A mensagem que o usuário vê no terminal, sempre em português e sem
    // detalhes técnicos.
    pub fn user_message(&self) -> String {
        match self {
            AppError::ValidationError(errors) => {
                // Ordena por campo para a mensagem composta ser estável.
                let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
                fields.sort_by(|a, b| a.0.cmp(&b.0));

                let mut messages: Vec<String> = Vec::new();
                for (_, field_errors) in fields {
                    for field_error in field_errors.iter() {
                        if let Some(msg) = &field_error.message {
                            messages.push(msg.to_string());
                        }
                    }
                }
                if messages.is_empty() {
                    "Um ou mais campos são inválidos.".to_string()
                } else {
                    messages.join(" ")
                }
            }
            AppError::PatientAlreadyExists => {
                "Este paciente já está cadastrado em sua lista!".to_string()
            }
            AppError::RequestNotFound => "Solicitação não encontrada.".to_string(),
            AppError::PsychologistNotFound => "Psicólogo não encontrado.".to_string(),
            AppError::RequestAlreadyResolved => {
                "Esta solicitação já foi aceita ou rejeitada.".to_string()
            }
            AppError::OperationInFlight => {
                "Aguarde: esta solicitação ainda está sendo processada.".to_string()
            }
            AppError::GatePending => {
                "Responda à confirmação pendente antes de continuar.".to_string()
            }
            AppError::StoreUnavailable(_) => "Erro ao processar solicitação.".to_string(),
            AppError::CacheError(_) => "Não foi possível usar os dados salvos.".to_string(),

            // Erros internos viram uma mensagem genérica; o detalhe fica no
            // log.
            AppError::InternalServerError(e) => {
                tracing::error!("Erro interno: {:#}", e);
                "Ocorreu um erro inesperado.".to_string()
            }
        }
    }
}
