// src/cli/triagem.rs

use console::{style, StyledObject};
use uuid::Uuid;

use crate::cli::prompt::{self, Prompt};
use crate::common::error::AppError;
use crate::config::AppState;
use crate::models::scheduling::{CareRequest, RequestStatus, Urgency};
use crate::services::DataOrigin;

const ACCEPTED: &str = "Solicitação aceita! Paciente adicionado à sua lista.";
const REJECTED: &str = "Solicitação rejeitada.";

/// Fluxo do psicólogo: percorre a fila de solicitações pendentes aceitando
/// ou rejeitando uma a uma.
pub async fn run(state: &AppState, prompt: &mut Prompt) -> Result<(), AppError> {
    let reviewer = state.user.id;

    println!("{}", style("Triagem de Solicitações").cyan().bold());
    reload(state, reviewer).await?;

    loop {
        let fila = state.triage.current_pending(reviewer);
        if fila.is_empty() {
            println!("{}", fila_vazia());
            return Ok(());
        }
        render(&fila);

        let Some(comando) = prompt
            .ask("\nComando (a <n> aceita, r <n> rejeita, l recarrega, q sai):")
            .await?
        else {
            return Ok(());
        };

        let mut partes = comando.split_whitespace();
        match (partes.next(), partes.next()) {
            (Some("q"), _) => return Ok(()),
            (Some("l"), _) => reload(state, reviewer).await?,
            (Some("a"), Some(n)) => {
                let Some(solicitacao) = pick(&fila, n) else {
                    println!("{}", style("Número inválido.").red());
                    continue;
                };
                match state.triage.accept(solicitacao, reviewer).await {
                    Ok(()) => println!("{}", style(ACCEPTED).green()),
                    Err(e) => println!("{}", style(e.user_message()).red()),
                }
            }
            (Some("r"), Some(n)) => {
                let Some(solicitacao) = pick(&fila, n) else {
                    println!("{}", style("Número inválido.").red());
                    continue;
                };
                rejeitar(state, prompt, solicitacao, reviewer).await?;
            }
            (None, _) => {}
            _ => println!("{}", style("Comando não reconhecido.").red()),
        }
    }
}

// Rejeição sempre passa pelo portão de confirmação; cancelar não toca nada.
async fn rejeitar(
    state: &AppState,
    prompt: &mut Prompt,
    solicitacao: &CareRequest,
    reviewer: Uuid,
) -> Result<(), AppError> {
    let mensagem = format!(
        "Tem certeza que deseja rejeitar a solicitação de {}? Esta ação não poderá ser desfeita.",
        solicitacao.patient_name
    );
    if !prompt::confirm_with_gate(&state.gate, prompt, &mensagem).await? {
        println!("Rejeição cancelada.");
        return Ok(());
    }

    match state.triage.reject(solicitacao.id, reviewer).await {
        Ok(()) => println!("{}", style(REJECTED).green()),
        Err(e) => println!("{}", style(e.user_message()).red()),
    }
    Ok(())
}

async fn reload(state: &AppState, reviewer: Uuid) -> Result<(), AppError> {
    let load = state.triage.load_pending(reviewer).await?;
    match load.origin {
        DataOrigin::Store => {}
        DataOrigin::StaleCache => {
            println!("{}", style("📴 Modo offline: exibindo dados salvos").yellow());
        }
        DataOrigin::Unavailable => {
            println!(
                "{}",
                style("Não foi possível carregar as solicitações.").red()
            );
        }
    }
    Ok(())
}

fn pick<'a>(fila: &'a [CareRequest], n: &str) -> Option<&'a CareRequest> {
    n.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| fila.get(i))
}

fn render(fila: &[CareRequest]) {
    println!(
        "\n{} ({})",
        style("Solicitações pendentes").bold(),
        fila.len()
    );
    for (i, r) in fila.iter().enumerate() {
        println!("{}", card_header(i + 1, r));
        println!("     {} | {}", r.patient_email, r.patient_phone);
        println!("     {}", r.description);
    }
}

// Primeira linha do cartão: nome, badges de urgência e status, data de envio.
fn card_header(numero: usize, r: &CareRequest) -> String {
    format!(
        "  {}. {} [{}] [{}] {}",
        numero,
        style(&r.patient_name).bold(),
        urgency_badge(r.urgency),
        status_badge(r.status),
        r.created_at.format("%d/%m/%Y")
    )
}

fn urgency_badge(urgency: Urgency) -> StyledObject<&'static str> {
    match urgency {
        Urgency::Alta => style(urgency.label()).red(),
        Urgency::Media => style(urgency.label()).yellow(),
        Urgency::Baixa => style(urgency.label()).green(),
    }
}

fn status_badge(status: RequestStatus) -> StyledObject<&'static str> {
    match status {
        RequestStatus::Pendente => style(status.label()).blue(),
        RequestStatus::Aceito => style(status.label()).green(),
        RequestStatus::Rejeitado => style(status.label()).red(),
    }
}

fn fila_vazia() -> String {
    format!(
        "{}\n{}",
        style("Nenhuma solicitação encontrada").bold(),
        style("As solicitações de novos pacientes aparecerão aqui.").dim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn solicitacao() -> CareRequest {
        CareRequest {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            patient_name: "Mariana Castro".to_string(),
            patient_email: "mariana.castro@email.com".to_string(),
            patient_phone: "(11) 98888-1234".to_string(),
            preferred_psychologist_id: Uuid::new_v4(),
            description: "Preciso de acompanhamento.".to_string(),
            urgency: Urgency::Alta,
            status: RequestStatus::Pendente,
            resolution_note: None,
            preferred_dates: Vec::new(),
            preferred_times: Vec::new(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn cartao_traz_urgencia_status_e_data() {
        let linha = card_header(1, &solicitacao());
        let texto = console::strip_ansi_codes(&linha).to_string();

        assert!(texto.contains("Mariana Castro"));
        assert!(texto.contains("[Alta urgência]"));
        assert!(texto.contains("[Pendente]"));
        assert!(texto.contains("07/03/2024"));
    }

    #[test]
    fn fila_vazia_usa_o_texto_da_tela_de_solicitacoes() {
        let texto = console::strip_ansi_codes(&fila_vazia()).to_string();
        assert_eq!(
            texto,
            "Nenhuma solicitação encontrada\nAs solicitações de novos pacientes aparecerão aqui."
        );
    }
}
