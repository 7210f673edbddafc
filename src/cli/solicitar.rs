// src/cli/solicitar.rs

use console::style;
use validator::Validate;

use crate::cli::prompt::{self, Prompt};
use crate::common::error::AppError;
use crate::config::AppState;
use crate::models::clinic::Psychologist;
use crate::models::scheduling::{ScheduleForm, Urgency};

const CONFIRM_SUBMIT: &str = "Tem certeza que deseja enviar esta solicitação?";
const SUBMITTED: &str =
    "Solicitação enviada! O psicólogo avaliará e entrará em contato se aceitar você como paciente.";

/// Fluxo do paciente: preenche o formulário de solicitação, confirma e envia.
pub async fn run(state: &AppState, prompt: &mut Prompt) -> Result<(), AppError> {
    println!("{}", style("Solicitar Atendimento").cyan().bold());
    println!("Olá, {}.\n", state.user.name);

    // 1. Seletor de psicólogos
    let psychologists = state.scheduling.list_psychologists().await?;
    if psychologists.is_empty() {
        println!("Nenhum psicólogo disponível no momento.");
        return Ok(());
    }
    println!("Psicólogos disponíveis:");
    for (i, p) in psychologists.iter().enumerate() {
        println!("  {}. {} ({})", i + 1, p.name, p.specialty);
    }

    let Some(escolha) = prompt.ask("\nEscolha o psicólogo (número):").await? else {
        println!("Envio cancelado.");
        return Ok(());
    };
    let escolhido = escolha
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| psychologists.get(i));
    let preferred_psychologist_id = escolhido.map(|p| p.id);

    // 2. Descrição e urgência
    let Some(description) = prompt.ask("Descreva sua necessidade:").await? else {
        println!("Envio cancelado.");
        return Ok(());
    };

    println!("Urgência:");
    for (i, u) in Urgency::ALL.iter().enumerate() {
        println!("  {}. {}", i + 1, u.form_label());
    }
    let urgency = match prompt.ask("Escolha a urgência (Enter = média):").await? {
        Some(u) => match u.as_str() {
            "1" => Urgency::Baixa,
            "3" => Urgency::Alta,
            _ => Urgency::Media,
        },
        None => Urgency::Media,
    };

    // 3. Bloco informativo, presente sempre que há psicólogo selecionado.
    if let Some(p) = escolhido {
        println!("\n{}", info_block(p));
    }

    let form = ScheduleForm {
        preferred_psychologist_id,
        description,
        urgency,
    };

    // 4. Validação antes da confirmação; formulário incompleto nem abre o
    //    portão.
    if let Err(e) = form.validate() {
        println!("{}", style(AppError::from(e).user_message()).red());
        return Ok(());
    }

    // 5. Confirmação e envio
    if !prompt::confirm_with_gate(&state.gate, prompt, CONFIRM_SUBMIT).await? {
        println!("Envio cancelado.");
        return Ok(());
    }

    match state.scheduling.submit(&form, &state.user).await {
        Ok(_) => println!("\n{}", style(SUBMITTED).green()),
        Err(e) => println!("\n{}", style(e.user_message()).red()),
    }
    Ok(())
}

// Cartão "Informações Importantes" da tela de agendamento.
fn info_block(p: &Psychologist) -> String {
    format!(
        "{}\n{} {}\n{} {}\n{} Sua solicitação será enviada ao psicólogo. Se aceita, \
         ele entrará em contato para agendar as sessões.",
        style("Informações Importantes").bold(),
        style("Psicólogo selecionado:").bold(),
        p.name,
        style("Especialidade:").bold(),
        p.specialty,
        style("Como funciona:").bold()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn bloco_informativo_traz_o_psicologo_e_a_orientacao() {
        let p = Psychologist {
            id: Uuid::new_v4(),
            name: "Dra. Ana Souza".to_string(),
            specialty: "Psicologia Infantil".to_string(),
        };
        let texto = console::strip_ansi_codes(&info_block(&p)).to_string();

        assert!(texto.contains("Informações Importantes"));
        assert!(texto.contains("Psicólogo selecionado: Dra. Ana Souza"));
        assert!(texto.contains("Especialidade: Psicologia Infantil"));
        assert!(texto.contains(
            "Como funciona: Sua solicitação será enviada ao psicólogo. Se aceita, \
             ele entrará em contato para agendar as sessões."
        ));
    }
}
