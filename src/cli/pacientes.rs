// src/cli/pacientes.rs

use console::style;

use crate::common::error::AppError;
use crate::config::AppState;
use crate::models::clinic::PatientStatus;

/// Lista os pacientes do psicólogo logado.
pub async fn run(state: &AppState) -> Result<(), AppError> {
    let pacientes = state.triage.roster(state.user.id).await?;

    if pacientes.is_empty() {
        println!("{}", sem_pacientes());
        return Ok(());
    }

    println!(
        "{} ({})",
        style("Meus Pacientes").cyan().bold(),
        pacientes.len()
    );
    for p in &pacientes {
        let status = match p.status {
            PatientStatus::Ativo => style(p.status.label()).green(),
            PatientStatus::EmPausa => style(p.status.label()).yellow(),
            PatientStatus::Inativo => style(p.status.label()).dim(),
        };
        println!("  {} [{}]", style(&p.name).bold(), status);
        println!(
            "     {} | {} | {} anos | nascimento {}",
            p.email,
            p.phone,
            p.age,
            p.birth_date.format("%d/%m/%Y")
        );
    }
    Ok(())
}

fn sem_pacientes() -> String {
    style("Nenhum paciente cadastrado.").dim().to_string()
}
