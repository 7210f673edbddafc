// src/cli.rs

pub mod pacientes;
pub mod prompt;
pub mod solicitar;
pub mod triagem;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "insideout")]
#[command(version)]
#[command(about = "Agendamento de atendimento psicológico voluntário")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Envia uma solicitação de atendimento (visão do paciente)
    Solicitar,
    /// Tria as solicitações pendentes (visão do psicólogo)
    Triagem,
    /// Lista os pacientes cadastrados (visão do psicólogo)
    Pacientes,
}
