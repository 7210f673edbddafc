// src/cli/prompt.rs

use std::io::Write;

use anyhow::Context;
use console::style;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::common::error::AppError;
use crate::common::gate::ConfirmationGate;

/// Leitura de linhas do terminal para os fluxos interativos.
pub struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Mostra o rótulo e lê uma linha. `None` significa fim da entrada.
    pub async fn ask(&mut self, label: &str) -> Result<Option<String>, AppError> {
        print!("{} ", label);
        std::io::stdout()
            .flush()
            .context("falha ao escrever no terminal")?;

        let line = self
            .lines
            .next_line()
            .await
            .context("falha ao ler do terminal")?;
        Ok(line.map(|l| l.trim().to_string()))
    }
}

impl Default for Prompt {
    fn default() -> Self {
        Self::new()
    }
}

/// Abre o portão de confirmação, exibe o prompt registrado nele e o resolve
/// com a resposta digitada. Fim de entrada conta como cancelamento.
pub async fn confirm_with_gate(
    gate: &ConfirmationGate,
    prompt: &mut Prompt,
    message: &str,
) -> Result<bool, AppError> {
    let decision = gate.open(message)?;

    // O texto exibido é o que o portão registrou na abertura.
    if let Some(texto) = gate.message() {
        println!("\n{}", style(texto).yellow().bold());
    }

    match prompt.ask("Confirmar? [s/N]").await? {
        Some(resposta)
            if resposta.eq_ignore_ascii_case("s") || resposta.eq_ignore_ascii_case("sim") =>
        {
            gate.confirm();
        }
        _ => {
            gate.cancel();
        }
    }
    Ok(decision.resolved().await)
}
