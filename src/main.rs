//src/main.rs

use clap::Parser;

use insideout::cli::{self, Cli, Command};
use insideout::config::AppState;

// Os fluxos são conversas no terminal, uma interação por vez; uma thread
// basta.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).compact().init();

    let args = Cli::parse();

    let state = AppState::new().await?;
    tracing::info!("🚀 InsideOut pronto; usuário {}", state.user.name);

    let mut prompt = cli::prompt::Prompt::new();
    match args.command {
        Command::Solicitar => cli::solicitar::run(&state, &mut prompt).await?,
        Command::Triagem => cli::triagem::run(&state, &mut prompt).await?,
        Command::Pacientes => cli::pacientes::run(&state).await?,
    }
    Ok(())
}
