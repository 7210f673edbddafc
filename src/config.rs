// src/config.rs

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::{FileCache, SnapshotCache};
use crate::common::gate::ConfirmationGate;
use crate::identity;
use crate::models::user::AuthUser;
use crate::services::{SchedulingService, TriageService};
use crate::store::{HttpStore, MemoryStore, RequestStore};

#[derive(Clone)]
pub struct AppState {
    pub user: AuthUser,
    pub scheduling: Arc<SchedulingService>,
    pub triage: Arc<TriageService>,
    pub gate: Arc<ConfirmationGate>,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let data_dir = data_dir()?;
        let user = identity::load_or_create(&data_dir.join("perfil.json")).await?;

        // INSIDEOUT_API_URL definida liga o store HTTP; sem ela, dados de
        // demonstração em memória.
        let store: Arc<dyn RequestStore> = match env::var("INSIDEOUT_API_URL") {
            Ok(base_url) => {
                tracing::info!("✅ Usando a API em {}", base_url);
                Arc::new(HttpStore::new(base_url))
            }
            Err(_) => {
                tracing::info!("Sem INSIDEOUT_API_URL; usando dados de demonstração");
                Arc::new(MemoryStore::with_fixtures(&user))
            }
        };

        let cache: Arc<dyn SnapshotCache> = Arc::new(FileCache::new(data_dir.join("snapshots")));

        // --- Monta o gráfico de dependências ---
        let scheduling = Arc::new(SchedulingService::new(store.clone()));
        let triage = Arc::new(TriageService::new(store, cache));

        Ok(Self {
            user,
            scheduling,
            triage,
            gate: Arc::new(ConfirmationGate::new()),
        })
    }
}

fn data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(dir) = env::var("INSIDEOUT_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let base = dirs::data_dir()
        .ok_or_else(|| anyhow::anyhow!("diretório de dados do usuário indisponível"))?;
    Ok(base.join("insideout"))
}
