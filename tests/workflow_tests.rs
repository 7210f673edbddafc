//! Ciclo completo: paciente envia a solicitação, o psicólogo tria a fila e
//! o snapshot local responde quando o store está fora do ar.

use std::sync::Arc;

use uuid::Uuid;

use insideout::cache::{FileCache, MemoryCache};
use insideout::common::error::AppError;
use insideout::common::gate::ConfirmationGate;
use insideout::models::clinic::Psychologist;
use insideout::models::scheduling::{RequestStatus, ScheduleForm, Urgency};
use insideout::models::user::AuthUser;
use insideout::services::{DataOrigin, SchedulingService, TriageService};
use insideout::store::{MemoryStore, RequestStore};

fn usuario(nome: &str, email: &str) -> AuthUser {
    AuthUser {
        id: Uuid::new_v4(),
        name: nome.to_string(),
        email: email.to_string(),
        phone: None,
    }
}

fn formulario(psicologo: Uuid, descricao: &str, urgency: Urgency) -> ScheduleForm {
    ScheduleForm {
        preferred_psychologist_id: Some(psicologo),
        description: descricao.to_string(),
        urgency,
    }
}

fn store_do_consultorio(psicologo: &AuthUser) -> MemoryStore {
    let store = MemoryStore::new();
    store.seed_psychologist(Psychologist {
        id: psicologo.id,
        name: psicologo.name.clone(),
        specialty: "Psicologia Clínica".to_string(),
    });
    store
}

#[tokio::test]
async fn ciclo_completo_de_solicitacao_e_triagem() {
    let psicologo = usuario("Dr. Ricardo Mendes", "ricardo@clinica.com");
    let store = store_do_consultorio(&psicologo);

    let scheduling = SchedulingService::new(Arc::new(store.clone()));
    let triage = TriageService::new(Arc::new(store.clone()), Arc::new(MemoryCache::new()));

    // Duas pessoas pedem atendimento ao mesmo psicólogo.
    let ana = usuario("Ana Beatriz", "ana@email.com");
    let rafael = usuario("Rafael Costa", "rafael@email.com");
    let a = scheduling
        .submit(
            &formulario(psicologo.id, "Crises de ansiedade frequentes.", Urgency::Alta),
            &ana,
        )
        .await
        .unwrap();
    let b = scheduling
        .submit(
            &formulario(psicologo.id, "Gostaria de acompanhamento.", Urgency::Baixa),
            &rafael,
        )
        .await
        .unwrap();

    // A fila de triagem enxerga as duas, vindas do store.
    let load = triage.load_pending(psicologo.id).await.unwrap();
    assert_eq!(load.origin, DataOrigin::Store);
    assert_eq!(load.requests.len(), 2);

    // Aceitar a primeira cadastra a paciente e encolhe a fila.
    triage.accept(&a, psicologo.id).await.unwrap();
    let pacientes = store.list_patients(psicologo.id).await.unwrap();
    assert_eq!(pacientes.len(), 1);
    assert_eq!(pacientes[0].email, ana.email);

    let fila = triage.current_pending(psicologo.id);
    assert_eq!(fila.len(), 1);
    assert_eq!(fila[0].id, b.id);

    // Cancelar no portão não toca a solicitação.
    let gate = ConfirmationGate::new();
    let mensagem = format!(
        "Tem certeza que deseja rejeitar a solicitação de {}? Esta ação não poderá ser desfeita.",
        b.patient_name
    );
    let decisao = gate.open(mensagem.clone()).unwrap();
    gate.cancel();
    assert!(!decisao.resolved().await);

    let todas = store.list_requests(psicologo.id).await.unwrap();
    let intocada = todas.iter().find(|r| r.id == b.id).unwrap();
    assert_eq!(intocada.status, RequestStatus::Pendente);
    assert_eq!(triage.current_pending(psicologo.id).len(), 1);

    // Confirmar libera a rejeição; a fila esvazia.
    let decisao = gate.open(mensagem).unwrap();
    gate.confirm();
    assert!(decisao.resolved().await);
    triage.reject(b.id, psicologo.id).await.unwrap();
    assert!(triage.current_pending(psicologo.id).is_empty());

    // Store fora do ar: a recarga serve o último snapshot, agora vazio.
    store.set_offline(true);
    let offline = triage.load_pending(psicologo.id).await.unwrap();
    assert_eq!(offline.origin, DataOrigin::StaleCache);
    assert!(offline.requests.is_empty());
}

#[tokio::test]
async fn segunda_solicitacao_do_mesmo_paciente_esbarra_no_duplicado() {
    let psicologo = usuario("Dra. Camila Rocha", "camila@clinica.com");
    let store = store_do_consultorio(&psicologo);

    let scheduling = SchedulingService::new(Arc::new(store.clone()));
    let triage = TriageService::new(Arc::new(store.clone()), Arc::new(MemoryCache::new()));

    // A mesma pessoa envia duas solicitações antes da triagem.
    let ana = usuario("Ana Beatriz", "ana@email.com");
    let primeira = scheduling
        .submit(
            &formulario(psicologo.id, "Primeira tentativa de contato.", Urgency::Media),
            &ana,
        )
        .await
        .unwrap();
    let segunda = scheduling
        .submit(
            &formulario(psicologo.id, "Reenviando por ansiedade.", Urgency::Alta),
            &ana,
        )
        .await
        .unwrap();

    triage.load_pending(psicologo.id).await.unwrap();
    triage.accept(&primeira, psicologo.id).await.unwrap();

    // O e-mail já está na lista; nada é gravado e a solicitação fica na fila.
    let repetida = triage.accept(&segunda, psicologo.id).await;
    assert!(matches!(repetida, Err(AppError::PatientAlreadyExists)));
    assert_eq!(store.list_patients(psicologo.id).await.unwrap().len(), 1);

    let fila = triage.current_pending(psicologo.id);
    assert_eq!(fila.len(), 1);
    assert_eq!(fila[0].id, segunda.id);
}

#[tokio::test]
async fn fila_de_um_psicologo_nao_vaza_para_outro() {
    let ricardo = usuario("Dr. Ricardo Mendes", "ricardo@clinica.com");
    let store = store_do_consultorio(&ricardo);
    let camila_id = Uuid::new_v4();
    store.seed_psychologist(Psychologist {
        id: camila_id,
        name: "Dra. Camila Rocha".to_string(),
        specialty: "Terapia Cognitivo-Comportamental".to_string(),
    });

    let scheduling = SchedulingService::new(Arc::new(store.clone()));
    let triage = TriageService::new(Arc::new(store.clone()), Arc::new(MemoryCache::new()));

    let ana = usuario("Ana Beatriz", "ana@email.com");
    scheduling
        .submit(
            &formulario(ricardo.id, "Prefiro o Dr. Ricardo.", Urgency::Media),
            &ana,
        )
        .await
        .unwrap();

    let do_ricardo = triage.load_pending(ricardo.id).await.unwrap();
    assert_eq!(do_ricardo.requests.len(), 1);

    let da_camila = triage.load_pending(camila_id).await.unwrap();
    assert!(da_camila.requests.is_empty());
}

#[tokio::test]
async fn snapshot_em_disco_sobrevive_a_uma_nova_execucao() {
    let psicologo = usuario("Dr. Ricardo Mendes", "ricardo@clinica.com");
    let store = store_do_consultorio(&psicologo);
    let dir = tempfile::tempdir().unwrap();

    let scheduling = SchedulingService::new(Arc::new(store.clone()));
    let ana = usuario("Ana Beatriz", "ana@email.com");
    scheduling
        .submit(
            &formulario(psicologo.id, "Busco acompanhamento.", Urgency::Media),
            &ana,
        )
        .await
        .unwrap();

    // Primeira execução grava o snapshot em disco.
    {
        let triage = TriageService::new(
            Arc::new(store.clone()),
            Arc::new(FileCache::new(dir.path())),
        );
        let load = triage.load_pending(psicologo.id).await.unwrap();
        assert_eq!(load.origin, DataOrigin::Store);
        assert_eq!(load.requests.len(), 1);
    }

    // Nova execução com o store fora do ar ainda mostra a fila salva.
    store.set_offline(true);
    let triage = TriageService::new(
        Arc::new(store.clone()),
        Arc::new(FileCache::new(dir.path())),
    );
    let load = triage.load_pending(psicologo.id).await.unwrap();
    assert_eq!(load.origin, DataOrigin::StaleCache);
    assert_eq!(load.requests.len(), 1);
    assert_eq!(load.requests[0].patient_email, ana.email);
}
