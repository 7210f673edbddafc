use std::sync::Mutex;

use tokio::sync::oneshot;

use crate::common::error::AppError;

/// Portão de confirmação: o equivalente do diálogo "Sim / Cancelar".
///
/// Quem abre o portão recebe uma continuação de resultado único (`Decision`)
/// e aguarda a resposta. A interface enxerga o prompt pendente via
/// `message()` e o resolve com `confirm()` ou `cancel()`. Exatamente um
/// desfecho por abertura; o portão some assim que um deles dispara. Uma
/// continuação descartada vale como cancelamento e libera o portão. Nenhuma
/// regra de negócio mora aqui.
pub struct ConfirmationGate {
    pending: Mutex<Option<PendingPrompt>>,
}

struct PendingPrompt {
    message: String,
    outcome: oneshot::Sender<bool>,
}

/// Continuação devolvida por `open`: `resolved().await` entrega a decisão.
pub struct Decision {
    rx: oneshot::Receiver<bool>,
}

impl Decision {
    // Se o portão for derrubado sem resposta, tratamos como cancelamento.
    pub async fn resolved(self) -> bool {
        self.rx.await.unwrap_or(false)
    }
}

impl ConfirmationGate {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(None),
        }
    }

    // Abre o portão com a mensagem fornecida pelo chamador. Só um prompt
    // por vez: abrir com outro pendente é recusado.
    pub fn open(&self, message: impl Into<String>) -> Result<Decision, AppError> {
        let mut pending = self.pending.lock().unwrap();
        Self::clear_dangling(&mut pending);
        if pending.is_some() {
            return Err(AppError::GatePending);
        }

        let (tx, rx) = oneshot::channel();
        *pending = Some(PendingPrompt {
            message: message.into(),
            outcome: tx,
        });
        Ok(Decision { rx })
    }

    // A mensagem visível enquanto o portão está aberto.
    pub fn message(&self) -> Option<String> {
        let mut pending = self.pending.lock().unwrap();
        Self::clear_dangling(&mut pending);
        pending.as_ref().map(|p| p.message.clone())
    }

    pub fn is_open(&self) -> bool {
        let mut pending = self.pending.lock().unwrap();
        Self::clear_dangling(&mut pending);
        pending.is_some()
    }

    // "Sim": resolve o prompt pendente. Retorna false se não havia prompt.
    pub fn confirm(&self) -> bool {
        self.resolve(true)
    }

    // "Cancelar": resolve o prompt pendente. Retorna false se não havia prompt.
    pub fn cancel(&self) -> bool {
        self.resolve(false)
    }

    fn resolve(&self, answer: bool) -> bool {
        let mut pending = self.pending.lock().unwrap();
        Self::clear_dangling(&mut pending);
        match pending.take() {
            Some(p) => {
                let _ = p.outcome.send(answer);
                true
            }
            None => false,
        }
    }

    // Um prompt cuja continuação foi descartada nunca será respondido;
    // some como se tivesse sido cancelado.
    fn clear_dangling(pending: &mut Option<PendingPrompt>) {
        if pending.as_ref().is_some_and(|p| p.outcome.is_closed()) {
            *pending = None;
        }
    }
}

impl Default for ConfirmationGate {
    fn default() -> Self {
        Self::new()
    }
}
