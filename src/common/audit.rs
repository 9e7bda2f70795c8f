// src/common/audit.rs

// Registro de auditoria: quem fez o quê. É um canal lateral, chamado pelos
// handlers depois que a operação foi confirmada no banco; uma falha aqui
// nunca desfaz a operação principal.
#[derive(Clone, Default)]
pub struct AuditNotifier;

impl AuditNotifier {
    pub fn new() -> Self {
        Self
    }

    pub fn record(&self, actor: &str, message: &str) {
        tracing::info!(target: "audit", ator = %actor, "{}", message);
    }
}
