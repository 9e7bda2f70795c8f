// src/middleware/actor.rs

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

// Identidade de quem chama, para o registro de auditoria. A autenticação em
// si fica fora deste serviço; aqui só lemos o cabeçalho que a borda injeta.
pub struct ActorIdentity(pub String);

impl ActorIdentity {
    pub const HEADER: &'static str = "x-user";
    const ANONYMOUS: &'static str = "anônimo";
}

impl<S> FromRequestParts<S> for ActorIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let actor = parts
            .headers
            .get(Self::HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .unwrap_or(Self::ANONYMOUS)
            .to_string();

        Ok(ActorIdentity(actor))
    }
}
