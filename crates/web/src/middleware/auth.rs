use std::collections::HashMap;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use thiserror::Error;

use crate::error::WebError;
use crate::state::SharedIdentityProvider;

/// The authenticated caller. Every stored calculation belongs to one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing bearer credentials")]
    MissingCredentials,
    #[error("unknown API key")]
    InvalidCredentials,
}

/// Resolves bearer credentials into an identity.
pub trait IdentityProvider: Send + Sync {
    fn authenticate(&self, credentials: &str) -> Result<Identity, AuthError>;
}

/// Static API keys, each bound to a user id.
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    keys: HashMap<String, String>,
}

impl ApiKeys {
    /// Parses `key=user` pairs. A bare `key` acts as its own user id.
    pub fn from_comma_separated(keys_str: &str) -> Self {
        let keys = keys_str
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|entry| match entry.split_once('=') {
                Some((key, user)) => (key.trim().to_string(), user.trim().to_string()),
                None => (entry.to_string(), entry.to_string()),
            })
            .filter(|(key, user)| !key.is_empty() && !user.is_empty())
            .collect();

        Self { keys }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl IdentityProvider for ApiKeys {
    fn authenticate(&self, credentials: &str) -> Result<Identity, AuthError> {
        if credentials.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        self.keys
            .get(credentials)
            .map(|user_id| Identity {
                user_id: user_id.clone(),
            })
            .ok_or(AuthError::InvalidCredentials)
    }
}

fn bearer_token(request: &Request) -> &str {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .unwrap_or_default()
}

/// Rejects requests without a valid bearer key and attaches the caller's
/// `Identity` for the handlers.
pub async fn require_auth(
    State(provider): State<SharedIdentityProvider>,
    mut request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let outcome = provider.authenticate(bearer_token(&request));
    match outcome {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            Ok(next.run(request).await)
        }
        Err(AuthError::MissingCredentials) => {
            tracing::debug!("Request without credentials");
            Err(WebError::Unauthorized)
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("Invalid API key attempt");
            Err(WebError::Unauthorized)
        }
    }
}
