//! Token check for the admin's HTML form submissions.
//!
//! Every form renders the token as a hidden `csrf_token` field; handlers that
//! accept those forms extract them through [`VerifiedForm`], which answers 403
//! before the handler runs when the token is absent or wrong. The JSON order
//! endpoints do not go through this check.

use std::fmt;

use axum::{
    extract::{Form, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::application::error::HttpError;

use super::AdminState;

const SOURCE: &str = "infra::http::admin::csrf";

pub struct CsrfGuard {
    token: String,
}

impl CsrfGuard {
    /// Derive the token as hex(SHA-256(secret ‖ owner)).
    pub fn new(secret: &str, owner: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(secret.as_bytes());
        hasher.update(owner.as_bytes());
        Self {
            token: hex::encode(hasher.finalize()),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn verify(&self, candidate: &str) -> bool {
        self.token.as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}

impl fmt::Debug for CsrfGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsrfGuard").finish_non_exhaustive()
    }
}

/// Forms that carry the CSRF token.
pub(crate) trait CsrfProtected {
    fn csrf_token(&self) -> &str;
}

/// A urlencoded form whose CSRF token has been checked.
pub(crate) struct VerifiedForm<T>(pub T);

impl<T> FromRequest<AdminState> for VerifiedForm<T>
where
    T: DeserializeOwned + CsrfProtected + Send,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &AdminState) -> Result<Self, Self::Rejection> {
        let path = req.uri().path().to_string();
        let Form(form) = Form::<T>::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        if !state.csrf.verify(form.csrf_token()) {
            warn!(
                target = "lectern::http::admin::csrf",
                path = %path,
                "rejected form submission with a missing or invalid csrf token"
            );
            return Err(HttpError::new(
                SOURCE,
                StatusCode::FORBIDDEN,
                "CSRF verification failed",
                "csrf token missing or invalid",
            )
            .into_response());
        }

        Ok(Self(form))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_stable_per_secret_and_owner() {
        let first = CsrfGuard::new("a-long-enough-secret", "alice");
        let again = CsrfGuard::new("a-long-enough-secret", "alice");
        let other = CsrfGuard::new("a-long-enough-secret", "bob");

        assert_eq!(first.token(), again.token());
        assert_ne!(first.token(), other.token());
        assert_eq!(first.token().len(), 64);
    }

    #[test]
    fn verify_rejects_wrong_and_empty_tokens() {
        let guard = CsrfGuard::new("a-long-enough-secret", "alice");
        let token = guard.token().to_string();

        assert!(guard.verify(&token));
        assert!(!guard.verify(""));
        assert!(!guard.verify(&token[..32]));
        assert!(!guard.verify(&token.to_uppercase()));
    }
}
