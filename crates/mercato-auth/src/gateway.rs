//! # Auth Gateway
//!
//! Sign-in, sign-out, and session observation for the single operator.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         AuthGateway                                     │
//! │                                                                         │
//! │  sign_in(email, password)                                              │
//! │       │                                                                 │
//! │       ├── lookup operator by email ──── miss ──┐                       │
//! │       ├── verify argon2 hash ────────── fail ──┤                       │
//! │       │                                        ▼                       │
//! │       │                               AccessDenied (no detail)         │
//! │       ▼                                                                 │
//! │  Session { operator_id, email, signed_in_at }                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  watch::Sender<Option<Session>> ──► every subscriber sees the          │
//! │                                     current session immediately         │
//! │                                     and every change after              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use chrono::Utc;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::{AuthError, AuthResult};
use mercato_core::Session;
use mercato_db::{Database, NewOperator, Operator, OperatorRepository};

// =============================================================================
// Gateway
// =============================================================================

/// Authentication gateway for the single operator account.
///
/// Cloning shares the session channel: a sign-in through one clone is
/// visible to subscribers of every clone.
#[derive(Debug, Clone)]
pub struct AuthGateway {
    operators: OperatorRepository,
    session_tx: watch::Sender<Option<Session>>,
}

impl AuthGateway {
    /// Creates a gateway over an open database, with no active session.
    pub fn new(db: &Database) -> Self {
        let (session_tx, _) = watch::channel(None);
        AuthGateway {
            operators: db.operators(),
            session_tx,
        }
    }

    /// Verifies the operator's credentials and opens a session.
    ///
    /// Unknown email and wrong password both surface as the same
    /// `AccessDenied`; only infrastructure failures are distinguished.
    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<Session> {
        let operator = match self.operators.get_by_email(email).await? {
            Some(op) => op,
            None => {
                warn!("Sign-in rejected");
                return Err(AuthError::AccessDenied);
            }
        };

        if !verify_password(password, &operator.password_hash) {
            warn!("Sign-in rejected");
            return Err(AuthError::AccessDenied);
        }

        let session = Session {
            operator_id: operator.id,
            email: operator.email,
            signed_in_at: Utc::now(),
        };

        self.session_tx.send_replace(Some(session.clone()));
        info!(operator = %session.operator_id, "Operator signed in");
        Ok(session)
    }

    /// Clears the current session. Idempotent.
    pub fn sign_out(&self) {
        self.session_tx.send_replace(None);
        info!("Operator signed out");
    }

    /// Returns the current session, if any.
    pub fn current_session(&self) -> Option<Session> {
        self.session_tx.borrow().clone()
    }

    /// Subscribes to session changes.
    ///
    /// The receiver holds the current value at subscription time, so an
    /// observer attaching after sign-in still sees the live session.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.session_tx.subscribe()
    }

    /// Provisions an operator account with a freshly hashed password.
    pub async fn provision_operator(&self, email: &str, password: &str) -> AuthResult<Operator> {
        let password_hash = hash_password(password)?;
        let operator = self
            .operators
            .insert(NewOperator {
                email: email.to_string(),
                password_hash,
            })
            .await?;
        info!(operator = %operator.id, "Operator provisioned");
        Ok(operator)
    }
}

// =============================================================================
// Password Hashing
// =============================================================================

/// Verifies a plain password against a stored argon2 PHC string.
fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Hashes a password for storage.
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mercato_db::DbConfig;

    async fn gateway_with_operator() -> AuthGateway {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let gateway = AuthGateway::new(&db);
        gateway
            .provision_operator("owner@shop.example", "hunter2")
            .await
            .unwrap();
        gateway
    }

    #[tokio::test]
    async fn test_sign_in_with_valid_credentials() {
        let gateway = gateway_with_operator().await;

        let session = gateway
            .sign_in("owner@shop.example", "hunter2")
            .await
            .unwrap();
        assert_eq!(session.email, "owner@shop.example");
        assert_eq!(gateway.current_session().unwrap().email, session.email);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_identical() {
        let gateway = gateway_with_operator().await;

        let wrong_password = gateway
            .sign_in("owner@shop.example", "letmein")
            .await
            .unwrap_err();
        let unknown_email = gateway
            .sign_in("nobody@shop.example", "hunter2")
            .await
            .unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert!(matches!(wrong_password, AuthError::AccessDenied));
        assert!(gateway.current_session().is_none());
    }

    #[tokio::test]
    async fn test_subscribers_observe_sign_in_and_sign_out() {
        let gateway = gateway_with_operator().await;
        let mut rx = gateway.subscribe();

        assert!(rx.borrow().is_none());

        gateway
            .sign_in("owner@shop.example", "hunter2")
            .await
            .unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_some());

        gateway.sign_out();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_current_session() {
        let gateway = gateway_with_operator().await;
        gateway
            .sign_in("owner@shop.example", "hunter2")
            .await
            .unwrap();

        // Subscribing after sign-in still yields the live session.
        let rx = gateway.subscribe();
        assert!(rx.borrow().is_some());
    }

    #[tokio::test]
    async fn test_sign_out_is_idempotent() {
        let gateway = gateway_with_operator().await;
        gateway.sign_out();
        gateway.sign_out();
        assert!(gateway.current_session().is_none());
    }

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = hash_password("s3cret").unwrap();
        assert!(verify_password("s3cret", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("s3cret", "not-a-phc-string"));
    }
}
