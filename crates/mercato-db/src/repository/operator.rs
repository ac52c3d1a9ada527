//! # Operator Repository
//!
//! Credential storage for the single operator account. The password is
//! stored as an argon2 PHC string; hashing and verification live in
//! mercato-auth, this repository only moves the strings.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;

// =============================================================================
// Types
// =============================================================================

/// A stored operator account.
#[derive(Debug, Clone)]
pub struct Operator {
    pub id: String,
    pub email: String,
    /// Argon2 PHC string, never the plain password.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// An operator account as submitted for provisioning.
#[derive(Debug, Clone)]
pub struct NewOperator {
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, sqlx::FromRow)]
struct OperatorRow {
    id: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<OperatorRow> for Operator {
    fn from(row: OperatorRow) -> Self {
        Operator {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for operator accounts.
#[derive(Debug, Clone)]
pub struct OperatorRepository {
    pool: SqlitePool,
}

impl OperatorRepository {
    /// Creates a new OperatorRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OperatorRepository { pool }
    }

    /// Looks up an operator by email.
    ///
    /// ## Returns
    /// * `Ok(Some(Operator))` - Account found
    /// * `Ok(None)` - No account with this email
    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<Operator>> {
        let row = sqlx::query_as::<_, OperatorRow>(
            "SELECT id, email, password_hash, created_at FROM operators WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Operator::from))
    }

    /// Provisions an operator account.
    ///
    /// ## Returns
    /// * `Ok(Operator)` - Stored account
    /// * `Err(DbError::UniqueViolation)` - Email already in use
    pub async fn insert(&self, new_operator: NewOperator) -> DbResult<Operator> {
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now();

        debug!(id = %id, email = %new_operator.email, "Provisioning operator");

        sqlx::query(
            "INSERT INTO operators (id, email, password_hash, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&id)
        .bind(&new_operator.email)
        .bind(&new_operator.password_hash)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(Operator {
            id,
            email: new_operator.email,
            password_hash: new_operator.password_hash,
            created_at,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.operators();

        let inserted = repo
            .insert(NewOperator {
                email: "owner@shop.example".to_string(),
                password_hash: "$argon2id$stub".to_string(),
            })
            .await
            .unwrap();

        let found = repo
            .get_by_email("owner@shop.example")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, inserted.id);
        assert_eq!(found.password_hash, "$argon2id$stub");

        assert!(repo
            .get_by_email("nobody@shop.example")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.operators();

        let new_op = NewOperator {
            email: "owner@shop.example".to_string(),
            password_hash: "hash".to_string(),
        };
        repo.insert(new_op.clone()).await.unwrap();

        let err = repo.insert(new_op).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
