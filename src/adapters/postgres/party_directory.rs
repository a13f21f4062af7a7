//! PostgreSQL implementation of PartyDirectory.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::party::{PartyKind, PartyProfile};
use crate::ports::PartyDirectory;

#[derive(Clone)]
pub struct PostgresPartyDirectory {
    pool: PgPool,
}

impl PostgresPartyDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PartyDirectory for PostgresPartyDirectory {
    async fn find(&self, user_id: &UserId) -> Result<Option<PartyProfile>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, email, first_name, last_name, kind, business_name
            FROM parties
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch party: {}", e),
            )
        })?;

        row.map(row_to_profile).transpose()
    }

    async fn upsert(&self, profile: &PartyProfile) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO parties (user_id, email, first_name, last_name, kind, business_name)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id) DO UPDATE SET
                email = EXCLUDED.email,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                kind = EXCLUDED.kind,
                business_name = EXCLUDED.business_name
            "#,
        )
        .bind(profile.user_id.as_str())
        .bind(&profile.email)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(profile.kind.as_str())
        .bind(profile.business_name.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to upsert party: {}", e),
            )
        })?;

        Ok(())
    }
}

fn row_to_profile(row: sqlx::postgres::PgRow) -> Result<PartyProfile, DomainError> {
    let column_error = |column: &str, e: sqlx::Error| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", column, e),
        )
    };

    let user_id: String = row
        .try_get("user_id")
        .map_err(|e| column_error("user_id", e))?;
    let email: String = row.try_get("email").map_err(|e| column_error("email", e))?;
    let first_name: String = row
        .try_get("first_name")
        .map_err(|e| column_error("first_name", e))?;
    let last_name: String = row
        .try_get("last_name")
        .map_err(|e| column_error("last_name", e))?;
    let kind: String = row.try_get("kind").map_err(|e| column_error("kind", e))?;
    let business_name: Option<String> = row
        .try_get("business_name")
        .map_err(|e| column_error("business_name", e))?;

    Ok(PartyProfile {
        user_id: UserId::new(user_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
        })?,
        email,
        first_name,
        last_name,
        kind: PartyKind::parse(&kind).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid party kind: {}", e))
        })?,
        business_name,
    })
}
