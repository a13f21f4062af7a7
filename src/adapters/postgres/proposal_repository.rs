//! PostgreSQL implementation of ProposalRepository.
//!
//! Status is stored as its single-letter code (`D S A R C`).

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    DomainError, ErrorCode, HistoryEntryId, ProposalId, Timestamp, UserId,
};
use crate::domain::proposal::{DutyTerms, Proposal, ProposalHistory, ProposalStatus};
use crate::ports::ProposalRepository;

const PROPOSAL_COLUMNS: &str = "id, status, sender_id, receiver_id, sender_duties, \
     receiver_duties, created_at, updated_at, verified_at";

/// PostgreSQL implementation of ProposalRepository.
#[derive(Clone)]
pub struct PostgresProposalRepository {
    pool: PgPool,
}

impl PostgresProposalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProposalRepository for PostgresProposalRepository {
    async fn save(&self, proposal: &Proposal) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO proposals (
                id, status, sender_id, receiver_id, sender_duties, receiver_duties,
                created_at, updated_at, verified_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(proposal.id().as_uuid())
        .bind(proposal.status().code())
        .bind(proposal.sender().as_str())
        .bind(proposal.receiver().as_str())
        .bind(proposal.sender_duties())
        .bind(proposal.receiver_duties())
        .bind(proposal.created_at().as_datetime())
        .bind(proposal.updated_at().as_datetime())
        .bind(proposal.verified_at().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert proposal", e))?;

        Ok(())
    }

    async fn update(&self, proposal: &Proposal) -> Result<(), DomainError> {
        update_row(&self.pool, proposal).await
    }

    async fn find_by_id(&self, id: &ProposalId) -> Result<Option<Proposal>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM proposals WHERE id = $1",
            PROPOSAL_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch proposal", e))?;

        row.map(row_to_proposal).transpose()
    }

    async fn find_for_party(&self, user_id: &UserId) -> Result<Vec<Proposal>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM proposals \
             WHERE sender_id = $1 OR receiver_id = $1 \
             ORDER BY created_at DESC",
            PROPOSAL_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch proposals by party", e))?;

        rows.into_iter().map(row_to_proposal).collect()
    }

    async fn find_awaiting_verification(&self) -> Result<Vec<Proposal>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM proposals \
             WHERE status = 'A' AND verified_at IS NULL \
             ORDER BY updated_at ASC",
            PROPOSAL_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch proposals awaiting verification", e))?;

        rows.into_iter().map(row_to_proposal).collect()
    }

    async fn update_with_history(
        &self,
        proposal: &Proposal,
        entry: &ProposalHistory,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        // Dropping `tx` on an early return rolls both writes back.
        update_row(&mut *tx, proposal).await?;

        sqlx::query(
            r#"
            INSERT INTO proposal_history (
                id, proposal_id, sender_duties, receiver_duties, created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(entry.id().as_uuid())
        .bind(entry.proposal_id().as_uuid())
        .bind(entry.sender_duties())
        .bind(entry.receiver_duties())
        .bind(entry.created_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to insert proposal history", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))?;

        Ok(())
    }

    async fn history_for(&self, id: &ProposalId) -> Result<Vec<ProposalHistory>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, proposal_id, sender_duties, receiver_duties, created_at
            FROM proposal_history
            WHERE proposal_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch proposal history", e))?;

        rows.into_iter().map(row_to_history).collect()
    }

    async fn delete(&self, id: &ProposalId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM proposals WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete proposal", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

async fn update_row<'e, E>(executor: E, proposal: &Proposal) -> Result<(), DomainError>
where
    E: sqlx::PgExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        UPDATE proposals SET
            status = $2,
            sender_duties = $3,
            receiver_duties = $4,
            updated_at = $5,
            verified_at = $6
        WHERE id = $1
        "#,
    )
    .bind(proposal.id().as_uuid())
    .bind(proposal.status().code())
    .bind(proposal.sender_duties())
    .bind(proposal.receiver_duties())
    .bind(proposal.updated_at().as_datetime())
    .bind(proposal.verified_at().map(|t| *t.as_datetime()))
    .execute(executor)
    .await
    .map_err(|e| db_error("Failed to update proposal", e))?;

    if result.rows_affected() == 0 {
        return Err(not_found(proposal.id()));
    }

    Ok(())
}

fn db_error(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

fn not_found(id: &ProposalId) -> DomainError {
    DomainError::new(
        ErrorCode::ProposalNotFound,
        format!("Proposal not found: {}", id),
    )
}

fn str_to_status(code: &str) -> Result<ProposalStatus, DomainError> {
    ProposalStatus::from_code(code.trim()).map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid proposal status: {}", code),
        )
    })
}

fn get<'r, T>(row: &'r sqlx::postgres::PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| db_error(&format!("Failed to get {}", column), e))
}

fn user_id(raw: String) -> Result<UserId, DomainError> {
    UserId::new(raw).map_err(|e| db_error("Invalid user id", e))
}

fn row_to_proposal(row: sqlx::postgres::PgRow) -> Result<Proposal, DomainError> {
    let id: uuid::Uuid = get(&row, "id")?;
    let status: String = get(&row, "status")?;
    let sender: String = get(&row, "sender_id")?;
    let receiver: String = get(&row, "receiver_id")?;
    let sender_duties: String = get(&row, "sender_duties")?;
    let receiver_duties: String = get(&row, "receiver_duties")?;
    let created_at: chrono::DateTime<chrono::Utc> = get(&row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = get(&row, "updated_at")?;
    let verified_at: Option<chrono::DateTime<chrono::Utc>> = get(&row, "verified_at")?;

    Ok(Proposal::reconstitute(
        ProposalId::from_uuid(id),
        str_to_status(&status)?,
        user_id(sender)?,
        user_id(receiver)?,
        DutyTerms::reconstitute(sender_duties, receiver_duties),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
        verified_at.map(Timestamp::from_datetime),
    ))
}

fn row_to_history(row: sqlx::postgres::PgRow) -> Result<ProposalHistory, DomainError> {
    let id: uuid::Uuid = get(&row, "id")?;
    let proposal_id: uuid::Uuid = get(&row, "proposal_id")?;
    let sender_duties: String = get(&row, "sender_duties")?;
    let receiver_duties: String = get(&row, "receiver_duties")?;
    let created_at: chrono::DateTime<chrono::Utc> = get(&row, "created_at")?;

    Ok(ProposalHistory::reconstitute(
        HistoryEntryId::from_uuid(id),
        ProposalId::from_uuid(proposal_id),
        DutyTerms::reconstitute(sender_duties, receiver_duties),
        Timestamp::from_datetime(created_at),
    ))
}
