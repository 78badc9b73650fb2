// src/repositories/walk_application_repository.rs
//
// Walk application persistence

use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row, TransactionBehavior};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{with_connection, ConnectionPool};
use crate::domain::walk_application::{WalkApplication, WalkApplicationStatus};
use crate::domain::walk_request::{WalkRequest, WalkRequestStatus};
use crate::error::AppResult;
use crate::repositories::mapping::{enum_column, optional_timestamp_column, uuid_column};
use crate::repositories::walk_request_repository::update_walk_request_from;

/// Filter for `WalkApplicationRepository::query`; unset fields match everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkApplicationQuery {
    pub owner_id: Option<Uuid>,
    pub walker_id: Option<Uuid>,
    pub walk_request_id: Option<Uuid>,
    pub status: Option<WalkApplicationStatus>,
}

impl WalkApplicationQuery {
    pub fn by_owner(owner_id: Uuid) -> Self {
        Self { owner_id: Some(owner_id), ..Self::default() }
    }

    pub fn by_walker(walker_id: Uuid) -> Self {
        Self { walker_id: Some(walker_id), ..Self::default() }
    }

    pub fn by_request(walk_request_id: Uuid) -> Self {
        Self { walk_request_id: Some(walk_request_id), ..Self::default() }
    }

    pub fn with_status(mut self, status: WalkApplicationStatus) -> Self {
        self.status = Some(status);
        self
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalkApplicationRepository: Send + Sync {
    async fn save(&self, application: &WalkApplication) -> AppResult<()>;
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<WalkApplication>>;
    async fn query(&self, filter: WalkApplicationQuery) -> AppResult<Vec<WalkApplication>>;

    /// Insert a new application while its walk request is still pending.
    /// Returns false, writing nothing, when the request is missing or no
    /// longer pending. A second application by the same walker to the same
    /// request fails with a constraint violation.
    async fn create(&self, application: &WalkApplication) -> AppResult<bool>;

    /// Store the status of a just-decided application if the stored row is
    /// still pending. Returns false otherwise.
    async fn record_decision(&self, application: &WalkApplication) -> AppResult<bool>;

    /// In one write transaction: store `request` (now accepted) if it is
    /// still pending, mark `accepted` as accepted if it is still pending, and
    /// reject every other pending application to the request.
    ///
    /// Returns the number of rejected siblings, or None when either row was
    /// already decided by someone else (nothing is written then).
    async fn commit_acceptance(
        &self,
        accepted: WalkApplication,
        request: WalkRequest,
    ) -> AppResult<Option<usize>>;

    /// In one write transaction: store `request` (now cancelled) if it is
    /// still in `previous`, and reject its pending applications.
    ///
    /// Returns the number of rejected applications, or None when the request
    /// changed since it was read.
    async fn commit_cancellation(
        &self,
        request: WalkRequest,
        previous: WalkRequestStatus,
    ) -> AppResult<Option<usize>>;
}

pub struct SqliteWalkApplicationRepository {
    pool: Arc<ConnectionPool>,
}

const WALK_APPLICATION_COLUMNS: &str =
    "id, walk_request_id, owner_id, walker_id, message, status, created_at";

impl SqliteWalkApplicationRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_application(row: &Row) -> rusqlite::Result<WalkApplication> {
        Ok(WalkApplication {
            id: uuid_column(row, "id")?,
            walk_request_id: uuid_column(row, "walk_request_id")?,
            owner_id: uuid_column(row, "owner_id")?,
            walker_id: uuid_column(row, "walker_id")?,
            message: row.get("message")?,
            status: enum_column(row, "status")?,
            created_at: optional_timestamp_column(row, "created_at")?,
        })
    }
}

fn upsert_application(
    conn: &rusqlite::Connection,
    application: &WalkApplication,
) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO walk_applications (
            id, walk_request_id, owner_id, walker_id, message, status, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            application.id.to_string(),
            application.walk_request_id.to_string(),
            application.owner_id.to_string(),
            application.walker_id.to_string(),
            application.message,
            application.status.as_str(),
            application.created_at.map(|t| t.to_rfc3339()),
        ],
    )?;
    Ok(())
}

/// pending -> `status`, only if the application is still pending
fn decide_application(
    conn: &rusqlite::Connection,
    application: &WalkApplication,
) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "UPDATE walk_applications SET status = ?1 WHERE id = ?2 AND status = 'pending'",
        params![application.status.as_str(), application.id.to_string()],
    )?;
    Ok(changed == 1)
}

fn reject_pending_for_request(
    conn: &rusqlite::Connection,
    walk_request_id: Uuid,
    except: Option<Uuid>,
) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE walk_applications SET status = 'rejected'
         WHERE walk_request_id = ?1 AND status = 'pending' AND id IS NOT ?2",
        params![walk_request_id.to_string(), except.map(|id| id.to_string())],
    )
}

#[async_trait]
impl WalkApplicationRepository for SqliteWalkApplicationRepository {
    async fn save(&self, application: &WalkApplication) -> AppResult<()> {
        let application = application.clone();
        with_connection(&self.pool, move |conn| {
            upsert_application(conn, &application)?;
            Ok(())
        })
        .await
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<WalkApplication>> {
        with_connection(&self.pool, move |conn| {
            let sql = format!(
                "SELECT {} FROM walk_applications WHERE id = ?1",
                WALK_APPLICATION_COLUMNS
            );
            let application = conn
                .query_row(&sql, params![id.to_string()], Self::row_to_application)
                .optional()?;
            Ok(application)
        })
        .await
    }

    async fn query(&self, filter: WalkApplicationQuery) -> AppResult<Vec<WalkApplication>> {
        with_connection(&self.pool, move |conn| {
            let mut clauses: Vec<&str> = Vec::new();
            let mut values: Vec<Value> = Vec::new();

            if let Some(owner_id) = filter.owner_id {
                clauses.push("owner_id = ?");
                values.push(Value::Text(owner_id.to_string()));
            }
            if let Some(walker_id) = filter.walker_id {
                clauses.push("walker_id = ?");
                values.push(Value::Text(walker_id.to_string()));
            }
            if let Some(walk_request_id) = filter.walk_request_id {
                clauses.push("walk_request_id = ?");
                values.push(Value::Text(walk_request_id.to_string()));
            }
            if let Some(status) = filter.status {
                clauses.push("status = ?");
                values.push(Value::Text(status.as_str().to_string()));
            }

            let mut sql = format!("SELECT {} FROM walk_applications", WALK_APPLICATION_COLUMNS);
            if !clauses.is_empty() {
                sql.push_str(" WHERE ");
                sql.push_str(&clauses.join(" AND "));
            }
            // rowid keeps insertion order for rows without a timestamp
            sql.push_str(" ORDER BY created_at DESC, rowid ASC");

            let mut stmt = conn.prepare(&sql)?;
            let applications = stmt
                .query_map(params_from_iter(values), Self::row_to_application)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(applications)
        })
        .await
    }

    async fn create(&self, application: &WalkApplication) -> AppResult<bool> {
        let application = application.clone();
        with_connection(&self.pool, move |conn| {
            let inserted = conn.execute(
                "INSERT INTO walk_applications (
                    id, walk_request_id, owner_id, walker_id, message, status, created_at
                )
                SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7
                WHERE EXISTS (
                    SELECT 1 FROM walk_requests WHERE id = ?2 AND status = 'pending'
                )",
                params![
                    application.id.to_string(),
                    application.walk_request_id.to_string(),
                    application.owner_id.to_string(),
                    application.walker_id.to_string(),
                    application.message,
                    application.status.as_str(),
                    application.created_at.map(|t| t.to_rfc3339()),
                ],
            )?;
            Ok(inserted == 1)
        })
        .await
    }

    async fn record_decision(&self, application: &WalkApplication) -> AppResult<bool> {
        let application = application.clone();
        with_connection(&self.pool, move |conn| Ok(decide_application(conn, &application)?)).await
    }

    async fn commit_acceptance(
        &self,
        accepted: WalkApplication,
        request: WalkRequest,
    ) -> AppResult<Option<usize>> {
        with_connection(&self.pool, move |conn| {
            // IMMEDIATE takes the write lock before the first read
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            if !update_walk_request_from(&tx, &request, WalkRequestStatus::Pending)? {
                return Ok(None);
            }
            if !decide_application(&tx, &accepted)? {
                return Ok(None);
            }
            let rejected = reject_pending_for_request(&tx, request.id, Some(accepted.id))?;

            tx.commit()?;
            Ok(Some(rejected))
        })
        .await
    }

    async fn commit_cancellation(
        &self,
        request: WalkRequest,
        previous: WalkRequestStatus,
    ) -> AppResult<Option<usize>> {
        with_connection(&self.pool, move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            if !update_walk_request_from(&tx, &request, previous)? {
                return Ok(None);
            }
            let rejected = reject_pending_for_request(&tx, request.id, None)?;

            tx.commit()?;
            Ok(Some(rejected))
        })
        .await
    }
}
