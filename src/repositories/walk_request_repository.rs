// src/repositories/walk_request_repository.rs
//
// Walk request persistence

use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{with_connection, ConnectionPool};
use crate::domain::walk_request::{WalkRequest, WalkRequestStatus};
use crate::error::AppResult;
use crate::repositories::mapping::{
    enum_column, optional_uuid_column, timestamp_column, uuid_column,
};

/// Filter for `WalkRequestRepository::query`; unset fields match everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkRequestQuery {
    pub owner_id: Option<Uuid>,
    pub status: Option<WalkRequestStatus>,
}

impl WalkRequestQuery {
    pub fn by_owner(owner_id: Uuid) -> Self {
        Self { owner_id: Some(owner_id), ..Self::default() }
    }

    pub fn with_status(mut self, status: WalkRequestStatus) -> Self {
        self.status = Some(status);
        self
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalkRequestRepository: Send + Sync {
    async fn save(&self, request: &WalkRequest) -> AppResult<()>;
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<WalkRequest>>;
    async fn query(&self, filter: WalkRequestQuery) -> AppResult<Vec<WalkRequest>>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct SqliteWalkRequestRepository {
    pool: Arc<ConnectionPool>,
}

const WALK_REQUEST_COLUMNS: &str = "id, owner_id, dog_id, walker_id, scheduled_at, duration_minutes, \
     location, notes, status, created_at, updated_at";

impl SqliteWalkRequestRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_walk_request(row: &Row) -> rusqlite::Result<WalkRequest> {
        Ok(WalkRequest {
            id: uuid_column(row, "id")?,
            owner_id: uuid_column(row, "owner_id")?,
            dog_id: uuid_column(row, "dog_id")?,
            walker_id: optional_uuid_column(row, "walker_id")?,
            scheduled_at: timestamp_column(row, "scheduled_at")?,
            duration_minutes: row.get::<_, i64>("duration_minutes")? as u32,
            location: row.get("location")?,
            notes: row.get("notes")?,
            status: enum_column(row, "status")?,
            created_at: timestamp_column(row, "created_at")?,
            updated_at: timestamp_column(row, "updated_at")?,
        })
    }
}

fn upsert_walk_request(conn: &rusqlite::Connection, request: &WalkRequest) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO walk_requests (
            id, owner_id, dog_id, walker_id, scheduled_at, duration_minutes,
            location, notes, status, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            request.id.to_string(),
            request.owner_id.to_string(),
            request.dog_id.to_string(),
            request.walker_id.map(|w| w.to_string()),
            request.scheduled_at.to_rfc3339(),
            request.duration_minutes as i64,
            request.location,
            request.notes,
            request.status.as_str(),
            request.created_at.to_rfc3339(),
            request.updated_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Write the mutable columns of `request` only while the stored row is still
/// in `expected`. Returns false when the row is gone or has moved on.
pub(crate) fn update_walk_request_from(
    conn: &rusqlite::Connection,
    request: &WalkRequest,
    expected: WalkRequestStatus,
) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "UPDATE walk_requests
         SET walker_id = ?1, status = ?2, notes = ?3, updated_at = ?4
         WHERE id = ?5 AND status = ?6",
        params![
            request.walker_id.map(|w| w.to_string()),
            request.status.as_str(),
            request.notes,
            request.updated_at.to_rfc3339(),
            request.id.to_string(),
            expected.as_str(),
        ],
    )?;
    Ok(changed == 1)
}

#[async_trait]
impl WalkRequestRepository for SqliteWalkRequestRepository {
    async fn save(&self, request: &WalkRequest) -> AppResult<()> {
        let request = request.clone();
        with_connection(&self.pool, move |conn| {
            upsert_walk_request(conn, &request)?;
            Ok(())
        })
        .await
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<WalkRequest>> {
        with_connection(&self.pool, move |conn| {
            let sql = format!("SELECT {} FROM walk_requests WHERE id = ?1", WALK_REQUEST_COLUMNS);
            let request = conn
                .query_row(&sql, params![id.to_string()], Self::row_to_walk_request)
                .optional()?;
            Ok(request)
        })
        .await
    }

    async fn query(&self, filter: WalkRequestQuery) -> AppResult<Vec<WalkRequest>> {
        with_connection(&self.pool, move |conn| {
            let mut clauses: Vec<&str> = Vec::new();
            let mut values: Vec<Value> = Vec::new();

            if let Some(owner_id) = filter.owner_id {
                clauses.push("owner_id = ?");
                values.push(Value::Text(owner_id.to_string()));
            }
            if let Some(status) = filter.status {
                clauses.push("status = ?");
                values.push(Value::Text(status.as_str().to_string()));
            }

            let mut sql = format!("SELECT {} FROM walk_requests", WALK_REQUEST_COLUMNS);
            if !clauses.is_empty() {
                sql.push_str(" WHERE ");
                sql.push_str(&clauses.join(" AND "));
            }
            sql.push_str(" ORDER BY created_at DESC");

            let mut stmt = conn.prepare(&sql)?;
            let requests = stmt
                .query_map(params_from_iter(values), Self::row_to_walk_request)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(requests)
        })
        .await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        with_connection(&self.pool, move |conn| {
            conn.execute("DELETE FROM walk_requests WHERE id = ?1", params![id.to_string()])?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, get_connection};
    use chrono::{Duration, Utc};

    fn repo() -> (SqliteWalkRequestRepository, Arc<ConnectionPool>) {
        let pool = Arc::new(create_test_pool().unwrap());
        (SqliteWalkRequestRepository::new(pool.clone()), pool)
    }

    fn request(owner_id: Uuid) -> WalkRequest {
        WalkRequest::new(owner_id, Uuid::new_v4(), Utc::now() + Duration::hours(2), 30, "Park".into())
    }

    #[tokio::test]
    async fn test_save_and_get_round_trip() {
        let (repo, _) = repo();
        let mut r = request(Uuid::new_v4());
        r.notes = Some("Gate code 1234".into());
        repo.save(&r).await.unwrap();

        let loaded = repo.get_by_id(r.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, WalkRequestStatus::Pending);
        assert_eq!(loaded.walker_id, None);
        assert_eq!(loaded.notes.as_deref(), Some("Gate code 1234"));
    }

    #[tokio::test]
    async fn test_query_filters_by_owner_and_status() {
        let (repo, _) = repo();
        let owner = Uuid::new_v4();

        let pending = request(owner);
        let mut accepted = request(owner);
        accepted.select_walker(Uuid::new_v4()).unwrap();
        let other = request(Uuid::new_v4());

        for r in [&pending, &accepted, &other] {
            repo.save(r).await.unwrap();
        }

        let mine = repo.query(WalkRequestQuery::by_owner(owner)).await.unwrap();
        assert_eq!(mine.len(), 2);

        let mine_accepted = repo
            .query(WalkRequestQuery::by_owner(owner).with_status(WalkRequestStatus::Accepted))
            .await
            .unwrap();
        assert_eq!(mine_accepted.len(), 1);
        assert_eq!(mine_accepted[0].id, accepted.id);

        let all = repo.query(WalkRequestQuery::default()).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_walker_id_reads_as_none() {
        let (repo, pool) = repo();
        let r = request(Uuid::new_v4());
        repo.save(&r).await.unwrap();
        {
            let conn = get_connection(&pool).unwrap();
            conn.execute(
                "UPDATE walk_requests SET walker_id = '' WHERE id = ?1",
                params![r.id.to_string()],
            )
            .unwrap();
        }

        let loaded = repo.get_by_id(r.id).await.unwrap().unwrap();
        assert!(loaded.walker_id.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let (repo, _) = repo();
        let r = request(Uuid::new_v4());
        repo.save(&r).await.unwrap();
        repo.delete(r.id).await.unwrap();
        assert!(repo.get_by_id(r.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_conditional_update_only_from_expected_status() {
        let (repo, pool) = repo();
        let mut r = request(Uuid::new_v4());
        repo.save(&r).await.unwrap();
        r.select_walker(Uuid::new_v4()).unwrap();

        let conn = get_connection(&pool).unwrap();
        assert!(!update_walk_request_from(&conn, &r, WalkRequestStatus::Accepted).unwrap());
        assert!(update_walk_request_from(&conn, &r, WalkRequestStatus::Pending).unwrap());
        // a second writer holding the same stale read loses
        assert!(!update_walk_request_from(&conn, &r, WalkRequestStatus::Pending).unwrap());
    }
}
