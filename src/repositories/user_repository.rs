// src/repositories/user_repository.rs
//
// User profile persistence. This is the directory the notification feed
// resolves names through.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{with_connection, ConnectionPool};
use crate::domain::user::{UserProfile, UserType};
use crate::error::AppResult;
use crate::repositories::mapping::{enum_column, timestamp_column, uuid_column};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save(&self, user: &UserProfile) -> AppResult<()>;
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<UserProfile>>;
    async fn get_by_email(&self, email: &str) -> AppResult<Option<UserProfile>>;
    async fn list_by_type(&self, user_type: UserType) -> AppResult<Vec<UserProfile>>;
}

pub struct SqliteUserRepository {
    pool: Arc<ConnectionPool>,
}

const USER_COLUMNS: &str = "id, full_name, email, user_type, created_at";

impl SqliteUserRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &Row) -> rusqlite::Result<UserProfile> {
        Ok(UserProfile {
            id: uuid_column(row, "id")?,
            full_name: row.get("full_name")?,
            email: row.get("email")?,
            user_type: enum_column(row, "user_type")?,
            created_at: timestamp_column(row, "created_at")?,
        })
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn save(&self, user: &UserProfile) -> AppResult<()> {
        let user = user.clone();
        with_connection(&self.pool, move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO users (id, full_name, email, user_type, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    user.id.to_string(),
                    user.full_name,
                    user.email,
                    user.user_type.as_str(),
                    user.created_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<UserProfile>> {
        with_connection(&self.pool, move |conn| {
            let sql = format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS);
            let user = conn
                .query_row(&sql, params![id.to_string()], Self::row_to_user)
                .optional()?;
            Ok(user)
        })
        .await
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<UserProfile>> {
        let email = email.trim().to_lowercase();
        with_connection(&self.pool, move |conn| {
            let sql = format!("SELECT {} FROM users WHERE lower(email) = ?1", USER_COLUMNS);
            let user = conn
                .query_row(&sql, params![email], Self::row_to_user)
                .optional()?;
            Ok(user)
        })
        .await
    }

    async fn list_by_type(&self, user_type: UserType) -> AppResult<Vec<UserProfile>> {
        with_connection(&self.pool, move |conn| {
            let sql = format!(
                "SELECT {} FROM users WHERE user_type = ?1 ORDER BY full_name",
                USER_COLUMNS
            );
            let mut stmt = conn.prepare(&sql)?;
            let users = stmt
                .query_map(params![user_type.as_str()], Self::row_to_user)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(users)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    fn repo() -> SqliteUserRepository {
        SqliteUserRepository::new(Arc::new(create_test_pool().unwrap()))
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let repo = repo();
        let user = UserProfile::new("Nina Costa".into(), "nina@example.com".into(), UserType::Walker);
        repo.save(&user).await.unwrap();

        let loaded = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(loaded.full_name, "Nina Costa");
        assert_eq!(loaded.user_type, UserType::Walker);
        assert_eq!(loaded.created_at.timestamp(), user.created_at.timestamp());
    }

    #[tokio::test]
    async fn test_missing_user_is_none() {
        let repo = repo();
        assert!(repo.get_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_by_email_is_case_insensitive() {
        let repo = repo();
        let user = UserProfile::new("Nina".into(), "Nina@Example.com".into(), UserType::DogOwner);
        repo.save(&user).await.unwrap();

        let loaded = repo.get_by_email(" nina@example.com ").await.unwrap();
        assert_eq!(loaded.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn test_list_by_type() {
        let repo = repo();
        repo.save(&UserProfile::new("Zed".into(), "z@example.com".into(), UserType::Walker)).await.unwrap();
        repo.save(&UserProfile::new("Amy".into(), "a@example.com".into(), UserType::Walker)).await.unwrap();
        repo.save(&UserProfile::new("Own".into(), "o@example.com".into(), UserType::DogOwner)).await.unwrap();

        let walkers = repo.list_by_type(UserType::Walker).await.unwrap();
        let names: Vec<_> = walkers.iter().map(|u| u.full_name.as_str()).collect();
        assert_eq!(names, vec!["Amy", "Zed"]);
    }
}
