// src/repositories/dog_repository.rs
//
// Dog profile persistence

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{with_connection, ConnectionPool};
use crate::domain::dog::Dog;
use crate::error::AppResult;
use crate::repositories::mapping::{enum_column, timestamp_column, uuid_column};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DogRepository: Send + Sync {
    async fn save(&self, dog: &Dog) -> AppResult<()>;
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Dog>>;
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Dog>>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct SqliteDogRepository {
    pool: Arc<ConnectionPool>,
}

const DOG_COLUMNS: &str =
    "id, owner_id, name, breed, age_years, size, notes, created_at, updated_at";

impl SqliteDogRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_dog(row: &Row) -> rusqlite::Result<Dog> {
        Ok(Dog {
            id: uuid_column(row, "id")?,
            owner_id: uuid_column(row, "owner_id")?,
            name: row.get("name")?,
            breed: row.get("breed")?,
            age_years: row.get::<_, i64>("age_years")? as u32,
            size: enum_column(row, "size")?,
            notes: row.get("notes")?,
            created_at: timestamp_column(row, "created_at")?,
            updated_at: timestamp_column(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl DogRepository for SqliteDogRepository {
    async fn save(&self, dog: &Dog) -> AppResult<()> {
        let dog = dog.clone();
        with_connection(&self.pool, move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO dogs (
                    id, owner_id, name, breed, age_years, size, notes, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    dog.id.to_string(),
                    dog.owner_id.to_string(),
                    dog.name,
                    dog.breed,
                    dog.age_years as i64,
                    dog.size.to_string(),
                    dog.notes,
                    dog.created_at.to_rfc3339(),
                    dog.updated_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Dog>> {
        with_connection(&self.pool, move |conn| {
            let sql = format!("SELECT {} FROM dogs WHERE id = ?1", DOG_COLUMNS);
            let dog = conn
                .query_row(&sql, params![id.to_string()], Self::row_to_dog)
                .optional()?;
            Ok(dog)
        })
        .await
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Dog>> {
        with_connection(&self.pool, move |conn| {
            let sql = format!(
                "SELECT {} FROM dogs WHERE owner_id = ?1 ORDER BY name COLLATE NOCASE",
                DOG_COLUMNS
            );
            let mut stmt = conn.prepare(&sql)?;
            let dogs = stmt
                .query_map(params![owner_id.to_string()], Self::row_to_dog)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(dogs)
        })
        .await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        with_connection(&self.pool, move |conn| {
            conn.execute("DELETE FROM dogs WHERE id = ?1", params![id.to_string()])?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use crate::domain::dog::DogSize;
    use crate::domain::user::{UserProfile, UserType};
    use crate::repositories::{SqliteUserRepository, UserRepository};

    async fn setup() -> (SqliteDogRepository, Uuid) {
        let pool = Arc::new(create_test_pool().unwrap());
        let owner = UserProfile::new("Olivia".into(), "olivia@example.com".into(), UserType::DogOwner);
        SqliteUserRepository::new(pool.clone()).save(&owner).await.unwrap();
        (SqliteDogRepository::new(pool), owner.id)
    }

    #[tokio::test]
    async fn test_save_list_delete() {
        let (repo, owner_id) = setup().await;
        let mut rex = Dog::new(owner_id, "rex".into(), "Beagle".into(), 3, DogSize::Medium);
        rex.notes = Some("Pulls on the leash".into());
        let bella = Dog::new(owner_id, "Bella".into(), "Poodle".into(), 7, DogSize::Small);
        repo.save(&rex).await.unwrap();
        repo.save(&bella).await.unwrap();

        let dogs = repo.list_by_owner(owner_id).await.unwrap();
        let names: Vec<_> = dogs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Bella", "rex"]);

        let loaded = repo.get_by_id(rex.id).await.unwrap().unwrap();
        assert_eq!(loaded.notes.as_deref(), Some("Pulls on the leash"));
        assert_eq!(loaded.size, DogSize::Medium);

        repo.delete(rex.id).await.unwrap();
        assert!(repo.get_by_id(rex.id).await.unwrap().is_none());
        assert_eq!(repo.list_by_owner(owner_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_dog_requires_existing_owner() {
        let (repo, _) = setup().await;
        let orphan = Dog::new(Uuid::new_v4(), "Ghost".into(), "Husky".into(), 2, DogSize::Large);
        assert!(repo.save(&orphan).await.is_err());
    }
}
