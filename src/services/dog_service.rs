// src/services/dog_service.rs
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::dog::{validate_dog, Dog, DogSize};
use crate::domain::user::UserType;
use crate::error::{AppError, AppResult};
use crate::events::{DogAdded, DogRemoved, DogUpdated, EventBus};
use crate::repositories::{DogRepository, UserRepository};
use crate::services::user_service::UserService;

#[derive(Debug, Clone)]
pub struct AddDogRequest {
    pub owner_id: Uuid,
    pub name: String,
    pub breed: String,
    pub age_years: u32,
    pub size: DogSize,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateDogRequest {
    pub owner_id: Uuid,
    pub dog_id: Uuid,
    pub name: Option<String>,
    pub breed: Option<String>,
    pub age_years: Option<u32>,
    pub size: Option<DogSize>,
    pub notes: Option<Option<String>>,
}

pub struct DogService {
    dog_repo: Arc<dyn DogRepository>,
    user_repo: Arc<dyn UserRepository>,
    event_bus: Arc<EventBus>,
}

impl DogService {
    pub fn new(
        dog_repo: Arc<dyn DogRepository>,
        user_repo: Arc<dyn UserRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            dog_repo,
            user_repo,
            event_bus,
        }
    }

    pub async fn list_dogs(&self, owner_id: Uuid) -> AppResult<Vec<Dog>> {
        self.dog_repo.list_by_owner(owner_id).await
    }

    pub async fn add_dog(&self, request: AddDogRequest) -> AppResult<Dog> {
        UserService::require_role(self.user_repo.as_ref(), request.owner_id, UserType::DogOwner)
            .await?;

        let mut dog = Dog::new(
            request.owner_id,
            request.name.trim().to_string(),
            request.breed.trim().to_string(),
            request.age_years,
            request.size,
        );
        dog.notes = request.notes;

        validate_dog(&dog).map_err(AppError::Domain)?;
        self.dog_repo.save(&dog).await?;

        self.event_bus
            .emit(DogAdded::new(dog.id, dog.owner_id, dog.name.clone()));
        Ok(dog)
    }

    pub async fn update_dog(&self, request: UpdateDogRequest) -> AppResult<Dog> {
        let mut dog = self.owned_dog(request.owner_id, request.dog_id).await?;

        dog.update_details(
            request.name.map(|n| n.trim().to_string()),
            request.breed,
            request.age_years,
            request.size,
            request.notes,
        );

        validate_dog(&dog).map_err(AppError::Domain)?;
        self.dog_repo.save(&dog).await?;

        self.event_bus.emit(DogUpdated::new(dog.id));
        Ok(dog)
    }

    pub async fn delete_dog(&self, owner_id: Uuid, dog_id: Uuid) -> AppResult<()> {
        let dog = self.owned_dog(owner_id, dog_id).await?;
        self.dog_repo.delete(dog.id).await?;

        self.event_bus.emit(DogRemoved::new(dog.id, owner_id));
        Ok(())
    }

    /// Fetch a dog, insisting that `owner_id` owns it
    pub(crate) async fn owned_dog(&self, owner_id: Uuid, dog_id: Uuid) -> AppResult<Dog> {
        let dog = self.dog_repo.get_by_id(dog_id).await?.ok_or(AppError::NotFound)?;
        if dog.owner_id != owner_id {
            return Err(AppError::Forbidden(format!(
                "Dog {} does not belong to user {}",
                dog_id, owner_id
            )));
        }
        Ok(dog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use crate::domain::user::UserProfile;
    use crate::repositories::{SqliteDogRepository, SqliteUserRepository};

    struct Fixture {
        service: DogService,
        owner: UserProfile,
        walker: UserProfile,
        bus: Arc<EventBus>,
    }

    async fn fixture() -> Fixture {
        let pool = Arc::new(create_test_pool().unwrap());
        let users = Arc::new(SqliteUserRepository::new(pool.clone()));
        let owner = UserProfile::new("Owen".into(), "owen@example.com".into(), UserType::DogOwner);
        let walker = UserProfile::new("Wes".into(), "wes@example.com".into(), UserType::Walker);
        users.save(&owner).await.unwrap();
        users.save(&walker).await.unwrap();

        let bus = Arc::new(EventBus::new());
        let service = DogService::new(Arc::new(SqliteDogRepository::new(pool)), users, bus.clone());
        Fixture { service, owner, walker, bus }
    }

    fn add(owner_id: Uuid, name: &str) -> AddDogRequest {
        AddDogRequest {
            owner_id,
            name: name.to_string(),
            breed: "Labrador".to_string(),
            age_years: 5,
            size: DogSize::Large,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_add_list_update_delete() {
        let f = fixture().await;
        let dog = f.service.add_dog(add(f.owner.id, "Max")).await.unwrap();
        assert_eq!(f.service.list_dogs(f.owner.id).await.unwrap().len(), 1);

        let updated = f
            .service
            .update_dog(UpdateDogRequest {
                owner_id: f.owner.id,
                dog_id: dog.id,
                name: Some("Maximus".into()),
                breed: None,
                age_years: Some(6),
                size: None,
                notes: Some(Some("Loves water".into())),
            })
            .await
            .unwrap();
        assert_eq!(updated.name, "Maximus");
        assert_eq!(updated.age_years, 6);
        assert_eq!(updated.breed, "Labrador");

        f.service.delete_dog(f.owner.id, dog.id).await.unwrap();
        assert!(f.service.list_dogs(f.owner.id).await.unwrap().is_empty());

        let types: Vec<_> = f.bus.get_event_log().into_iter().map(|e| e.event_type).collect();
        assert_eq!(types, vec!["DogAdded", "DogUpdated", "DogRemoved"]);
    }

    #[tokio::test]
    async fn test_walkers_cannot_add_dogs() {
        let f = fixture().await;
        let err = f.service.add_dog(add(f.walker.id, "Max")).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_only_owner_can_edit_or_delete() {
        let f = fixture().await;
        let dog = f.service.add_dog(add(f.owner.id, "Max")).await.unwrap();

        let err = f.service.delete_dog(f.walker.id, dog.id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let err = f.service.delete_dog(f.owner.id, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn test_invalid_update_is_not_saved() {
        let f = fixture().await;
        let dog = f.service.add_dog(add(f.owner.id, "Max")).await.unwrap();

        let result = f
            .service
            .update_dog(UpdateDogRequest {
                owner_id: f.owner.id,
                dog_id: dog.id,
                name: Some("   ".into()),
                breed: None,
                age_years: None,
                size: None,
                notes: None,
            })
            .await;
        assert!(result.is_err());

        let dogs = f.service.list_dogs(f.owner.id).await.unwrap();
        assert_eq!(dogs[0].name, "Max");
    }
}
