// src/application/commands/dog_commands.rs

use crate::application::commands::{parse_enum, parse_id};
use crate::application::dto::*;
use crate::application::error_handling::ToErrorResponse;
use crate::application::state::AppState;
use crate::domain::DogSize;
use crate::services::{AddDogRequest, UpdateDogRequest};

pub async fn list_dogs(owner_id: &str, state: &AppState) -> Result<Vec<DogDto>, String> {
    let owner_id = parse_id("owner id", owner_id)?;

    let dogs = state
        .dog_service
        .list_dogs(owner_id)
        .await
        .to_error_response()?;

    Ok(dogs.into_iter().map(DogDto::from).collect())
}

pub async fn add_dog(dto: AddDogDto, state: &AppState) -> Result<DogDto, String> {
    let owner_id = parse_id("owner id", &dto.owner_id)?;
    let size: DogSize = parse_enum("dog size", &dto.size)?;

    let dog = state
        .dog_service
        .add_dog(AddDogRequest {
            owner_id,
            name: dto.name,
            breed: dto.breed,
            age_years: dto.age_years,
            size,
            notes: dto.notes,
        })
        .await
        .to_error_response()?;

    Ok(DogDto::from(dog))
}

/// Rename a dog or change its age/size; unset fields stay as they are
pub async fn update_dog(
    owner_id: &str,
    dog_id: &str,
    name: Option<String>,
    age_years: Option<u32>,
    size: Option<String>,
    state: &AppState,
) -> Result<DogDto, String> {
    let owner_id = parse_id("owner id", owner_id)?;
    let dog_id = parse_id("dog id", dog_id)?;
    let size = size
        .map(|s| parse_enum::<DogSize>("dog size", &s))
        .transpose()?;

    let dog = state
        .dog_service
        .update_dog(UpdateDogRequest {
            owner_id,
            dog_id,
            name,
            breed: None,
            age_years,
            size,
            notes: None,
        })
        .await
        .to_error_response()?;

    Ok(DogDto::from(dog))
}

pub async fn delete_dog(owner_id: &str, dog_id: &str, state: &AppState) -> Result<(), String> {
    let owner_id = parse_id("owner id", owner_id)?;
    let dog_id = parse_id("dog id", dog_id)?;

    state
        .dog_service
        .delete_dog(owner_id, dog_id)
        .await
        .to_error_response()
}
