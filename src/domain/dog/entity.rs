use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dog registered by its owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dog {
    pub id: Uuid,

    /// Owning user (must be a dog owner)
    pub owner_id: Uuid,

    pub name: String,
    pub breed: String,
    pub age_years: u32,
    pub size: DogSize,

    /// Free text for the walker (temperament, leash habits, ...)
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DogSize {
    Small,
    Medium,
    Large,
}

impl Dog {
    pub fn new(owner_id: Uuid, name: String, breed: String, age_years: u32, size: DogSize) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name,
            breed,
            age_years,
            size,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Partial update; `None` leaves a field untouched
    pub fn update_details(
        &mut self,
        name: Option<String>,
        breed: Option<String>,
        age_years: Option<u32>,
        size: Option<DogSize>,
        notes: Option<Option<String>>,
    ) {
        if let Some(n) = name {
            self.name = n;
        }
        if let Some(b) = breed {
            self.breed = b;
        }
        if let Some(a) = age_years {
            self.age_years = a;
        }
        if let Some(s) = size {
            self.size = s;
        }
        if let Some(n) = notes {
            self.notes = n;
        }
        self.updated_at = Utc::now();
    }
}

impl std::fmt::Display for DogSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DogSize::Small => write!(f, "small"),
            DogSize::Medium => write!(f, "medium"),
            DogSize::Large => write!(f, "large"),
        }
    }
}

impl std::str::FromStr for DogSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(DogSize::Small),
            "medium" => Ok(DogSize::Medium),
            "large" => Ok(DogSize::Large),
            other => Err(format!("Unknown dog size '{}'", other)),
        }
    }
}
