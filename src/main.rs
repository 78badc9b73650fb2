// src/main.rs

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use pawpal::application::commands::*;
use pawpal::application::dto::{AddDogDto, PostWalkRequestDto, RegisterUserDto};
use pawpal::application::state::AppState;
use pawpal::config::AppConfig;
use pawpal::db::{
    create_connection_pool, get_connection, initialize_database, verify_database_integrity,
};
use pawpal::events::{ApplicationAccepted, EventBus, WalkRequestCancelled, WalkRequestDeleted};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    // 1. INFRASTRUCTURE
    let config = AppConfig::load(cli.database.clone())?;
    let pool = Arc::new(create_connection_pool(&config)?);
    {
        // Schema setup is idempotent
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
    }

    // 2. EVENTS
    let event_bus = Arc::new(EventBus::new());
    register_log_handlers(&event_bus);

    // 3. APPLICATION STATE
    let state = AppState::new(pool.clone(), event_bus);

    match cli.command {
        Commands::Init => {
            let conn = get_connection(&pool)?;
            verify_database_integrity(&conn)?;
            println!("Database ready at {}", config.database_path.display());
            Ok(())
        }

        Commands::RegisterUser { name, email, user_type } => {
            let dto = RegisterUserDto { full_name: name, email, user_type };
            print_json(register_user(dto, &state).await)
        }
        Commands::ListUsers { user_type } => print_json(list_users(&user_type, &state).await),

        Commands::AddDog { owner, name, breed, age, size, notes } => {
            let dto = AddDogDto {
                owner_id: owner,
                name,
                breed,
                age_years: age,
                size,
                notes,
            };
            print_json(add_dog(dto, &state).await)
        }
        Commands::UpdateDog { owner, dog, name, age, size } => {
            print_json(update_dog(&owner, &dog, name, age, size, &state).await)
        }
        Commands::DeleteDog { owner, dog } => print_json(delete_dog(&owner, &dog, &state).await),
        Commands::ListDogs { owner } => print_json(list_dogs(&owner, &state).await),

        Commands::PostWalk { owner, dog, at, minutes, location, notes } => {
            let dto = PostWalkRequestDto {
                owner_id: owner,
                dog_id: dog,
                scheduled_at: at,
                duration_minutes: minutes,
                location,
                notes,
            };
            print_json(post_walk_request(dto, &state).await)
        }
        Commands::ListOpen => print_json(list_open_walk_requests(&state).await),
        Commands::ListWalks { owner } => print_json(list_owner_walk_requests(&owner, &state).await),
        Commands::Cancel { owner, request } => {
            print_json(cancel_walk_request(&owner, &request, &state).await)
        }
        Commands::DeleteWalk { owner, request } => {
            print_json(delete_walk_request(&owner, &request, &state).await)
        }
        Commands::Complete { owner, request } => {
            print_json(complete_walk_request(&owner, &request, &state).await)
        }

        Commands::Apply { walker, request, message } => {
            print_json(apply_for_walk(&walker, &request, message, &state).await)
        }
        Commands::Accept { owner, application } => {
            print_json(accept_application(&owner, &application, &state).await)
        }
        Commands::Reject { owner, application } => {
            print_json(reject_application(&owner, &application, &state).await)
        }
        Commands::ListApplications { request, walker } => match (request, walker) {
            (Some(request), _) => print_json(list_request_applications(&request, &state).await),
            (None, Some(walker)) => print_json(list_walker_applications(&walker, &state).await),
            (None, None) => anyhow::bail!("either --request or --walker is required"),
        },

        Commands::Notifications { user } => print_json(list_notifications(&user, &state).await),
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn register_log_handlers(event_bus: &EventBus) {
    event_bus.subscribe::<ApplicationAccepted, _>(|event| {
        log::info!(
            "Walker {} selected for walk request {}",
            event.walker_id,
            event.walk_request_id
        );
    });
    event_bus.subscribe::<WalkRequestCancelled, _>(|event| {
        log::info!(
            "Walk request {} cancelled, {} applications closed",
            event.walk_request_id,
            event.rejected_applications
        );
    });
    event_bus.subscribe::<WalkRequestDeleted, _>(|event| {
        log::info!("Walk request {} deleted", event.walk_request_id);
    });
}

/// Print a command's result as JSON; command errors are already JSON
fn print_json<T: Serialize>(result: Result<T, String>) -> Result<()> {
    match result {
        Ok(value) => {
            let json = serde_json::to_string_pretty(&value).context("Failed to encode output")?;
            println!("{}", json);
            Ok(())
        }
        Err(error_json) => {
            eprintln!("{}", error_json);
            std::process::exit(1);
        }
    }
}
