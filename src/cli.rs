// src/cli.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// PawPal - dog walking marketplace backend
#[derive(Parser)]
#[command(name = "pawpal")]
#[command(about = "Manage dogs, walk requests and applications, and read notification feeds")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// SQLite database file (defaults to $PAWPAL_DATABASE, then the app data dir)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database and apply the schema
    Init,

    /// Register a dog owner or walker
    RegisterUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// dogOwner or walker
        #[arg(long = "type")]
        user_type: String,
    },

    /// List users of one type
    ListUsers {
        /// dogOwner or walker
        #[arg(long = "type")]
        user_type: String,
    },

    /// Add a dog to an owner's profile
    AddDog {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        breed: String,
        #[arg(long)]
        age: u32,
        /// small, medium or large
        #[arg(long)]
        size: String,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Edit a dog's name, age or size
    UpdateDog {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        dog: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        size: Option<String>,
    },

    /// Remove a dog
    DeleteDog {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        dog: String,
    },

    /// List an owner's dogs
    ListDogs {
        #[arg(long)]
        owner: String,
    },

    /// Post a walk request for one of the owner's dogs
    PostWalk {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        dog: String,
        /// RFC 3339 time, e.g. 2030-06-01T09:00:00Z
        #[arg(long)]
        at: String,
        #[arg(long, default_value_t = 30)]
        minutes: u32,
        #[arg(long)]
        location: String,
        #[arg(long)]
        notes: Option<String>,
    },

    /// List pending walk requests, soonest first
    ListOpen,

    /// List an owner's walk requests, newest first
    ListWalks {
        #[arg(long)]
        owner: String,
    },

    /// Apply to a walk request as a walker
    Apply {
        #[arg(long)]
        walker: String,
        #[arg(long)]
        request: String,
        #[arg(long)]
        message: Option<String>,
    },

    /// Accept an application, selecting its walker
    Accept {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        application: String,
    },

    /// Reject an application
    Reject {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        application: String,
    },

    /// List applications for a walk request, or sent by a walker
    ListApplications {
        #[arg(long, conflicts_with = "walker", required_unless_present = "walker")]
        request: Option<String>,
        #[arg(long)]
        walker: Option<String>,
    },

    /// Cancel a walk request
    Cancel {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        request: String,
    },

    /// Delete a walk request
    DeleteWalk {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        request: String,
    },

    /// Mark an accepted walk as completed
    Complete {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        request: String,
    },

    /// Show a user's notification feed, newest first
    Notifications {
        #[arg(long)]
        user: String,
    },
}
