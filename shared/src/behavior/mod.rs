pub mod behavior_use;
pub mod database;
pub mod definition;
pub mod error;
pub mod library;
pub mod property;
pub mod snapshot;
