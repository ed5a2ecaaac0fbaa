pub mod auth;
pub mod badge;
pub mod config;
pub mod events;
