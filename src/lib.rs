//! Library crate for the raffle bot, exposing modules for binaries and tests.

pub mod config;
/// Participant persistence.
pub mod dao;
/// Wire and response types.
pub mod dto;
pub mod error;
/// HTTP routes.
pub mod routes;
/// Raffle, chat and webhook services.
pub mod services;
/// Shared application state.
pub mod state;
pub mod telegram;
