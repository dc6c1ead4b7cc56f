/// Admin authorization policy.
pub mod authorization;
/// Telegram chat handling.
pub mod bot_service;
/// CSV rendering for participant exports.
pub mod csv_export;
/// Participant display codes.
pub mod display_code;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Registration, draw and export of participants.
pub mod raffle_service;
/// Update queue consumer.
pub mod update_dispatcher;
/// Webhook registration with Telegram.
pub mod webhook_service;
