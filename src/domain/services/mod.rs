pub mod auth_service;
pub mod datetime;
pub mod event_service;
pub mod render;
pub mod selection;
pub mod validation;
