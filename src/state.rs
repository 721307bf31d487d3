use std::sync::Arc;
use crate::domain::services::{auth_service::AuthService, event_service::EventService};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub event_service: Arc<EventService>,
    pub auth_service: Arc<AuthService>,
}
