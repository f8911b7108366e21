use std::sync::Arc;

use crate::application::services::{ChatService, IngestionService};
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ChatService>,
    pub ingestion_service: Arc<IngestionService>,
    pub settings: Settings,
}

impl AppState {
    pub fn new(
        chat_service: Arc<ChatService>,
        ingestion_service: Arc<IngestionService>,
        settings: Settings,
    ) -> Self {
        Self {
            chat_service,
            ingestion_service,
            settings,
        }
    }
}
