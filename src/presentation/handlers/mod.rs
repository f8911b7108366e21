mod chat;
mod error_response;
mod extract;
mod health;
mod history;

pub use chat::{ChatRequest, ChatResponse, chat_handler};
pub use error_response::ErrorResponse;
pub use extract::{ExtractResponse, extract_text_handler};
pub use health::health_handler;
pub use history::{HistoryEntry, HistoryResponse, history_handler};
