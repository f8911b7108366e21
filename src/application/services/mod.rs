mod answer_generator;
mod chat_service;
mod conversation_history;
mod ingestion_service;
mod response_formatter;

pub use answer_generator::{AnswerGenerator, GenerationError, QUERY_VARIABLE};
pub use chat_service::{ChatError, ChatService};
pub use conversation_history::ConversationHistory;
pub use ingestion_service::{IngestionError, IngestionService};
pub use response_formatter::{dedent, format_generated_text};
