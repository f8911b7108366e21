mod conversation_turn;
mod document;
mod document_record;
mod prompt_template;
mod source_mode;

pub use conversation_turn::ConversationTurn;
pub use document::{ContentType, Document};
pub use document_record::DocumentRecord;
pub use prompt_template::{PromptTemplate, PromptTemplateError};
pub use source_mode::SourceMode;
