use chrono::{DateTime, Utc};

/// Text extracted from one uploaded document. Names are not unique: every
/// upload appends a new record.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
    pub name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl DocumentRecord {
    pub fn new(name: String, text: String) -> Self {
        Self {
            name,
            text,
            created_at: Utc::now(),
        }
    }
}
