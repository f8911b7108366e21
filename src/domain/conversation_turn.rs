#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTurn {
    pub query: String,
    pub response: String,
}

impl ConversationTurn {
    pub fn new(query: String, response: String) -> Self {
        Self { query, response }
    }
}
