use std::collections::VecDeque;

use tokio::sync::RwLock;

use crate::domain::ConversationTurn;

/// Process-lifetime log of answered queries, bounded to `max_entries`.
/// The oldest turn is evicted once the log is full.
pub struct ConversationHistory {
    turns: RwLock<VecDeque<ConversationTurn>>,
    max_entries: usize,
}

impl ConversationHistory {
    pub fn new(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            turns: RwLock::new(VecDeque::with_capacity(max_entries.min(64))),
            max_entries,
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub async fn record(&self, turn: ConversationTurn) {
        let mut turns = self.turns.write().await;
        if turns.len() == self.max_entries {
            turns.pop_front();
        }
        turns.push_back(turn);
    }

    /// Snapshot in insertion order.
    pub async fn turns(&self) -> Vec<ConversationTurn> {
        self.turns.read().await.iter().cloned().collect()
    }
}
