use std::collections::HashSet;

use tracing::{debug, warn};

use super::persistence::HistoryStorage;
use crate::error::StoreError;
use crate::models::{Message, MessageId};

/// Ordered conversation log mirrored into a [`HistoryStorage`] slot.
///
/// The in-memory log is authoritative. Every mutation rewrites the whole slot; a failed write
/// is logged and kept for [`ConversationStore::take_persist_error`] instead of undoing the
/// mutation.
pub struct ConversationStore<S: HistoryStorage> {
    storage: S,
    messages: Vec<Message>,
    next_id: u64,
    persist_error: Option<StoreError>,
}

impl<S: HistoryStorage> ConversationStore<S> {
    /// Open the store, restoring whatever the slot holds
    pub fn open(storage: S) -> Self {
        let messages = load_messages(&storage);
        let next_id = messages.iter().filter_map(|m| m.id).map(|id| id.0).max().unwrap_or(0) + 1;
        debug!(messages = messages.len(), next_id, "Conversation restored");

        Self { storage, messages, next_id, persist_error: None }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == Some(id))
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Append a message, assigning a fresh id unless it carries an unused one
    pub fn append(&mut self, mut message: Message) -> MessageId {
        let id = match message.id {
            Some(id) if self.get(id).is_none() => {
                self.next_id = self.next_id.max(id.0 + 1);
                id
            }
            _ => self.allocate_id(),
        };
        message.id = Some(id);
        self.messages.push(message);
        self.persist();
        id
    }

    /// Remove one message; `None` if no message has that id
    pub fn remove_by_id(&mut self, id: MessageId) -> Option<Message> {
        let idx = self.messages.iter().position(|m| m.id == Some(id))?;
        let removed = self.messages.remove(idx);
        self.persist();
        Some(removed)
    }

    /// Empty the log and delete the persisted slot
    pub fn clear(&mut self) {
        self.messages.clear();
        if let Err(e) = self.storage.clear() {
            warn!(error = %e, "Failed to delete chat history");
            self.persist_error = Some(e.into());
        }
    }

    /// Last persistence failure since the previous call
    pub fn take_persist_error(&mut self) -> Option<StoreError> {
        self.persist_error.take()
    }

    fn allocate_id(&mut self) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        id
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.messages)
            .map_err(StoreError::from)
            .and_then(|json| self.storage.save(&json).map_err(StoreError::from));

        if let Err(e) = result {
            warn!(error = %e, "Failed to persist chat history");
            self.persist_error = Some(e);
        }
    }
}

/// Read and validate the slot, falling back to an empty log
fn load_messages<S: HistoryStorage>(storage: &S) -> Vec<Message> {
    let contents = match storage.load() {
        Ok(Some(contents)) => contents,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, "Failed to read chat history, starting empty");
            return Vec::new();
        }
    };

    let messages: Vec<Message> = match serde_json::from_str(&contents) {
        Ok(messages) => messages,
        Err(e) => {
            warn!(error = %e, "Discarding corrupt chat history");
            return Vec::new();
        }
    };

    sanitize_loaded(messages)
}

/// Drop placeholders orphaned by a previous session and repair missing or duplicate ids
fn sanitize_loaded(messages: Vec<Message>) -> Vec<Message> {
    let total = messages.len();
    let mut kept: Vec<Message> = messages.into_iter().filter(|m| !m.pending).collect();
    if kept.len() < total {
        debug!(dropped = total - kept.len(), "Dropped orphaned pending placeholders");
    }

    let mut seen = HashSet::new();
    let mut max_id = kept.iter().filter_map(|m| m.id).map(|id| id.0).max().unwrap_or(0);
    for message in &mut kept {
        match message.id {
            Some(id) if seen.insert(id) => {}
            _ => {
                max_id += 1;
                let id = MessageId(max_id);
                seen.insert(id);
                message.id = Some(id);
            }
        }
    }
    kept
}
