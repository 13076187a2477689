//! Persistent conversation history
//!
//! The conversation log lives in memory and is mirrored, in full, into one durable slot after
//! every mutation. Slot backends implement [`HistoryStorage`]:
//! - [`JsonFileStorage`]: a JSON file written atomically (temp file + rename)
//! - [`MemoryStorage`]: an in-process slot, used by tests
//!
//! Default file location: platform-specific data directories
//! - macOS: `~/Library/Application Support/prof-finder/history.json`
//! - Linux: `~/.local/share/prof-finder/history.json`
//! - Windows: `%APPDATA%\prof-finder\history.json`

pub mod conversation;
pub mod persistence;

pub use conversation::ConversationStore;
pub use persistence::{HistoryStorage, JsonFileStorage, MemoryStorage};
