//! Data models for the ProfFinder conversation.
//!
//! - [`Message`] - One entry of the conversation log, tagged by [`Role`]
//! - [`MessageMeta`] - Structured payload carried by header/match/result messages
//! - [`ProfessorMatch`] - A professor record normalized from a backend response
//!
//! Messages are serialized with serde into the persisted history slot.

pub mod message;
pub mod professor;

pub use message::{Message, MessageId, MessageMeta, Role};
pub use professor::ProfessorMatch;
