//! ProfFinder - ask questions about professors and browse the reviews that answer them
//!
//! This library provides the client side of the ProfFinder chat:
//!
//! - A persistent conversation log mirrored into a local JSON file
//! - A request session with an explicit `Idle`/`Sending` state machine
//! - Normalization of loosely shaped backend responses into display messages
//! - A terminal chat UI and a one-shot CLI
//!
//! # Example
//!
//! ```no_run
//! use prof_finder::orchestrator::{Endpoint, HttpBackend, NormalizationPolicy, Session};
//! use prof_finder::store::{ConversationStore, JsonFileStorage};
//!
//! let store = ConversationStore::open(JsonFileStorage::new("/tmp/prof-finder/history.json"));
//! let mut session = Session::new(store, NormalizationPolicy::default());
//! let backend = HttpBackend::new(Endpoint::default())?;
//!
//! let settled = session.submit_blocking(&backend, "Who teaches calculus well?")?;
//! for message in session.messages() {
//!     println!("{}: {}", message.role.as_str(), message.text);
//! }
//! # let _ = settled;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod formatting;
pub mod logging;
pub mod models;
pub mod orchestrator;
pub mod parsers;
pub mod store;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use models::{Message, MessageId, ProfessorMatch, Role};
pub use orchestrator::{NormalizationPolicy, Session};
pub use parsers::parse_response;
pub use store::{ConversationStore, JsonFileStorage};
pub use utils::paths::format_path_with_tilde;
