//! Request orchestration: one user input, one outbound request, normalized log entries.
//!
//! A [`Session`] owns the conversation store and a two-state machine:
//!
//! ```text
//! Idle --begin()--> Sending --settle(ok | err)--> Idle
//! ```
//!
//! [`Session::begin`] hands out a [`PendingRequest`] ticket. The ticket cannot be cloned and is
//! consumed by [`Session::settle`], so a session has at most one request in flight and every
//! pending placeholder is retracted exactly once. The transport call itself happens between the
//! two, wherever the caller likes (inline for the CLI, on a worker thread for the TUI).
//!
//! # Example
//!
//! ```
//! use prof_finder::error::TransportError;
//! use prof_finder::orchestrator::{NormalizationPolicy, Session};
//! use prof_finder::store::{ConversationStore, MemoryStorage};
//!
//! let store = ConversationStore::open(MemoryStorage::new());
//! let mut session = Session::new(store, NormalizationPolicy::default());
//! let backend = |_: &str| Ok::<_, TransportError>(r#"{"answer": "Try Dr. Lee."}"#.to_string());
//!
//! let settled = session.submit_blocking(&backend, "best calculus professor")?;
//! assert!(settled.succeeded());
//! assert_eq!(session.messages().len(), 2);
//! # Ok::<(), prof_finder::error::SubmitError>(())
//! ```

pub mod policy;
pub mod resolve;
pub mod transport;

use tracing::{info, warn};

pub use policy::{NormalizationPolicy, ResultLayout};
pub use transport::{Endpoint, HealthStatus, HttpBackend, QueryBackend};

use crate::error::{StoreError, SubmitError, TransportError};
use crate::models::{Message, MessageId};
use crate::parsers::parse_response;
use crate::store::{ConversationStore, HistoryStorage};
use resolve::resolve_messages;

/// Where the session is in the request cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Sending { placeholder: MessageId },
}

/// The single in-flight slot. Obtained from [`Session::begin`], consumed by [`Session::settle`].
#[derive(Debug)]
pub struct PendingRequest {
    query: String,
    placeholder: MessageId,
}

impl PendingRequest {
    /// The trimmed text to send
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn placeholder(&self) -> MessageId {
        self.placeholder
    }
}

/// How a request ended
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Succeeded,
    /// Carries the text of the `error` message that was logged
    Failed(String),
}

/// Result of settling one request
#[derive(Debug, Clone, PartialEq)]
pub struct Settled {
    pub outcome: Outcome,
    /// Messages appended by the settlement, in display order
    pub appended: Vec<MessageId>,
}

impl Settled {
    pub fn succeeded(&self) -> bool {
        self.outcome == Outcome::Succeeded
    }
}

/// One user's conversation: the message log plus the request state machine
pub struct Session<S: HistoryStorage> {
    store: ConversationStore<S>,
    state: RequestState,
    policy: NormalizationPolicy,
}

impl<S: HistoryStorage> Session<S> {
    pub fn new(store: ConversationStore<S>, policy: NormalizationPolicy) -> Self {
        Self { store, state: RequestState::Idle, policy }
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.state, RequestState::Sending { .. })
    }

    pub fn policy(&self) -> &NormalizationPolicy {
        &self.policy
    }

    pub fn messages(&self) -> &[Message] {
        self.store.messages()
    }

    pub fn store(&self) -> &ConversationStore<S> {
        &self.store
    }

    /// Last persistence failure, if any, since the previous call
    pub fn take_persist_error(&mut self) -> Option<StoreError> {
        self.store.take_persist_error()
    }

    /// Text of the most recent bot answer
    pub fn latest_answer(&self) -> Option<&str> {
        self.messages()
            .iter()
            .rev()
            .find(|m| m.role == crate::models::Role::Bot && !m.pending)
            .map(|m| m.text.as_str())
    }

    /// Entry guard plus the transition to `Sending`.
    ///
    /// Appends the user message and the pending placeholder.
    pub fn begin(&mut self, input: &str) -> Result<PendingRequest, SubmitError> {
        if self.is_sending() {
            return Err(SubmitError::Busy);
        }
        let query = input.trim();
        if query.is_empty() {
            return Err(SubmitError::EmptyInput);
        }

        self.store.append(Message::user(query));
        let placeholder = self.store.append(Message::placeholder());
        self.state = RequestState::Sending { placeholder };
        info!(%placeholder, "Query submitted");

        Ok(PendingRequest { query: query.to_string(), placeholder })
    }

    /// Resolve the in-flight request and return to `Idle`.
    ///
    /// `outcome` is the raw body of a 2xx response or the transport failure.
    pub fn settle(
        &mut self,
        request: PendingRequest,
        outcome: Result<String, TransportError>,
    ) -> Settled {
        if self.state != (RequestState::Sending { placeholder: request.placeholder }) {
            warn!(placeholder = %request.placeholder, "Settling a request the session did not expect");
        }
        self.store.remove_by_id(request.placeholder);
        self.state = RequestState::Idle;

        let resolved = outcome
            .map_err(|e| e.to_string())
            .and_then(|body| parse_response(&body).map_err(|e| e.to_string()));

        match resolved {
            Ok(response) => {
                let appended = resolve_messages(response, &self.policy)
                    .into_iter()
                    .map(|m| self.store.append(m))
                    .collect::<Vec<_>>();
                info!(appended = appended.len(), "Query succeeded");
                Settled { outcome: Outcome::Succeeded, appended }
            }
            Err(reason) => {
                let text = format!("Error: {}", reason);
                warn!(%reason, "Query failed");
                let id = self.store.append(Message::error(text.clone()));
                Settled { outcome: Outcome::Failed(text), appended: vec![id] }
            }
        }
    }

    /// `begin`, call the backend inline, `settle`
    pub fn submit_blocking<B: QueryBackend + ?Sized>(
        &mut self,
        backend: &B,
        input: &str,
    ) -> Result<Settled, SubmitError> {
        let request = self.begin(input)?;
        let outcome = backend.send_query(request.query());
        Ok(self.settle(request, outcome))
    }

    /// Empty the log and delete the persisted slot. Refused while a request is in flight.
    pub fn clear(&mut self) -> Result<(), SubmitError> {
        if self.is_sending() {
            return Err(SubmitError::Busy);
        }
        self.store.clear();
        info!("Conversation cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::models::Role;
    use crate::store::MemoryStorage;

    fn session() -> Session<MemoryStorage> {
        Session::new(ConversationStore::open(MemoryStorage::new()), NormalizationPolicy::default())
    }

    fn roles(session: &Session<MemoryStorage>) -> Vec<Role> {
        session.messages().iter().map(|m| m.role).collect()
    }

    #[test]
    fn test_empty_input_rejected_without_call() {
        let mut session = session();
        let calls = Cell::new(0);
        let backend = |_: &str| {
            calls.set(calls.get() + 1);
            Ok::<_, TransportError>("{}".to_string())
        };

        for input in ["", "   ", "\n\t "] {
            let err = session.submit_blocking(&backend, input).unwrap_err();
            assert_eq!(err, SubmitError::EmptyInput);
        }
        assert_eq!(calls.get(), 0);
        assert!(session.messages().is_empty());
        assert_eq!(session.state(), RequestState::Idle);
    }

    #[test]
    fn test_begin_appends_user_and_placeholder() {
        let mut session = session();
        let request = session.begin("  best calculus professor  ").unwrap();

        assert_eq!(request.query(), "best calculus professor");
        assert_eq!(roles(&session), vec![Role::User, Role::Bot]);
        assert_eq!(session.messages()[0].text, "best calculus professor");
        assert!(session.messages()[1].pending);
        assert_eq!(session.state(), RequestState::Sending { placeholder: request.placeholder() });
    }

    #[test]
    fn test_busy_guard_rejects_second_submission() {
        let mut session = session();
        let request = session.begin("first").unwrap();

        assert_eq!(session.begin("second").unwrap_err(), SubmitError::Busy);
        assert_eq!(session.messages().len(), 2);

        session.settle(request, Ok(r#"{"answer": "ok"}"#.to_string()));
        assert!(session.begin("third").is_ok());
    }

    #[test]
    fn test_success_replaces_placeholder() {
        let mut session = session();
        let seen = RefCell::new(Vec::new());
        let backend = |query: &str| {
            seen.borrow_mut().push(query.to_string());
            Ok::<_, TransportError>(r#"{"answer": "Dr. Smith is great."}"#.to_string())
        };

        let settled = session.submit_blocking(&backend, " calculus ").unwrap();

        assert!(settled.succeeded());
        assert_eq!(seen.borrow().as_slice(), ["calculus".to_string()]);
        assert_eq!(roles(&session), vec![Role::User, Role::Bot]);
        assert_eq!(session.messages()[1].text, "Dr. Smith is great.");
        assert!(session.messages().iter().all(|m| !m.pending));
        assert_eq!(session.state(), RequestState::Idle);
    }

    #[test]
    fn test_status_500_yields_single_error_and_idle() {
        let mut session = session();
        let backend = |_: &str| Err::<String, _>(TransportError::Status(500));

        let settled = session.submit_blocking(&backend, "hello").unwrap();

        assert_eq!(settled.outcome, Outcome::Failed("Error: Server error: 500".to_string()));
        assert_eq!(roles(&session), vec![Role::User, Role::Error]);
        assert_eq!(session.state(), RequestState::Idle);

        // Next submission is accepted
        assert!(session.begin("again").is_ok());
    }

    #[test]
    fn test_unparsable_body_is_error_message() {
        let mut session = session();
        let backend = |_: &str| Ok::<_, TransportError>("<html>502</html>".to_string());

        let settled = session.submit_blocking(&backend, "hello").unwrap();

        assert!(!settled.succeeded());
        let last = session.messages().last().unwrap();
        assert_eq!(last.role, Role::Error);
        assert!(last.text.starts_with("Error: invalid response body"));
    }

    #[test]
    fn test_placeholder_removed_exactly_once_on_every_outcome() {
        let outcomes: Vec<Result<String, TransportError>> = vec![
            Ok(r#"{"answer": "x", "matches": [{"name": "A"}]}"#.to_string()),
            Ok("not json".to_string()),
            Err(TransportError::Timeout(std::time::Duration::from_secs(30))),
            Err(TransportError::Disconnected),
        ];

        for outcome in outcomes {
            let mut session = session();
            let request = session.begin("q").unwrap();
            let placeholder = request.placeholder();
            assert_eq!(session.messages().iter().filter(|m| m.pending).count(), 1);

            session.settle(request, outcome);
            assert!(session.store().get(placeholder).is_none());
            assert_eq!(session.messages().iter().filter(|m| m.pending).count(), 0);
            assert!(!session.is_sending());
        }
    }

    #[test]
    fn test_cited_matches_rendered_first() {
        let mut session = session();
        let body = r#"{
            "llm_answer": "See Dr. P1.",
            "matches": [
                {"id": "p0", "name": "Dr. P0", "subject": "Math", "rating": 4.1, "final_score": 0.9},
                {"id": "p1", "name": "Dr. P1", "subject": "Math", "stars": 4.8, "score": 0.7}
            ],
            "sources_used": ["p1"]
        }"#;
        let backend = |_: &str| Ok::<_, TransportError>(body.to_string());

        session.submit_blocking(&backend, "math").unwrap();

        let matches: Vec<_> =
            session.messages().iter().filter(|m| m.role == Role::Match).collect();
        assert_eq!(matches.len(), 2);
        assert!(matches[0].text.starts_with("Dr. P1"));
        assert!(matches[1].text.starts_with("Dr. P0"));
    }

    #[test]
    fn test_settled_ids_match_appended_messages() {
        let mut session = session();
        let backend = |_: &str| {
            Ok::<_, TransportError>(r#"{"answer": "x", "matches": [{"name": "A"}]}"#.to_string())
        };

        let settled = session.submit_blocking(&backend, "q").unwrap();
        let tail: Vec<_> =
            session.messages()[1..].iter().map(|m| m.id.unwrap()).collect();
        assert_eq!(settled.appended, tail);
    }

    #[test]
    fn test_latest_answer() {
        let mut session = session();
        assert_eq!(session.latest_answer(), None);

        let backend = |q: &str| Ok::<_, TransportError>(format!(r#"{{"answer": "re: {}"}}"#, q));
        session.submit_blocking(&backend, "one").unwrap();
        session.submit_blocking(&backend, "two").unwrap();
        assert_eq!(session.latest_answer(), Some("re: two"));
    }

    #[test]
    fn test_clear_refused_while_sending() {
        let mut session = session();
        let request = session.begin("q").unwrap();
        assert_eq!(session.clear().unwrap_err(), SubmitError::Busy);

        session.settle(request, Err(TransportError::Status(503)));
        session.clear().unwrap();
        assert!(session.messages().is_empty());
    }
}
