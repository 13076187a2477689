//! TUI application state and event handling.
//!
//! The `App` owns a [`Session`] and runs the event loop via `run()`. It manages:
//!
//! - **Query input**: a single-line editor submitted with Enter
//! - **In-flight request**: the session ticket plus a channel from the worker thread that
//!   performs the blocking HTTP call, polled on every loop tick
//! - **Status messages**: transient notices (empty input, copy results, storage failures)
//! - **Dirty state tracking**: redraw only when state changes, or while the spinner runs
//!
//! # Example
//!
//! ```rust,ignore
//! let mut app = App::new(session, backend, Theme::Dark);
//! app.run(&mut terminal)?;
//! ```

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tracing::{debug, warn};

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use super::theme::Theme;
use crate::clipboard::copy_to_clipboard;
use crate::error::TransportError;
use crate::orchestrator::{Outcome, PendingRequest, QueryBackend, Session};
use crate::store::HistoryStorage;

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Longest query accepted from the keyboard
const MAX_INPUT_CHARS: usize = 2000;
const PAGE_LINES: u16 = 10;
const SPINNER_INTERVAL: Duration = Duration::from_millis(100);

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

type TransportOutcome = Result<String, TransportError>;

/// The session ticket and where its outcome will arrive
struct InFlight {
    request: PendingRequest,
    receiver: Receiver<TransportOutcome>,
}

pub struct App<S, B>
where
    S: HistoryStorage,
    B: QueryBackend + Clone + Send + 'static,
{
    session: Session<S>,
    backend: B,
    in_flight: Option<InFlight>,
    input: String,
    theme: Theme,
    scroll: u16,
    should_quit: bool,
    status_message: Option<StatusMessage>,
    spinner_frame: usize,
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl<S, B> App<S, B>
where
    S: HistoryStorage,
    B: QueryBackend + Clone + Send + 'static,
{
    pub fn new(session: Session<S>, backend: B, theme: Theme) -> Self {
        Self {
            session,
            backend,
            in_flight: None,
            input: String::new(),
            theme,
            scroll: 0,
            should_quit: false,
            status_message: None,
            spinner_frame: 0,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    /// Check and clear expired status messages
    fn check_and_clear_expired_status(&mut self) {
        let expired =
            self.status_message.as_ref().is_some_and(|msg| Instant::now() >= msg.expires_at);
        if expired {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    pub fn run<T: Backend>(&mut self, terminal: &mut Terminal<T>) -> Result<()> {
        while !self.should_quit {
            self.check_and_clear_expired_status();
            self.poll_in_flight();

            let now = Instant::now();
            let elapsed = now.duration_since(self.last_draw_time);
            if self.session.is_sending() && elapsed >= SPINNER_INTERVAL {
                self.spinner_frame = self.spinner_frame.wrapping_add(1);
                self.needs_redraw = true;
            }

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            if self.needs_redraw || elapsed >= Duration::from_millis(100) {
                terminal.draw(|f| {
                    let state = RenderState {
                        messages: self.session.messages(),
                        input: &self.input,
                        theme: self.theme,
                        sending: self.session.is_sending(),
                        scroll: self.scroll,
                        spinner_frame: self.spinner_frame,
                        status_message: self.status_message.as_ref(),
                    };
                    render_ui(f, &state);
                })?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action);
        }

        Ok(())
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ClearInput => {
                if self.input.is_empty() {
                    self.should_quit = true;
                } else {
                    self.input.clear();
                    self.needs_redraw = true;
                }
            }
            Action::Submit => self.submit(),
            Action::ToggleTheme => {
                self.theme = self.theme.toggle();
                self.needs_redraw = true;
            }
            Action::ClearChat => match self.session.clear() {
                Ok(()) => {
                    self.scroll = 0;
                    self.set_status("✓ Chat cleared", MessageType::Success, STATUS_SUCCESS_DURATION_MS);
                    self.report_persist_error();
                }
                Err(e) => self.set_status(format!("✗ {}", e), MessageType::Error, STATUS_ERROR_DURATION_MS),
            },
            Action::CopyAnswer => self.copy_latest_answer(),
            Action::ScrollUp => self.scroll_by(1),
            Action::ScrollDown => self.scroll_by(-1),
            Action::PageUp => self.scroll_by(PAGE_LINES as i32),
            Action::PageDown => self.scroll_by(-(PAGE_LINES as i32)),
            Action::Input(c) => self.push_char(c),
            Action::DeleteChar => {
                if self.input.pop().is_some() {
                    self.needs_redraw = true;
                }
            }
            Action::None => {}
        }
    }

    /// Start a request on a worker thread, or explain why not
    fn submit(&mut self) {
        let request = match self.session.begin(&self.input) {
            Ok(request) => request,
            Err(e) => {
                self.set_status(format!("✗ {}", e), MessageType::Error, STATUS_ERROR_DURATION_MS);
                return;
            }
        };

        self.input.clear();
        self.scroll = 0;
        self.needs_redraw = true;

        let (sender, receiver) = mpsc::channel();
        let backend = self.backend.clone();
        let query = request.query().to_string();
        let spawned = thread::Builder::new().name("prof-finder-request".to_string()).spawn(
            move || {
                // The receiver is gone only if the app already quit
                let _ = sender.send(backend.send_query(&query));
            },
        );

        match spawned {
            Ok(_) => self.in_flight = Some(InFlight { request, receiver }),
            Err(e) => {
                warn!(error = %e, "Failed to spawn request worker");
                self.finish(request, Err(TransportError::Network(e.to_string())));
            }
        }
    }

    /// Settle the in-flight request once its worker has answered
    fn poll_in_flight(&mut self) {
        let Some(in_flight) = self.in_flight.take() else {
            return;
        };

        match in_flight.receiver.try_recv() {
            Ok(outcome) => self.finish(in_flight.request, outcome),
            Err(TryRecvError::Empty) => self.in_flight = Some(in_flight),
            Err(TryRecvError::Disconnected) => {
                self.finish(in_flight.request, Err(TransportError::Disconnected))
            }
        }
    }

    fn finish(&mut self, request: PendingRequest, outcome: TransportOutcome) {
        let settled = self.session.settle(request, outcome);
        if let Outcome::Failed(reason) = &settled.outcome {
            debug!(%reason, "Request settled with an error");
        }
        self.scroll = 0;
        self.needs_redraw = true;
        self.report_persist_error();
    }

    fn report_persist_error(&mut self) {
        if let Some(e) = self.session.take_persist_error() {
            self.set_status(format!("✗ {}", e), MessageType::Error, STATUS_ERROR_DURATION_MS);
        }
    }

    fn copy_latest_answer(&mut self) {
        let Some(answer) = self.session.latest_answer().map(str::to_string) else {
            self.set_status("✗ No answer to copy", MessageType::Error, STATUS_ERROR_DURATION_MS);
            return;
        };

        match copy_to_clipboard(&answer) {
            Ok(()) => {
                self.set_status("✓ Copied to clipboard", MessageType::Success, STATUS_SUCCESS_DURATION_MS)
            }
            Err(e) => self.set_status(
                format!("✗ Clipboard error: {}", e),
                MessageType::Error,
                STATUS_ERROR_DURATION_MS,
            ),
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        let old = self.scroll;
        self.scroll = (self.scroll as i32 + delta).clamp(0, u16::MAX as i32) as u16;
        if old != self.scroll {
            self.needs_redraw = true;
        }
    }

    fn push_char(&mut self, c: char) {
        if self.input.chars().count() < MAX_INPUT_CHARS {
            self.input.push(c);
            self.needs_redraw = true;
        }
    }
}
