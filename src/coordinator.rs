//! Turns a user action into one `/chat` request/reply cycle.
//!
//! Per send: `Idle -> Sending -> RepliedOk | RepliedFallback -> Idle`.
//! Sends are independent. A second send while the first is in flight issues
//! its own request and the replies land in whatever order they settle.

use crate::client::ChatBackend;
use crate::identity::SessionIdentity;
use crate::render::MessageLog;
use crate::types::{ChatMessage, ChatRequest};
use std::cell::Cell;
use std::rc::Rc;

pub const FALLBACK_REPLY: &str = "Sorry, I'm having trouble connecting. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendState {
    Idle,
    Sending,
    RepliedOk,
    RepliedFallback,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SendOutcome {
    pub reply: ChatMessage,
    pub state: SendState,
}

/// Trimmed text to send, or `None` when there is nothing to send.
pub fn prepare_outgoing(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub struct SendCoordinator {
    backend: Rc<dyn ChatBackend>,
    identity: SessionIdentity,
    in_flight: Cell<usize>,
}

struct InFlightGuard<'a>(&'a Cell<usize>);

impl<'a> InFlightGuard<'a> {
    fn enter(counter: &'a Cell<usize>) -> Self {
        counter.set(counter.get() + 1);
        Self(counter)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

impl SendCoordinator {
    pub fn new(backend: Rc<dyn ChatBackend>, identity: SessionIdentity) -> Self {
        Self {
            backend,
            identity,
            in_flight: Cell::new(0),
        }
    }

    pub fn identity(&self) -> &SessionIdentity {
        &self.identity
    }

    pub fn state(&self) -> SendState {
        if self.in_flight.get() > 0 {
            SendState::Sending
        } else {
            SendState::Idle
        }
    }

    /// Sends already-trimmed `text` and produces the bot entry to append.
    ///
    /// Every failure collapses to [`FALLBACK_REPLY`]; the cause is only logged.
    pub async fn exchange(&self, text: String) -> SendOutcome {
        let _guard = InFlightGuard::enter(&self.in_flight);
        let request = ChatRequest {
            message: text,
            user_id: self.identity.as_str().to_string(),
        };

        match self.backend.send(&request).await {
            Ok(response) => SendOutcome {
                reply: ChatMessage::bot(response),
                state: SendState::RepliedOk,
            },
            Err(err) => {
                tracing::error!(error = %err, "error sending message");
                SendOutcome {
                    reply: ChatMessage::bot(FALLBACK_REPLY),
                    state: SendState::RepliedFallback,
                }
            }
        }
    }

    /// Synchronous half of a send: appends the user entry right away and
    /// hands back the text to pass to [`exchange`](Self::exchange).
    ///
    /// Blank input leaves `log` untouched and returns `None`.
    pub fn begin(&self, input: &str, log: &mut MessageLog) -> Option<String> {
        let text = prepare_outgoing(input)?;
        log.push(ChatMessage::user(text.clone()));
        Some(text)
    }

    /// Whole cycle against `log`: user entry first, bot entry once settled.
    ///
    /// Returns `None` when the input was blank and nothing happened.
    pub async fn submit(&self, input: &str, log: &mut MessageLog) -> Option<SendState> {
        let text = self.begin(input, log)?;
        let outcome = self.exchange(text).await;
        log.push(outcome.reply);
        Some(outcome.state)
    }
}
