//! # Lookup Session
//!
//! The form state and lookup lifecycle of one user, held in an explicit
//! [`LookupSession`] value. Every transition consumes the session and returns
//! the next one:
//!
//! ```text
//! Idle        --submit(valid)-->   Pending
//! Idle        --submit(invalid)--> Idle        (rejected, nothing sent)
//! Pending     --resolve(current)-> Resolved
//! Pending     --submit(valid)-->   Pending     (new generation, old reply dropped)
//! Resolved    --submit(valid)-->   Pending
//! any         --reset-->           Idle
//! ```
//!
//! Each accepted submission gets a new generation number. A reply is only
//! applied if it carries the generation the session is still waiting for, so a
//! slow reply can never overwrite a newer one.

use log::debug;

use crate::catalog::{GameDefinition, DEFAULT_SERVER};
use crate::common::messages::{LookupOutcome, LookupRequest};
use crate::validation::{check_submission, ValidationError};

/// Values currently typed into the lookup form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupForm {
    pub game: Option<&'static GameDefinition>,
    pub account_id: String,
    pub zone_id: String,
    pub server: String,
}

impl Default for LookupForm {
    fn default() -> Self {
        Self {
            game: None,
            account_id: String::new(),
            zone_id: String::new(),
            server: DEFAULT_SERVER.to_string(),
        }
    }
}

impl LookupForm {
    pub fn check(&self) -> Result<(), ValidationError> {
        check_submission(self.game, &self.account_id, &self.zone_id, &self.server)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupPhase {
    Idle,
    Pending { generation: u64 },
    Resolved(LookupOutcome),
}

/// An accepted submission, ready to be dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub generation: u64,
    pub game: &'static GameDefinition,
    pub request: LookupRequest,
}

/// The outcome of a dispatched ticket, tagged with the ticket's generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub generation: u64,
    pub outcome: LookupOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupSession {
    form: LookupForm,
    phase: LookupPhase,
    generation: u64,
}

impl Default for LookupSession {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupSession {
    pub fn new() -> Self {
        Self {
            form: LookupForm::default(),
            phase: LookupPhase::Idle,
            generation: 0,
        }
    }

    pub fn form(&self) -> &LookupForm {
        &self.form
    }

    pub fn phase(&self) -> &LookupPhase {
        &self.phase
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, LookupPhase::Pending { .. })
    }

    /// The last applied outcome, if the session is resolved.
    pub fn outcome(&self) -> Option<&LookupOutcome> {
        match &self.phase {
            LookupPhase::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn select_game(mut self, game: Option<&'static GameDefinition>) -> Self {
        self.form.game = game;
        self
    }

    pub fn set_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.form.account_id = account_id.into();
        self
    }

    pub fn set_zone_id(mut self, zone_id: impl Into<String>) -> Self {
        self.form.zone_id = zone_id.into();
        self
    }

    pub fn set_server(mut self, server: impl Into<String>) -> Self {
        self.form.server = server.into();
        self
    }

    /// Submits the current form.
    ///
    /// On rejection the session comes back untouched alongside the reason. On
    /// acceptance the session moves to `Pending` under a new generation, the
    /// previous outcome is dropped, and the returned ticket carries the
    /// request to dispatch.
    pub fn submit(mut self) -> (Self, Result<LookupTicket, ValidationError>) {
        if let Err(e) = self.form.check() {
            return (self, Err(e));
        }
        let Some(game) = self.form.game else {
            return (self, Err(ValidationError::IncompleteForm));
        };

        self.generation += 1;
        self.phase = LookupPhase::Pending {
            generation: self.generation,
        };

        let ticket = LookupTicket {
            generation: self.generation,
            game,
            request: LookupRequest::for_game(
                game,
                &self.form.account_id,
                &self.form.zone_id,
                &self.form.server,
            ),
        };
        (self, Ok(ticket))
    }

    /// Applies a finished lookup. Replies for anything other than the
    /// generation currently pending are dropped.
    pub fn resolve(mut self, resolution: Resolution) -> Self {
        match self.phase {
            LookupPhase::Pending { generation } if generation == resolution.generation => {
                self.phase = LookupPhase::Resolved(resolution.outcome);
            }
            _ => {
                debug!(
                    "Dropping stale lookup reply (generation {}, current {})",
                    resolution.generation,
                    self.generation
                );
            }
        }
        self
    }

    /// Clears the form and any result. In-flight replies are invalidated.
    pub fn reset(self) -> Self {
        Self {
            form: LookupForm::default(),
            phase: LookupPhase::Idle,
            generation: self.generation + 1,
        }
    }
}
