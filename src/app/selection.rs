//! Selection lifecycle state machine.
//!
//! ```text
//!            select(id)                unselect
//!   None ───────────────► Selected(id) ─────────► Closing ──(timer: token)──► None
//!    ▲                      ▲    │ select(other)      │
//!    │                      │    └──────────────────► Selected(other)
//!    │                      └─────── select(id) ──────┘
//!    └── offering removed from the active list / teardown (from any state)
//! ```
//!
//! `Closing` keeps a snapshot of the offering so the summary bar can play
//! its exit while nothing is logically selected. Zellij timers cannot be
//! cancelled, so each close carries a [`CloseToken`]; a timer only completes
//! the close whose token it was scheduled with.

use crate::domain::Offering;

/// Identifies one scheduled close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CloseToken(pub u64);

/// Current selection.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    #[default]
    None,
    Selected(u64),
    Closing {
        offering: Offering,
        token: CloseToken,
    },
}

/// Coarse lifecycle phase, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    None,
    Selected,
    Closing,
}

/// Owner of the selection and of close token issuance.
#[derive(Debug, Clone, Default)]
pub struct SelectionMachine {
    selection: Selection,
    last_token: u64,
}

impl SelectionMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub const fn phase(&self) -> SelectionPhase {
        match self.selection {
            Selection::None => SelectionPhase::None,
            Selection::Selected(_) => SelectionPhase::Selected,
            Selection::Closing { .. } => SelectionPhase::Closing,
        }
    }

    /// Id of the selected offering. `None` while closing.
    #[must_use]
    pub const fn selected_id(&self) -> Option<u64> {
        match self.selection {
            Selection::Selected(id) => Some(id),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_selected(&self, id: u64) -> bool {
        self.selected_id() == Some(id)
    }

    /// Selects `id`, replacing any selection and abandoning a pending close.
    pub fn select(&mut self, id: u64) {
        if let Selection::Closing { token, .. } = &self.selection {
            tracing::debug!(token = token.0, "select cancels pending close");
        }
        self.selection = Selection::Selected(id);
    }

    /// Starts closing the current selection.
    ///
    /// Returns the token the close timer must carry. Returns `None` when
    /// nothing is selected, or when the selected id is missing from
    /// `active`; in that last case the selection is cleared immediately.
    pub fn unselect(&mut self, active: &[Offering]) -> Option<CloseToken> {
        let id = self.selected_id()?;
        let Some(offering) = active.iter().find(|o| o.id == id) else {
            tracing::debug!(offering_id = id, "unselecting dangling offering");
            self.selection = Selection::None;
            return None;
        };

        self.last_token += 1;
        let token = CloseToken(self.last_token);
        self.selection = Selection::Closing {
            offering: offering.clone(),
            token,
        };
        Some(token)
    }

    /// Completes the close scheduled with `token`.
    ///
    /// Returns `true` if the selection changed. Stale tokens are ignored.
    pub fn close_timer_fired(&mut self, token: CloseToken) -> bool {
        match &self.selection {
            Selection::Closing { token: pending, .. } if *pending == token => {
                self.selection = Selection::None;
                true
            }
            _ => {
                tracing::trace!(token = token.0, "ignoring stale close timer");
                false
            }
        }
    }

    /// Clears a selection whose offering is no longer in `active`.
    ///
    /// Returns `true` if the selection changed.
    pub fn reconcile(&mut self, active: &[Offering]) -> bool {
        let id = match &self.selection {
            Selection::None => return false,
            Selection::Selected(id) => *id,
            Selection::Closing { offering, .. } => offering.id,
        };
        if active.iter().any(|o| o.id == id) {
            return false;
        }
        tracing::debug!(offering_id = id, "selected offering disappeared, clearing selection");
        self.selection = Selection::None;
        true
    }

    /// Drops the selection and any pending close.
    pub fn clear(&mut self) {
        self.selection = Selection::None;
    }
}
