//! # Defect Status State Machine
//!
//! The defect status field gates which actions the dashboard offers on a
//! defect report.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Defect Status Lifecycle                              │
//! │                                                                         │
//! │                    ┌──────────────┐                                     │
//! │            ┌──────►│   Returned   │  (terminal)                         │
//! │  ┌─────────┴──┐    └──────────────┘                                     │
//! │  │  Pending   │                                                         │
//! │  └─────────┬──┘    ┌──────────────┐                                     │
//! │            └──────►│   Resolved   │  (terminal)                         │
//! │                    └──────────────┘                                     │
//! │                                                                         │
//! │  No transition leaves Returned or Resolved.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The server rejects transitions from non-pending states; the client uses
//! [`DefectStatus::available_actions`] to disable the matching buttons.
//! That is a UX nicety - the true guard is server-side.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{EngineError, EngineResult};

// =============================================================================
// Defect Status
// =============================================================================

/// The status of a defect report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DefectStatus {
    /// Report filed, awaiting handling. The only state with actions.
    Pending,
    /// Defective goods were sent back to the supplier. Terminal.
    Returned,
    /// Written off or otherwise closed internally. Terminal.
    Resolved,
}

/// Initial status on creation is pending.
impl Default for DefectStatus {
    fn default() -> Self {
        DefectStatus::Pending
    }
}

// =============================================================================
// Actions
// =============================================================================

/// An action the dashboard may offer on a defect report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DefectAction {
    /// Move the defect to `Returned`.
    MarkReturned,
    /// Move the defect to `Resolved`.
    MarkResolved,
}

impl DefectAction {
    /// The status this action transitions into.
    pub const fn target_status(&self) -> DefectStatus {
        match self {
            DefectAction::MarkReturned => DefectStatus::Returned,
            DefectAction::MarkResolved => DefectStatus::Resolved,
        }
    }
}

// =============================================================================
// Transitions
// =============================================================================

impl DefectStatus {
    /// Whether this status admits no further transitions.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, DefectStatus::Returned | DefectStatus::Resolved)
    }

    /// Whether a transition to `next` is allowed.
    ///
    /// Only `Pending` may move, and only into a terminal state.
    pub fn can_transition_to(&self, next: DefectStatus) -> bool {
        matches!(
            (self, next),
            (DefectStatus::Pending, DefectStatus::Returned)
                | (DefectStatus::Pending, DefectStatus::Resolved)
        )
    }

    /// Performs a transition, rejecting anything the machine doesn't allow.
    pub fn transition(self, next: DefectStatus) -> EngineResult<DefectStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(EngineError::InvalidStatusTransition {
                from: self,
                to: next,
            })
        }
    }

    /// The actions the dashboard may enable for this status.
    ///
    /// Empty once terminal, so the buttons disable themselves.
    pub const fn available_actions(&self) -> &'static [DefectAction] {
        match self {
            DefectStatus::Pending => &[DefectAction::MarkReturned, DefectAction::MarkResolved],
            DefectStatus::Returned | DefectStatus::Resolved => &[],
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
