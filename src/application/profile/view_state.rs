//! What the profile screens render.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{StateMachine, UserId};
use crate::domain::profile::RoleProfile;

/// Loading lifecycle of the observed profile.
///
/// `is_saving` is tracked separately on [`ProfileViewState`], so a save can
/// run in any phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPhase {
    /// Nothing observed yet.
    #[default]
    Idle,

    /// Subscription opened, waiting for the first snapshot.
    Loading,

    /// At least one snapshot applied.
    Ready,

    /// The subscription failed and is dead until the next start.
    Error,
}

impl LoadPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadPhase::Loading)
    }
}

impl StateMachine for LoadPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use LoadPhase::*;
        matches!(
            (self, target),
            (Idle, Loading)
                | (Loading, Loading) // switched user before the first snapshot
                | (Loading, Ready)
                | (Loading, Error)
                | (Ready, Ready)
                | (Ready, Loading)
                | (Ready, Error)
                | (Error, Loading)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use LoadPhase::*;
        match self {
            Idle => vec![Loading],
            Loading => vec![Loading, Ready, Error],
            Ready => vec![Ready, Loading, Error],
            Error => vec![Loading],
        }
    }
}

/// Snapshot of one profile screen's state.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileViewState<P> {
    /// The user being observed, once `start` was called.
    pub user_id: Option<UserId>,
    pub profile: P,
    pub phase: LoadPhase,
    pub is_saving: bool,
    pub has_unsaved_changes: bool,
    /// Message of the last failed load or save.
    pub error: Option<String>,
}

impl<P: RoleProfile> ProfileViewState<P> {
    /// State before any user is observed.
    ///
    /// Holds a blank profile so screens always have something to render.
    pub fn initial() -> Self {
        Self {
            user_id: None,
            profile: P::default(),
            phase: LoadPhase::Idle,
            is_saving: false,
            has_unsaved_changes: false,
            error: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }
}
