//! Screens and the events that move between them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::DomainError;
use crate::domain::profile::Role;

/// Every top-level screen of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Login,
    Registration,
    Welcome,
    RoleSelection,
    StudentProfile,
    TutorProfile,
    StudentDashboard,
    TutorDashboard,
}

/// User actions that change the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    LoggedIn,
    SignUpRequested,
    Registered,
    BackToLogin,
    GetStarted,
    Back,
    ChooseRole(Role),
    ProfileSaved,
}

impl Screen {
    /// The screen shown on launch.
    pub fn initial() -> Self {
        Screen::Login
    }

    /// Next screen for `event`, or an error if the event means nothing here.
    pub fn on(self, event: NavEvent) -> Result<Screen, DomainError> {
        use NavEvent::*;
        use Screen::*;

        let next = match (self, event) {
            (Login, LoggedIn) => Welcome,
            (Login, SignUpRequested) => Registration,
            (Registration, Registered) | (Registration, BackToLogin) => Login,
            (Welcome, GetStarted) => RoleSelection,
            (RoleSelection, Back) => Welcome,
            (RoleSelection, ChooseRole(role)) => Screen::profile_editor(role),
            (StudentProfile, Back) | (TutorProfile, Back) => RoleSelection,
            (StudentProfile, ProfileSaved) => StudentDashboard,
            (TutorProfile, ProfileSaved) => TutorDashboard,
            (screen, event) => {
                return Err(DomainError::invalid_transition(screen, event)
                    .with_detail("screen", screen.to_string()))
            }
        };
        Ok(next)
    }

    /// Profile editor for a role.
    pub fn profile_editor(role: Role) -> Self {
        match role {
            Role::Student => Screen::StudentProfile,
            Role::Tutor => Screen::TutorProfile,
        }
    }

    /// Role whose profile or dashboard this screen shows, if any.
    pub fn role(&self) -> Option<Role> {
        match self {
            Screen::StudentProfile | Screen::StudentDashboard => Some(Role::Student),
            Screen::TutorProfile | Screen::TutorDashboard => Some(Role::Tutor),
            _ => None,
        }
    }

    /// Whether the screen shows the bottom tab bar.
    pub fn has_tab_bar(&self) -> bool {
        matches!(self, Screen::StudentDashboard | Screen::TutorDashboard)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Login => "login",
            Screen::Registration => "registration",
            Screen::Welcome => "welcome",
            Screen::RoleSelection => "role_selection",
            Screen::StudentProfile => "student_profile",
            Screen::TutorProfile => "tutor_profile",
            Screen::StudentDashboard => "dashboard",
            Screen::TutorDashboard => "tutor_dashboard",
        };
        write!(f, "{}", name)
    }
}

/// Bottom bar tabs on the dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Home,
    Browse,
    Sessions,
    Profile,
}
