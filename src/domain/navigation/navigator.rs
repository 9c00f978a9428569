//! Navigator - the single owner of "where the user is".

use tracing::debug;

use crate::domain::foundation::DomainError;

use super::{NavEvent, Screen, Tab};

/// Current screen plus the few bits of overlay state the screens share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    screen: Screen,
    tab: Tab,
    learn_more_open: bool,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            screen: Screen::initial(),
            tab: Tab::default(),
            learn_more_open: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn is_learn_more_open(&self) -> bool {
        self.learn_more_open
    }

    /// Applies an event. On error the current screen is kept.
    pub fn dispatch(&mut self, event: NavEvent) -> Result<Screen, DomainError> {
        let next = self.screen.on(event)?;
        debug!(from = %self.screen, to = %next, ?event, "navigate");

        if next != self.screen {
            self.learn_more_open = false;
        }
        if next.has_tab_bar() && !self.screen.has_tab_bar() {
            self.tab = Tab::Home;
        }
        self.screen = next;
        Ok(next)
    }

    /// Selects a dashboard tab. Ignored on screens without a tab bar.
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        if !self.screen.has_tab_bar() {
            return false;
        }
        self.tab = tab;
        true
    }

    /// The learn-more dialog only exists on role selection.
    pub fn open_learn_more(&mut self) -> bool {
        if self.screen != Screen::RoleSelection {
            return false;
        }
        self.learn_more_open = true;
        true
    }

    pub fn dismiss_learn_more(&mut self) {
        self.learn_more_open = false;
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::Role;

    fn at_role_selection() -> Navigator {
        let mut nav = Navigator::new();
        nav.dispatch(NavEvent::LoggedIn).unwrap();
        nav.dispatch(NavEvent::GetStarted).unwrap();
        nav
    }

    #[test]
    fn starts_on_login() {
        assert_eq!(Navigator::new().screen(), Screen::Login);
    }

    #[test]
    fn failed_dispatch_keeps_screen() {
        let mut nav = Navigator::new();
        assert!(nav.dispatch(NavEvent::Back).is_err());
        assert_eq!(nav.screen(), Screen::Login);
    }

    #[test]
    fn learn_more_only_opens_on_role_selection() {
        let mut nav = Navigator::new();
        assert!(!nav.open_learn_more());

        let mut nav = at_role_selection();
        assert!(nav.open_learn_more());
        assert!(nav.is_learn_more_open());
    }

    #[test]
    fn leaving_the_screen_closes_learn_more() {
        let mut nav = at_role_selection();
        nav.open_learn_more();
        nav.dispatch(NavEvent::ChooseRole(Role::Tutor)).unwrap();

        assert!(!nav.is_learn_more_open());
    }

    #[test]
    fn tabs_only_switch_on_dashboards() {
        let mut nav = at_role_selection();
        assert!(!nav.select_tab(Tab::Browse));

        nav.dispatch(NavEvent::ChooseRole(Role::Student)).unwrap();
        nav.dispatch(NavEvent::ProfileSaved).unwrap();

        assert_eq!(nav.tab(), Tab::Home);
        assert!(nav.select_tab(Tab::Sessions));
        assert_eq!(nav.tab(), Tab::Sessions);
    }
}
