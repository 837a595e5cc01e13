//! Navigation state machine for the authenticated shell.
//!
//! Routes are in-memory only. Every user or viewport event goes through
//! [`Navigator::handle`]; the menu side effects of a navigation (closing the
//! dropdown, collapsing the side panel) happen there and nowhere else.

use tracing::debug;

/// Default width below which the viewport counts as narrow.
pub const DEFAULT_NARROW_WIDTH: u32 = 768;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Route {
    #[default]
    Dashboard,
    MyCommittee,
    AllCommittees,
}

impl Route {
    pub fn key(&self) -> &'static str {
        match self {
            Route::Dashboard => "dashboard",
            Route::MyCommittee => "committee-mine",
            Route::AllCommittees => "committee-all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Dashboard => "Miembro",
            Route::MyCommittee => "Mi Comité",
            Route::AllCommittees => "Todos los Comités",
        }
    }

    pub fn from_key(key: &str) -> Option<Route> {
        Route::variants().iter().copied().find(|r| r.key() == key)
    }

    /// Routes reachable from the committees submenu.
    pub fn is_committee(&self) -> bool {
        matches!(self, Route::MyCommittee | Route::AllCommittees)
    }

    pub fn variants() -> &'static [Route] {
        &[Route::Dashboard, Route::MyCommittee, Route::AllCommittees]
    }
}

/// Which menu chrome the shell renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuLayout {
    /// Horizontal bar with a committees dropdown and a hamburger menu on
    /// small screens.
    #[default]
    TopBar,
    /// Collapsible side panel with a committees submenu.
    SidePanel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    Navigate(Route),
    ToggleCommitteesMenu,
    ToggleMobileMenu,
    TogglePanel,
    ViewportResized { width: u32 },
}

/// Collapsible side panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SidePanel {
    pub collapsed: bool,
    /// Set when opening the committees submenu forced a collapsed panel
    /// open; leaving the submenu's routes collapses it again.
    pub expanded_for_submenu: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    layout: MenuLayout,
    active: Route,
    committees_open: bool,
    mobile_menu_open: bool,
    panel: SidePanel,
    viewport_width: Option<u32>,
    narrow_width: u32,
}

impl Navigator {
    pub fn new(layout: MenuLayout) -> Self {
        Self {
            layout,
            active: Route::default(),
            committees_open: false,
            mobile_menu_open: false,
            panel: SidePanel::default(),
            viewport_width: None,
            narrow_width: DEFAULT_NARROW_WIDTH,
        }
    }

    pub fn with_narrow_width(mut self, width: u32) -> Self {
        self.narrow_width = width;
        self
    }

    pub fn with_collapsed_panel(mut self, collapsed: bool) -> Self {
        self.panel.collapsed = collapsed;
        self
    }

    pub fn layout(&self) -> MenuLayout {
        self.layout
    }

    pub fn active(&self) -> Route {
        self.active
    }

    pub fn is_active(&self, route: Route) -> bool {
        self.active == route
    }

    /// Whether the committees menu entry should render as active.
    pub fn committees_active(&self) -> bool {
        self.active.is_committee()
    }

    pub fn committees_open(&self) -> bool {
        self.committees_open
    }

    pub fn mobile_menu_open(&self) -> bool {
        self.mobile_menu_open
    }

    pub fn panel(&self) -> SidePanel {
        self.panel
    }

    /// Whether the submenu entries are visible right now.
    pub fn submenu_visible(&self) -> bool {
        match self.layout {
            MenuLayout::TopBar => self.committees_open,
            MenuLayout::SidePanel => self.committees_open && !self.panel.collapsed,
        }
    }

    pub fn is_narrow(&self) -> bool {
        self.viewport_width
            .is_some_and(|width| width < self.narrow_width)
    }

    /// Back to the default view with every menu closed, keeping the layout
    /// and viewport. Used after login.
    pub fn reset(&mut self) {
        self.active = Route::default();
        self.committees_open = false;
        self.mobile_menu_open = false;
        if self.panel.expanded_for_submenu {
            self.panel.collapsed = true;
            self.panel.expanded_for_submenu = false;
        }
    }

    pub fn navigate(&mut self, route: Route) {
        self.handle(NavEvent::Navigate(route));
    }

    /// The transition function.
    pub fn handle(&mut self, event: NavEvent) {
        match event {
            NavEvent::Navigate(route) => self.on_navigate(route),
            NavEvent::ToggleCommitteesMenu => self.on_toggle_committees(),
            NavEvent::ToggleMobileMenu => self.mobile_menu_open = !self.mobile_menu_open,
            NavEvent::TogglePanel => {
                self.panel.collapsed = !self.panel.collapsed;
                // A manual toggle takes ownership of the panel state
                self.panel.expanded_for_submenu = false;
            }
            NavEvent::ViewportResized { width } => self.viewport_width = Some(width),
        }
        debug!(?event, active = self.active.key(), "Navigation event handled");
    }

    fn on_navigate(&mut self, route: Route) {
        self.active = route;

        match self.layout {
            MenuLayout::TopBar => {
                self.committees_open = false;
                self.mobile_menu_open = false;
            }
            MenuLayout::SidePanel => {
                if !route.is_committee() {
                    self.committees_open = false;
                    if self.panel.expanded_for_submenu {
                        self.panel.collapsed = true;
                        self.panel.expanded_for_submenu = false;
                    }
                }
                if self.is_narrow() {
                    self.panel.collapsed = true;
                    self.panel.expanded_for_submenu = false;
                }
            }
        }
    }

    fn on_toggle_committees(&mut self) {
        match self.layout {
            MenuLayout::TopBar => self.committees_open = !self.committees_open,
            MenuLayout::SidePanel => {
                if self.panel.collapsed {
                    self.panel.collapsed = false;
                    self.panel.expanded_for_submenu = true;
                    self.committees_open = true;
                } else {
                    self.panel.expanded_for_submenu = false;
                    self.committees_open = !self.committees_open;
                }
            }
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(MenuLayout::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_keys_round_trip() {
        for route in Route::variants() {
            assert_eq!(Route::from_key(route.key()), Some(*route));
        }
        assert_eq!(Route::from_key("comites-todos"), None);
    }

    #[test]
    fn test_starts_on_dashboard() {
        let nav = Navigator::default();
        assert_eq!(nav.active(), Route::Dashboard);
        assert!(!nav.committees_open());
    }

    #[test]
    fn test_top_bar_closes_menus_on_every_navigation() {
        let mut nav = Navigator::new(MenuLayout::TopBar);
        nav.handle(NavEvent::ToggleMobileMenu);
        nav.handle(NavEvent::ToggleCommitteesMenu);
        assert!(nav.submenu_visible());

        nav.navigate(Route::AllCommittees);

        assert_eq!(nav.active(), Route::AllCommittees);
        assert!(nav.committees_active());
        assert!(!nav.committees_open());
        assert!(!nav.mobile_menu_open());
    }

    #[test]
    fn test_side_panel_submenu_stays_open_inside_committees() {
        let mut nav = Navigator::new(MenuLayout::SidePanel);
        nav.handle(NavEvent::ToggleCommitteesMenu);
        nav.navigate(Route::MyCommittee);
        assert!(nav.committees_open());

        nav.navigate(Route::Dashboard);
        assert!(!nav.committees_open());
    }

    #[test]
    fn test_temporary_expansion_restores_collapsed_panel() {
        let mut nav = Navigator::new(MenuLayout::SidePanel).with_collapsed_panel(true);

        nav.handle(NavEvent::ToggleCommitteesMenu);
        assert!(!nav.panel().collapsed);
        assert!(nav.panel().expanded_for_submenu);
        assert!(nav.submenu_visible());

        nav.navigate(Route::MyCommittee);
        assert!(!nav.panel().collapsed);

        nav.navigate(Route::Dashboard);
        assert!(nav.panel().collapsed);
        assert!(!nav.panel().expanded_for_submenu);
    }

    #[test]
    fn test_expanded_panel_is_not_collapsed_on_leaving_submenu() {
        let mut nav = Navigator::new(MenuLayout::SidePanel);
        nav.handle(NavEvent::ToggleCommitteesMenu);
        nav.navigate(Route::MyCommittee);
        nav.navigate(Route::Dashboard);
        assert!(!nav.panel().collapsed);
    }

    #[test]
    fn test_manual_toggle_clears_temporary_expansion() {
        let mut nav = Navigator::new(MenuLayout::SidePanel).with_collapsed_panel(true);
        nav.handle(NavEvent::ToggleCommitteesMenu);
        nav.handle(NavEvent::TogglePanel);
        nav.handle(NavEvent::TogglePanel);
        assert!(!nav.panel().expanded_for_submenu);

        nav.navigate(Route::Dashboard);
        assert!(!nav.panel().collapsed);
    }

    #[test]
    fn test_narrow_viewport_collapses_panel_on_navigation() {
        let mut nav = Navigator::new(MenuLayout::SidePanel).with_narrow_width(800);
        nav.handle(NavEvent::ViewportResized { width: 1280 });
        nav.navigate(Route::AllCommittees);
        assert!(!nav.panel().collapsed);

        nav.handle(NavEvent::ViewportResized { width: 600 });
        assert!(nav.is_narrow());
        nav.navigate(Route::MyCommittee);
        assert!(nav.panel().collapsed);
    }

    #[test]
    fn test_reset_returns_to_dashboard_and_restores_panel() {
        let mut nav = Navigator::new(MenuLayout::SidePanel).with_collapsed_panel(true);
        nav.handle(NavEvent::ToggleCommitteesMenu);
        nav.navigate(Route::AllCommittees);

        nav.reset();

        assert_eq!(nav.active(), Route::Dashboard);
        assert!(nav.panel().collapsed);
        assert!(!nav.committees_open());
    }
}
