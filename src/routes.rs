//! Route table and access-control rules.
//!
//! SYSTEM CONTEXT
//! ==============
//! The Leptos router renders pages; [`resolve`] decides whether a path may be
//! rendered for the current session, or where to send the visitor instead.
//! Public pages are always reachable. Protected pages need a login.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::state::session::SessionState;

pub const LANDING_PATH: &str = "/";
pub const LEGAL_PATH: &str = "/legal";
pub const LOGIN_PATH: &str = "/login";
pub const ONBOARDING_PATH: &str = "/onboarding";
pub const HOME_PATH: &str = "/home";
pub const REFLECT_PATH: &str = "/reflect";
pub const COMMUNITY_PATH: &str = "/community";
pub const ME_PATH: &str = "/me";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Landing,
    Legal,
    Login,
    Onboarding,
    Home,
    Reflect,
    Community,
    Me,
}

impl Page {
    pub const ALL: [Page; 8] = [
        Page::Landing,
        Page::Legal,
        Page::Login,
        Page::Onboarding,
        Page::Home,
        Page::Reflect,
        Page::Community,
        Page::Me,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Landing => LANDING_PATH,
            Self::Legal => LEGAL_PATH,
            Self::Login => LOGIN_PATH,
            Self::Onboarding => ONBOARDING_PATH,
            Self::Home => HOME_PATH,
            Self::Reflect => REFLECT_PATH,
            Self::Community => COMMUNITY_PATH,
            Self::Me => ME_PATH,
        }
    }

    pub fn is_protected(self) -> bool {
        matches!(self, Self::Home | Self::Reflect | Self::Community | Self::Me)
    }

    /// Exact match after dropping a trailing slash.
    pub fn from_path(path: &str) -> Option<Page> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { LANDING_PATH } else { trimmed };
        Self::ALL.into_iter().find(|p| p.path() == normalized)
    }
}

/// What the router should do with a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session not resolved yet; render nothing.
    Blank,
    Render(Page),
    Redirect(&'static str),
}

pub fn resolve(state: SessionState, path: &str) -> RouteDecision {
    let Some(logged_in) = state.is_logged_in() else {
        return RouteDecision::Blank;
    };
    match Page::from_path(path) {
        Some(page) if !page.is_protected() => RouteDecision::Render(page),
        Some(page) if logged_in => RouteDecision::Render(page),
        _ if !logged_in => RouteDecision::Redirect(LOGIN_PATH),
        _ => RouteDecision::Redirect(HOME_PATH),
    }
}

/// Entry in a navigation bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub page: Page,
}

/// Desktop top bar.
pub const TOP_NAV: [NavItem; 4] = [
    NavItem { label: "Home", page: Page::Home },
    NavItem { label: "Reflect", page: Page::Reflect },
    NavItem { label: "Community", page: Page::Community },
    NavItem { label: "Profile", page: Page::Me },
];

/// Mobile bottom bar.
pub const BOTTOM_NAV: [NavItem; 4] = [
    NavItem { label: "Home", page: Page::Home },
    NavItem { label: "Reflect", page: Page::Reflect },
    NavItem { label: "Community", page: Page::Community },
    NavItem { label: "Me", page: Page::Me },
];

/// Whether `item` is the active entry for the current pathname.
pub fn is_active(item: NavItem, pathname: &str) -> bool {
    Page::from_path(pathname) == Some(item.page)
}
