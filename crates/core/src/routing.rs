//! Client-side router mode, used when the server or the gate has to name a
//! page path (login redirects, dashboard redirects).

pub const ADMIN_LOGIN_PATH: &str = "/admin/login";
pub const ADMIN_DASHBOARD_PATH: &str = "/admin";

/// Whether the site is served with history-API paths or hash fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouterMode {
    #[default]
    Browser,
    Hash,
}

impl RouterMode {
    /// `USE_HASH_ROUTER=true` selects hash routing; anything else is browser.
    pub fn from_flag(raw: Option<&str>) -> Self {
        match raw.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "true" || v == "1" => RouterMode::Hash,
            _ => RouterMode::Browser,
        }
    }

    /// Render an application route as a location the browser can follow.
    pub fn href(self, route: &str) -> String {
        match self {
            RouterMode::Browser => route.to_string(),
            RouterMode::Hash => format!("/#{route}"),
        }
    }
}
