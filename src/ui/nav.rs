/*
 * Responsibility
 * - Routes: query parameters double as application state (?bird=, ?habitat=)
 * - Nav: history stack with full and shallow pushes
 */
use std::fmt;

/// Screens of the console. An absent id on a form route means create mode,
/// a present id edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Birds { page: u32 },
    BirdForm { bird: Option<u64> },
    Habitats { page: u32 },
    HabitatForm { habitat: Option<u64> },
    Regions,
}

impl Route {
    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Birds { page: 1 } => "/birds".to_string(),
            Route::Birds { page } => format!("/birds?page={page}"),
            Route::BirdForm { bird: None } => "/birds/form".to_string(),
            Route::BirdForm { bird: Some(id) } => format!("/birds/form?bird={id}"),
            Route::Habitats { page: 1 } => "/habitats".to_string(),
            Route::Habitats { page } => format!("/habitats?page={page}"),
            Route::HabitatForm { habitat: None } => "/habitats/form".to_string(),
            Route::HabitatForm { habitat: Some(id) } => format!("/habitats/form?habitat={id}"),
            Route::Regions => "/regions".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

/// In-memory history. `push` schedules a reload of the new route;
/// `push_shallow` updates route state without one (the screen that
/// navigated keeps its own state); `replace` swaps the current entry.
#[derive(Debug)]
pub struct Nav {
    entries: Vec<Route>,
    reload_pending: bool,
}

impl Nav {
    pub fn new() -> Self {
        Self {
            entries: vec![Route::Home],
            reload_pending: false,
        }
    }

    pub fn current(&self) -> &Route {
        // entries is never empty: constructed with Home and only pushed to
        self.entries.last().unwrap_or(&Route::Home)
    }

    pub fn push(&mut self, route: Route) {
        self.entries.push(route);
        self.reload_pending = true;
    }

    pub fn push_shallow(&mut self, route: Route) {
        self.entries.push(route);
    }

    pub fn replace(&mut self, route: Route) {
        self.entries.pop();
        self.entries.push(route);
        self.reload_pending = true;
    }

    /// True once per full navigation; shallow pushes never set it.
    pub fn take_reload(&mut self) -> bool {
        std::mem::take(&mut self.reload_pending)
    }
}

impl Default for Nav {
    fn default() -> Self {
        Self::new()
    }
}
