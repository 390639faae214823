/*
 * Responsibility
 * - List screens: 1-based local page counter, token-gated loads,
 *   one error slot and one loading flag each
 */
use crate::api::birds::BirdsApi;
use crate::api::dto::{BirdsPage, HabitatsPage};
use crate::api::habitats::HabitatsApi;
use crate::session::SessionHandle;

pub const PAGE_SIZE: u64 = 10;

/// Pages shown by the pagination control. Falls back to 10 while the
/// server has not reported a total yet.
pub fn page_count(total: Option<u64>) -> u64 {
    match total {
        Some(total) if total > 0 => total.div_ceil(PAGE_SIZE),
        _ => 10,
    }
}

pub struct BirdListScreen {
    api: BirdsApi,
    session: SessionHandle,
    pub page: u32,
    pub data: Option<BirdsPage>,
    pub loading: bool,
    pub error: Option<String>,
}

impl BirdListScreen {
    pub fn new(api: BirdsApi, session: SessionHandle) -> Self {
        Self {
            api,
            session,
            page: 1,
            data: None,
            loading: false,
            error: None,
        }
    }

    /// Fetch the current page. With no token held nothing is fetched and
    /// the screen renders its no-data warning.
    pub async fn load(&mut self) {
        self.error = None;
        if !self.session.current().is_authenticated() {
            self.data = None;
            return;
        }

        self.loading = true;
        match self.api.list(self.page).await {
            Ok(page) => self.data = Some(page),
            Err(e) => self.error = Some(e.to_string()),
        }
        self.loading = false;
    }

    /// Changing page always re-fetches; previously seen pages are not
    /// cached.
    pub async fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
        self.load().await;
    }

    pub fn page_count(&self) -> u64 {
        page_count(self.data.as_ref().and_then(|d| d.total_birds))
    }
}

pub struct HabitatListScreen {
    api: HabitatsApi,
    session: SessionHandle,
    pub page: u32,
    pub data: Option<HabitatsPage>,
    pub loading: bool,
    pub error: Option<String>,
}

impl HabitatListScreen {
    pub fn new(api: HabitatsApi, session: SessionHandle) -> Self {
        Self {
            api,
            session,
            page: 1,
            data: None,
            loading: false,
            error: None,
        }
    }

    pub async fn load(&mut self) {
        self.error = None;
        if !self.session.current().is_authenticated() {
            self.data = None;
            return;
        }

        self.loading = true;
        match self.api.list(self.page).await {
            Ok(page) => self.data = Some(page),
            Err(e) => self.error = Some(e.to_string()),
        }
        self.loading = false;
    }

    pub async fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
        self.load().await;
    }

    pub fn page_count(&self) -> u64 {
        page_count(self.data.as_ref().and_then(|d| d.total_habitats))
    }
}
