/*
 * Responsibility
 * - Delete control: loading flag + error slot, parent-list navigation on
 *   success (a failed delete stays on the screen with the error shown)
 */
use crate::api::birds::BirdsApi;
use crate::api::habitats::HabitatsApi;
use crate::ui::nav::{Nav, Route};

#[derive(Default)]
pub struct DeleteControl {
    pub loading: bool,
    pub error: Option<String>,
}

impl DeleteControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn delete_bird(&mut self, api: &BirdsApi, id: u64, nav: &mut Nav) -> bool {
        self.error = None;
        self.loading = true;
        let result = api.delete(id).await;
        self.loading = false;

        match result {
            Ok(()) => {
                nav.push(Route::Birds { page: 1 });
                true
            }
            Err(e) => {
                tracing::error!(error = %e, bird = id, "delete failed");
                self.error = Some(e.to_string());
                false
            }
        }
    }

    pub async fn delete_habitat(&mut self, api: &HabitatsApi, id: u64, nav: &mut Nav) -> bool {
        self.error = None;
        self.loading = true;
        let result = api.delete(id).await;
        self.loading = false;

        match result {
            Ok(()) => {
                nav.push(Route::Habitats { page: 1 });
                true
            }
            Err(e) => {
                tracing::error!(error = %e, habitat = id, "delete failed");
                self.error = Some(e.to_string());
                false
            }
        }
    }
}
