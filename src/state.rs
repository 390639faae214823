/*
 * Responsibility
 * - Shared application graph: session manager + resource gateways
 * - Built once from Config; everything downstream receives it explicitly
 */
use std::sync::Arc;

use crate::api::birds::BirdsApi;
use crate::api::client::ApiClient;
use crate::api::habitats::HabitatsApi;
use crate::api::regions::RegionsApi;
use crate::config::Config;
use crate::error::AppError;
use crate::services::auth::provider::PasswordGrantProvider;
use crate::session::{SessionHandle, SessionManager};

pub struct AppState {
    pub session: SessionManager,
    pub birds: BirdsApi,
    pub habitats: HabitatsApi,
    pub regions: RegionsApi,
}

impl AppState {
    pub fn build(config: &Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder().build()?;

        let provider = PasswordGrantProvider::new(http.clone(), config.token_url()?, config);
        let session = SessionManager::new(Arc::new(provider));

        let client = ApiClient::new(http, config.api_base_url.clone(), session.handle());
        Ok(Self {
            birds: BirdsApi::new(client.clone()),
            habitats: HabitatsApi::new(client.clone()),
            regions: RegionsApi::new(client),
            session,
        })
    }

    pub fn session_handle(&self) -> SessionHandle {
        self.session.handle()
    }
}
