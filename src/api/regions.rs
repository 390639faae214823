use crate::api::client::ApiClient;
use crate::api::dto::{Region, RegionList, SelectOption};
use crate::api::error::ApiError;

/// Typed gateway for the `/regions` endpoint. Regions are reference data:
/// unpaginated, read-only from this client's point of view.
#[derive(Clone)]
pub struct RegionsApi {
    client: ApiClient,
}

impl RegionsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Region>, ApiError> {
        let list: RegionList = self.client.get_json("regions", &["regions"], &[]).await?;
        Ok(list.regions)
    }

    /// Regions as selector options for the habitat form.
    pub async fn options(&self) -> Result<Vec<SelectOption>, ApiError> {
        let regions = self.list().await?;
        Ok(regions.iter().map(SelectOption::from).collect())
    }
}
