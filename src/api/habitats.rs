use serde::Serialize;

use crate::api::client::ApiClient;
use crate::api::dto::{
    Habitat, HabitatCreateAck, HabitatDoc, HabitatDraft, HabitatUpdateAck, HabitatsPage,
    SelectOption,
};
use crate::api::error::ApiError;

#[derive(Serialize)]
struct SearchRequest<'a> {
    search: &'a str,
}

/// Typed gateway for the `/habitats` endpoints. The collection endpoint
/// doubles as typeahead search when POSTed a `{search}` body.
#[derive(Clone)]
pub struct HabitatsApi {
    client: ApiClient,
}

impl HabitatsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// One page of habitats. Token-gated like every listing.
    pub async fn list(&self, page: u32) -> Result<HabitatsPage, ApiError> {
        self.client.require_token()?;
        self.client
            .get_json(
                "habitats",
                &["habitats"],
                &[("page", page.max(1).to_string())],
            )
            .await
    }

    pub async fn get(&self, id: u64) -> Result<Habitat, ApiError> {
        let doc: HabitatDoc = self
            .client
            .get_json("habitat", &["habitats", &id.to_string()], &[])
            .await?;
        Ok(doc.habitat)
    }

    /// Returns the created habitat in full (the form appends it to its
    /// selector options).
    pub async fn create(&self, draft: &HabitatDraft) -> Result<Habitat, ApiError> {
        let ack: HabitatCreateAck = self.client.post_json("habitat", &["habitats"], draft).await?;
        Ok(ack.habitat)
    }

    /// Returns the id of the updated habitat.
    pub async fn update(&self, id: u64, draft: &HabitatDraft) -> Result<u64, ApiError> {
        let ack: HabitatUpdateAck = self
            .client
            .patch_json("habitat", &["habitats", &id.to_string()], draft)
            .await?;
        Ok(ack.habitat)
    }

    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.client
            .delete("habitat", &["habitats", &id.to_string()])
            .await
    }

    /// Free-text typeahead over habitat names, mapped to selector options.
    pub async fn search(&self, query: &str) -> Result<Vec<SelectOption>, ApiError> {
        let page: HabitatsPage = self
            .client
            .post_json(
                "habitat search",
                &["habitats"],
                &SearchRequest { search: query },
            )
            .await?;
        Ok(page.habitats.iter().map(SelectOption::from).collect())
    }
}
