use crate::api::client::ApiClient;
use crate::api::dto::{Bird, BirdDoc, BirdDraft, BirdMutationAck, BirdsPage};
use crate::api::error::ApiError;

/// Typed gateway for the `/birds` endpoints.
#[derive(Clone)]
pub struct BirdsApi {
    client: ApiClient,
}

impl BirdsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// One page of birds (page size fixed server-side at 10, 1-based).
    /// Listing is token-gated: with no token held, no request is sent.
    pub async fn list(&self, page: u32) -> Result<BirdsPage, ApiError> {
        self.client.require_token()?;
        self.client
            .get_json("birds", &["birds"], &[("page", page.max(1).to_string())])
            .await
    }

    pub async fn get(&self, id: u64) -> Result<Bird, ApiError> {
        let doc: BirdDoc = self
            .client
            .get_json("bird", &["birds", &id.to_string()], &[])
            .await?;
        Ok(doc.bird)
    }

    /// Returns the id of the created bird.
    pub async fn create(&self, draft: &BirdDraft) -> Result<u64, ApiError> {
        let ack: BirdMutationAck = self.client.post_json("bird", &["birds"], draft).await?;
        Ok(ack.bird)
    }

    /// Returns the id of the updated bird.
    pub async fn update(&self, id: u64, draft: &BirdDraft) -> Result<u64, ApiError> {
        let ack: BirdMutationAck = self
            .client
            .patch_json("bird", &["birds", &id.to_string()], draft)
            .await?;
        Ok(ack.bird)
    }

    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.client.delete("bird", &["birds", &id.to_string()]).await
    }
}
