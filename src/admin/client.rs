// src/admin/client.rs
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use super::types::{
    City, Country, ListQuery, OccupationProfession, Page, Province, ReferenceData, Resource,
};
use crate::utils::config::AdminConfig;
use crate::utils::error::{KycError, Result};

/// HTTP client for the console's backend collections: plain CRUD plus the
/// enhanced paginated listing.
pub struct AdminClient {
    client: reqwest::Client,
    base_url: String,
}

impl AdminClient {
    pub fn new(config: &AdminConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| KycError::Backend(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn list<T: DeserializeOwned>(
        &self,
        resource: Resource,
        query: &ListQuery,
    ) -> Result<Page<T>> {
        let response = self
            .client
            .get(self.url(&format!("/{}/paginated/enhanced", resource.path())))
            .query(&query.to_query_pairs())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(KycError::Backend(format!(
                "listing {} returned {}",
                resource.path(),
                response.status()
            )));
        }
        Ok(response.json().await?)
    }

    pub async fn get<T: DeserializeOwned>(&self, resource: Resource, id: &str) -> Result<T> {
        let response = self
            .client
            .get(self.url(&format!("/{}/{}", resource.path(), id)))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(KycError::Backend(format!(
                "fetching {}/{} returned {}",
                resource.path(),
                id,
                response.status()
            )));
        }
        Ok(response.json().await?)
    }

    pub async fn create<B, T>(&self, resource: Resource, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.url(&format!("/{}", resource.path())))
            .json(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(KycError::Backend(format!(
                "creating {} returned {}",
                resource.path(),
                response.status()
            )));
        }
        Ok(response.json().await?)
    }

    pub async fn update<B, T>(&self, resource: Resource, id: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .put(self.url(&format!("/{}/{}", resource.path(), id)))
            .json(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(KycError::Backend(format!(
                "updating {}/{} returned {}",
                resource.path(),
                id,
                response.status()
            )));
        }
        Ok(response.json().await?)
    }

    pub async fn delete(&self, resource: Resource, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/{}/{}", resource.path(), id)))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(KycError::Backend(format!(
                "deleting {}/{} returned {}",
                resource.path(),
                id,
                response.status()
            )));
        }
        info!("Deleted {}/{}", resource.path(), id);
        Ok(())
    }

    /// Address reference data for the user-info form, fetched concurrently.
    pub async fn reference_data(&self) -> Result<ReferenceData> {
        let query = ListQuery::fetch_all();
        let (countries, provinces, cities) = futures::try_join!(
            self.list::<Country>(Resource::Countries, &query),
            self.list::<Province>(Resource::Provinces, &query),
            self.list::<City>(Resource::Cities, &query),
        )?;
        Ok(ReferenceData {
            countries: countries.items,
            provinces: provinces.items,
            cities: cities.items,
        })
    }

    /// The occupation/profession taxonomy the review step offers.
    pub async fn taxonomy(&self) -> Result<Vec<OccupationProfession>> {
        let page = self
            .list::<OccupationProfession>(Resource::OccupationsProfessions, &ListQuery::fetch_all())
            .await?;
        Ok(page.items)
    }
}
