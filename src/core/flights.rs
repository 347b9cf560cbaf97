use crate::core::client::ApiClient;
use crate::domain::model::ResultSet;
use crate::domain::ports::{FlightSearch, Notifier, TokenStore};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Flight search requests against the configured flight endpoint.
pub struct FlightClient<S: TokenStore, N: Notifier> {
    client: ApiClient<S, N>,
    base_endpoint: String,
}

impl<S: TokenStore, N: Notifier> FlightClient<S, N> {
    pub fn new(client: ApiClient<S, N>) -> Self {
        let base_endpoint = client.config().flight_endpoint.clone();
        Self {
            client,
            base_endpoint,
        }
    }

    pub fn client(&self) -> &ApiClient<S, N> {
        &self.client
    }

    pub fn search_endpoint(&self, term: &str) -> String {
        format!(
            "{}/search?term={}",
            self.base_endpoint,
            urlencoding::encode(term)
        )
    }

    /// An empty `term` means no filter.
    pub async fn get_flights_by_country(&self, term: &str) -> Result<ResultSet> {
        let endpoint = self.search_endpoint(term);

        match self.client.get::<ResultSet>(&endpoint).await {
            Ok(results) => {
                tracing::debug!("Fetched {} countries for '{}'", results.len(), term);
                Ok(results)
            }
            Err(e) => {
                tracing::error!("Error fetching flights: {}", e);
                Err(e)
            }
        }
    }
}

#[async_trait]
impl<S: TokenStore, N: Notifier> FlightSearch for FlightClient<S, N> {
    async fn flights_by_country(&self, term: &str) -> Result<ResultSet> {
        self.get_flights_by_country(term).await
    }
}
