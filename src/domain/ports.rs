use crate::domain::model::{Notification, ResultSet};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Key/value persistence for client-side state such as the auth token.
pub trait TokenStore: Send + Sync {
    fn get_item(&self, key: &str)
        -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set_item(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove_item(&self, key: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Receives alerts for failed requests. Fire-and-forget.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

#[async_trait]
pub trait FlightSearch: Send + Sync {
    async fn flights_by_country(&self, term: &str) -> Result<ResultSet>;
}
