pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{ConsoleNotifier, LocalStorage, MemoryStore, NoopNotifier, TracingNotifier};
pub use config::toml_config::AppConfig;
pub use config::ClientConfig;
pub use self::core::{
    client::{ApiClient, RequestOptions},
    flights::FlightClient,
    lookup::{AirportCode, LookupPage},
    render::OutputFormat,
    search_view::SearchView,
};
pub use utils::error::{Result, SearchError};
