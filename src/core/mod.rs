pub mod client;
pub mod flights;
pub mod lookup;
pub mod render;
pub mod search_view;

pub use crate::domain::model::{FlightCountEntry, Notification, ResultSet};
pub use crate::domain::ports::{FlightSearch, Notifier, TokenStore};
pub use crate::utils::error::Result;
