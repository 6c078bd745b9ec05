pub mod article;
pub mod config;
pub mod date;
pub mod fetch;
pub mod images;
pub mod listing;
pub mod manager;
pub mod section;

pub use config::ScrapeConfig;
pub use fetch::{Fetch, HttpFetcher};
pub use manager::ScrapeManager;

pub mod prelude {
    pub use super::config::ScrapeConfig;
    pub use super::manager::ScrapeManager;
    pub use cl_core::{Error, Result, ScrapeOutcome, StoreRecord};
}
