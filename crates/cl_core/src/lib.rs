pub mod error;
pub mod storage;
pub mod types;

pub use error::Error;
pub use storage::SnapshotStorage;
pub use types::{ScrapeOutcome, SkipReason, StoreRecord};

pub type Result<T> = std::result::Result<T, Error>;
