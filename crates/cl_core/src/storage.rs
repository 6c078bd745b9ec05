use std::time::SystemTime;

use async_trait::async_trait;

use crate::types::StoreRecord;
use crate::Result;

/// Persistence seam between the scrape run (single writer) and the display
/// collaborator (readers). One snapshot, replaced wholesale per run.
#[async_trait]
pub trait SnapshotStorage: Send + Sync {
    /// Replace the snapshot with exactly these records.
    async fn save_all(&self, records: &[StoreRecord]) -> Result<()>;

    /// Load every record from the current snapshot. An absent snapshot is
    /// `Error::SnapshotMissing`, a distinct state from an empty run.
    async fn load_all(&self) -> Result<Vec<StoreRecord>>;

    /// Last modification time of the snapshot, `None` when absent. Readers
    /// compare this to invalidate their caches.
    async fn modified_time(&self) -> Result<Option<SystemTime>>;
}
