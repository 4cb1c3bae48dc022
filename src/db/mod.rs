pub mod submissions;

use async_trait::async_trait;

use crate::models::Submission;

pub use submissions::{DisconnectedStore, MongoSubmissionStore};

/// Append-only home for submissions. The store assigns record identity.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn insert(&self, submission: &Submission) -> Result<(), String>;

    /// Round-trip to the backend to check the connection is alive.
    async fn ping(&self) -> Result<(), String>;
}
