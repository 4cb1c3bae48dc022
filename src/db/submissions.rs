use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use tracing::{debug, error};

use super::SubmissionStore;
use crate::config::MongoConfig;
use crate::models::Submission;

pub struct MongoSubmissionStore {
    database: Database,
    collection: Collection<Submission>,
}

impl MongoSubmissionStore {
    /// Build a client for the configured deployment. The driver connects
    /// lazily, so this only fails on a malformed URI or SRV lookup error;
    /// call [`SubmissionStore::ping`] to find out if the server is reachable.
    pub async fn connect(config: &MongoConfig) -> Result<Self, String> {
        debug!(database = %config.database, collection = %config.collection, "Creating MongoDB client");

        let options = ClientOptions::parse(config.connection_uri()).await.map_err(|e| {
            error!("Failed to parse MongoDB URI: {e}");
            format!("Failed to parse MongoDB URI: {e}")
        })?;

        let client = Client::with_options(options).map_err(|e| {
            error!("Failed to create MongoDB client: {e}");
            format!("Failed to create MongoDB client: {e}")
        })?;

        let database = client.database(&config.database);
        let collection = database.collection::<Submission>(&config.collection);

        Ok(Self {
            database,
            collection,
        })
    }
}

#[async_trait]
impl SubmissionStore for MongoSubmissionStore {
    async fn insert(&self, submission: &Submission) -> Result<(), String> {
        self.collection
            .insert_one(submission)
            .await
            .map_err(|e| format!("Failed to store submission: {e}"))?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), String> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| format!("MongoDB ping failed: {e}"))?;

        Ok(())
    }
}

/// Stand-in used when the service starts without a storage connection.
pub struct DisconnectedStore {
    reason: String,
}

impl DisconnectedStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl SubmissionStore for DisconnectedStore {
    async fn insert(&self, _submission: &Submission) -> Result<(), String> {
        Err(format!("Storage is unavailable: {}", self.reason))
    }

    async fn ping(&self) -> Result<(), String> {
        Err(format!("Storage is unavailable: {}", self.reason))
    }
}
