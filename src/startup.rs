use std::sync::Arc;

use crate::config::{Config, StartupPolicy};
use crate::db::{DisconnectedStore, MongoSubmissionStore, SubmissionStore};
use crate::email::SmtpMailer;
use crate::state::AppState;
use crate::verifier::HttpVerifier;

/// Build every collaborator once. Storage failures are resolved through the
/// configured [`StartupPolicy`]; any other failure aborts startup.
pub async fn build_state(config: Config) -> Result<AppState, String> {
    let verifier = HttpVerifier::new(&config.verifier)?;
    let mailer = SmtpMailer::new(&config.smtp)?;
    tracing::info!(relay = %config.smtp.host, "SMTP transport configured");

    let store = open_store(&config).await?;

    Ok(AppState {
        config,
        verifier: Arc::new(verifier),
        store,
        mailer: Arc::new(mailer),
    })
}

/// Connect to MongoDB and ping the deployment.
pub async fn open_store(config: &Config) -> Result<Arc<dyn SubmissionStore>, String> {
    let connected = async {
        let store = MongoSubmissionStore::connect(&config.mongo).await?;
        store.ping().await?;
        Ok::<_, String>(store)
    }
    .await;

    match connected {
        Ok(store) => {
            tracing::info!("Pinged your deployment. You successfully connected to MongoDB!");
            Ok(Arc::new(store))
        }
        Err(e) => {
            tracing::error!("Error connecting to MongoDB: {e}");
            on_storage_failure(config.startup_policy, e)
        }
    }
}

pub fn on_storage_failure(
    policy: StartupPolicy,
    reason: String,
) -> Result<Arc<dyn SubmissionStore>, String> {
    match policy {
        StartupPolicy::FailFast => Err(reason),
        StartupPolicy::Degrade => {
            tracing::warn!("Serving without storage; submissions will fail until restart");
            Ok(Arc::new(DisconnectedStore::new(reason)))
        }
    }
}
