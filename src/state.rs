use std::sync::Arc;

use crate::config::Config;
use crate::db::SubmissionStore;
use crate::email::Mailer;
use crate::verifier::EmailVerifier;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub verifier: Arc<dyn EmailVerifier>,
    pub store: Arc<dyn SubmissionStore>,
    pub mailer: Arc<dyn Mailer>,
}
