#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use contact_relay::config::{Config, MongoConfig, SmtpConfig, StartupPolicy, VerifierConfig};
use contact_relay::db::SubmissionStore;
use contact_relay::email::Mailer;
use contact_relay::models::Submission;
use contact_relay::state::AppState;
use contact_relay::verifier::{EmailVerifier, Verification};

/// Shared, ordered record of which collaborator was called.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<&'static str>>>);

impl CallLog {
    pub fn push(&self, call: &'static str) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().clone()
    }
}

pub struct FakeVerifier {
    log: CallLog,
    outcome: Result<bool, String>,
    pub seen: Mutex<Vec<String>>,
}

#[async_trait]
impl EmailVerifier for FakeVerifier {
    async fn verify(&self, email: &str) -> Result<Verification, String> {
        self.log.push("verify");
        self.seen.lock().unwrap().push(email.to_string());
        self.outcome
            .clone()
            .map(|is_verified| Verification { is_verified })
    }
}

pub struct FakeStore {
    log: CallLog,
    failure: Option<String>,
    pub records: Mutex<Vec<Submission>>,
}

impl FakeStore {
    pub fn records(&self) -> Vec<Submission> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionStore for FakeStore {
    async fn insert(&self, submission: &Submission) -> Result<(), String> {
        self.log.push("insert");
        if let Some(e) = &self.failure {
            return Err(e.clone());
        }
        self.records.lock().unwrap().push(submission.clone());
        Ok(())
    }

    async fn ping(&self) -> Result<(), String> {
        Ok(())
    }
}

pub struct FakeMailer {
    log: CallLog,
    failure: Option<String>,
    pub sent: Mutex<Vec<Submission>>,
}

impl FakeMailer {
    pub fn sent(&self) -> Vec<Submission> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn send_notification(&self, submission: &Submission) -> Result<(), String> {
        self.log.push("send");
        if let Some(e) = &self.failure {
            return Err(e.clone());
        }
        self.sent.lock().unwrap().push(submission.clone());
        Ok(())
    }
}

/// How the fake collaborators should behave for one test.
pub struct Scenario {
    pub verified: Result<bool, String>,
    pub store_failure: Option<String>,
    pub mail_failure: Option<String>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            verified: Ok(true),
            store_failure: None,
            mail_failure: None,
        }
    }
}

/// A running test server wired to in-memory collaborators.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub log: CallLog,
    pub verifier: Arc<FakeVerifier>,
    pub store: Arc<FakeStore>,
    pub mailer: Arc<FakeMailer>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Post a JSON body to `/send-email`, return (body, status).
    pub async fn send_json(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/send-email"))
            .json(data)
            .send()
            .await
            .expect("send-email request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Post a raw body with an explicit content type, return (body, status).
    pub async fn send_raw(&self, content_type: &str, body: impl Into<reqwest::Body>) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/send-email"))
            .header("content-type", content_type)
            .body(body)
            .send()
            .await
            .expect("send-email request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        max_body_size: 65_536,
        cors_origins: vec![],
        startup_policy: StartupPolicy::FailFast,
        log_level: "warn".to_string(),
        mongo: MongoConfig {
            username: "tester".to_string(),
            password: "secret".to_string(),
            cluster_host: "cluster0.example.mongodb.net".to_string(),
            app_name: "Cluster0".to_string(),
            database: "portfolio".to_string(),
            collection: "emails".to_string(),
            uri_override: None,
        },
        smtp: SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            user: "me@example.com".to_string(),
            pass: "app-password".to_string(),
            to: "me@example.com".to_string(),
            brand: "My Portfolio".to_string(),
        },
        verifier: VerifierConfig {
            api_key: "test-key".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: Some(2),
        },
    }
}

/// Spawn the app with fake collaborators behaving as `scenario` describes.
pub async fn spawn_app(scenario: Scenario) -> TestApp {
    let log = CallLog::default();
    let verifier = Arc::new(FakeVerifier {
        log: log.clone(),
        outcome: scenario.verified,
        seen: Mutex::new(vec![]),
    });
    spawn_with(
        test_config(),
        log,
        verifier.clone(),
        verifier,
        scenario.store_failure,
        scenario.mail_failure,
    )
    .await
}

/// Spawn the app with happy-path fakes and a caller-supplied config.
pub async fn spawn_app_with_config(config: Config) -> TestApp {
    let log = CallLog::default();
    let verifier = Arc::new(FakeVerifier {
        log: log.clone(),
        outcome: Ok(true),
        seen: Mutex::new(vec![]),
    });
    spawn_with(config, log, verifier.clone(), verifier, None, None).await
}

/// Spawn the app with a caller-supplied verifier, e.g. the real HTTP client
/// pointed at a mock provider.
pub async fn spawn_app_with_verifier(verifier: Arc<dyn EmailVerifier>) -> TestApp {
    let log = CallLog::default();
    let unused = Arc::new(FakeVerifier {
        log: log.clone(),
        outcome: Ok(true),
        seen: Mutex::new(vec![]),
    });
    spawn_with(test_config(), log, unused, verifier, None, None).await
}

async fn spawn_with(
    config: Config,
    log: CallLog,
    fake_verifier: Arc<FakeVerifier>,
    verifier: Arc<dyn EmailVerifier>,
    store_failure: Option<String>,
    mail_failure: Option<String>,
) -> TestApp {
    let store = Arc::new(FakeStore {
        log: log.clone(),
        failure: store_failure,
        records: Mutex::new(vec![]),
    });
    let mailer = Arc::new(FakeMailer {
        log: log.clone(),
        failure: mail_failure,
        sent: Mutex::new(vec![]),
    });

    let state = AppState {
        config,
        verifier,
        store: store.clone(),
        mailer: mailer.clone(),
    };

    let addr = serve(state).await;

    TestApp {
        addr,
        client: Client::new(),
        log,
        verifier: fake_verifier,
        store,
        mailer,
    }
}

/// Bind the app to a random port and serve it in the background.
pub async fn serve(state: AppState) -> SocketAddr {
    let app = contact_relay::build_app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    addr
}
