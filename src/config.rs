use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub cors_origins: Vec<String>,
    pub startup_policy: StartupPolicy,
    pub log_level: String,
    pub mongo: MongoConfig,
    pub smtp: SmtpConfig,
    pub verifier: VerifierConfig,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub username: String,
    pub password: String,
    pub cluster_host: String,
    pub app_name: String,
    pub database: String,
    pub collection: String,
    /// Full connection string, used as-is instead of the assembled Atlas URI.
    pub uri_override: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    /// Operator mailbox that receives every submission.
    pub to: String,
    /// Display name used in the From header.
    pub brand: String,
}

#[derive(Debug, Clone)]
pub struct VerifierConfig {
    pub api_key: String,
    pub base_url: String,
    /// Request timeout; `None` leaves the HTTP client's default (no timeout).
    pub timeout_secs: Option<u64>,
}

/// What to do when the storage connection cannot be established at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartupPolicy {
    /// Refuse to serve.
    FailFast,
    /// Serve anyway; submissions that reach persistence fail with a 500.
    Degrade,
}

impl MongoConfig {
    pub fn connection_uri(&self) -> String {
        if let Some(uri) = &self.uri_override {
            return uri.clone();
        }

        format!(
            "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority&appName={}",
            percent_encode(&self.username),
            percent_encode(&self.password),
            self.cluster_host,
            self.app_name
        )
    }
}

/// Userinfo encoding for the connection string. `byte_serialize` turns
/// spaces into `+`, which the driver would read literally.
fn percent_encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let env_required = |key: &str| {
            var(key).ok_or_else(|| format!("Missing required environment variable: {key}"))
        };
        let env_or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let host: IpAddr = env_or("HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid HOST: {e}"))?;

        let port: u16 = env_or("PORT", "5000")
            .parse()
            .map_err(|e| format!("Invalid PORT: {e}"))?;

        let max_body_size: usize = env_or("CONTACT_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid CONTACT_MAX_BODY_SIZE: {e}"))?;

        let cors_origins: Vec<String> = env_or("CONTACT_CORS_ORIGINS", "")
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();

        let startup_policy = StartupPolicy::parse(&env_or("CONTACT_STARTUP_POLICY", "fail-fast"))?;

        let log_level = env_or("CONTACT_LOG_LEVEL", "info");

        let mongo = MongoConfig {
            username: env_required("DB_USERNAME")?,
            password: env_required("DB_PASSWORD")?,
            cluster_host: env_or("DB_CLUSTER_HOST", "cluster0.whalj.mongodb.net"),
            app_name: env_or("DB_APP_NAME", "Cluster0"),
            database: env_or("DB_NAME", "portfolio"),
            collection: env_or("DB_COLLECTION", "emails"),
            uri_override: var("MONGODB_URI"),
        };

        let user = env_required("EMAIL_EMAIL")?;
        let smtp = SmtpConfig {
            host: env_or("EMAIL_SMTP_HOST", "smtp.gmail.com"),
            port: env_or("EMAIL_SMTP_PORT", "587")
                .parse()
                .map_err(|e| format!("Invalid EMAIL_SMTP_PORT: {e}"))?,
            pass: env_required("EMAIL_PASS")?,
            to: env_or("EMAIL_TO", &user),
            brand: env_or("EMAIL_BRAND", "My Portfolio"),
            user,
        };

        let verifier = VerifierConfig {
            api_key: env_required("EMAIL_VERIFIER_API_KEY")?,
            base_url: env_or("EMAIL_VERIFIER_URL", "https://verifier.meetchopra.com"),
            timeout_secs: var("EMAIL_VERIFIER_TIMEOUT_SECS")
                .map(|v| v.parse::<u64>())
                .transpose()
                .map_err(|e| format!("Invalid EMAIL_VERIFIER_TIMEOUT_SECS: {e}"))?,
        };

        Ok(Config {
            host,
            port,
            max_body_size,
            cors_origins,
            startup_policy,
            log_level,
            mongo,
            smtp,
            verifier,
        })
    }
}

impl StartupPolicy {
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fail-fast" | "fail_fast" | "failfast" => Ok(StartupPolicy::FailFast),
            "degrade" => Ok(StartupPolicy::Degrade),
            other => Err(format!(
                "Invalid CONTACT_STARTUP_POLICY '{other}': expected 'fail-fast' or 'degrade'"
            )),
        }
    }
}
