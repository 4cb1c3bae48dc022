pub mod http;

use async_trait::async_trait;

pub use http::HttpVerifier;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verification {
    pub is_verified: bool,
}

/// Asks an external provider whether an address is deliverable.
///
/// `Ok(Verification { is_verified: false })` is a definitive rejection;
/// `Err` means the provider could not be asked or answered nonsense.
#[async_trait]
pub trait EmailVerifier: Send + Sync {
    async fn verify(&self, email: &str) -> Result<Verification, String>;
}
