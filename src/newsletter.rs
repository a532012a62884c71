//! Newsletter signup. Delivery is simulated: nothing leaves the page.

use thiserror::Error;
use tracing::info;

const SIMULATED_LATENCY_MS: u64 = 400;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NewsletterError {
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// Loose shape check: `local@domain.tld`, no whitespace.
pub fn is_valid_email(raw: &str) -> bool {
    let email = raw.trim();
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

pub fn validate_email(raw: &str) -> Result<String, NewsletterError> {
    if is_valid_email(raw) {
        Ok(raw.trim().to_string())
    } else {
        Err(NewsletterError::InvalidEmail)
    }
}

/// Pretend to register `email` with the mailing list.
pub async fn subscribe(email: &str) -> Result<(), NewsletterError> {
    let email = validate_email(email)?;
    simulated_delay().await;
    info!(%email, "newsletter signup recorded (simulated)");
    Ok(())
}

#[cfg(target_arch = "wasm32")]
async fn simulated_delay() {
    gloo_timers::future::TimeoutFuture::new(SIMULATED_LATENCY_MS as u32).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn simulated_delay() {
    tokio::time::sleep(std::time::Duration::from_millis(SIMULATED_LATENCY_MS)).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        assert!(is_valid_email("hello@mauronelson.com"));
        assert!(is_valid_email("  fan+news@mail.example.be "));
        assert_eq!(
            validate_email(" fan@example.com ").as_deref(),
            Ok("fan@example.com")
        );
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in [
            "",
            "   ",
            "no-at-sign.com",
            "@example.com",
            "fan@",
            "fan@localhost",
            "fan@.com",
            "fan@example.",
            "fan@ex ample.com",
            "fan@@example.com",
        ] {
            assert_eq!(validate_email(bad), Err(NewsletterError::InvalidEmail), "{bad:?}");
        }
    }
}
