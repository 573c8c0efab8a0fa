//! Blob upload credential issuance
//!
//! Generates short-lived service SAS tokens so clients can upload report
//! blobs directly to storage without the gateway proxying the bytes. The
//! account key never leaves the server; clients only receive a scoped,
//! expiring signature.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;

use crate::config::BlobStorageConfig;
use crate::utils::error::{GatewayError, Result};

type HmacSha256 = Hmac<Sha256>;

const SIGNED_VERSION: &str = "2019-12-12";
const DEFAULT_PERMISSIONS: &str = "cw";
const DEFAULT_EXPIRY_MINUTES: i64 = 15;
const MAX_EXPIRY_MINUTES: i64 = 24 * 60;

/// An issued shared-access signature
#[derive(Debug, Clone, Serialize)]
pub struct SasToken {
    /// Query-string token to append to the blob URL
    pub sas_token: String,
    /// Full HTTPS URL including the token
    pub url: String,
    /// Expiry instant
    pub expires_on: DateTime<Utc>,
    /// Granted permissions string
    pub permissions: String,
    /// Container the signature is scoped to
    pub container_name: String,
    /// Storage account name
    pub account_name: String,
}

/// Signs service SAS tokens for one storage account and container
pub struct BlobSasIssuer {
    account: String,
    key: Vec<u8>,
    container: String,
}

impl BlobSasIssuer {
    pub fn new(config: &BlobStorageConfig) -> Result<Self> {
        let raw_key = config
            .key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| GatewayError::config("Storage account key not configured"))?;
        let key = STANDARD
            .decode(raw_key.trim())
            .map_err(|e| GatewayError::crypto(format!("Invalid storage account key: {}", e)))?;

        if config.account.is_empty() {
            return Err(GatewayError::config("Storage account name not configured"));
        }

        Ok(Self {
            account: config.account.clone(),
            key,
            container: config.container.clone(),
        })
    }

    /// Issue a SAS token, optionally scoped to a single blob.
    ///
    /// `permissions` defaults to create+write and `expires_in_minutes` to 15,
    /// clamped to at most 24 hours. HTTPS-only is always enforced.
    pub fn issue(
        &self,
        blob_name: Option<&str>,
        permissions: Option<&str>,
        expires_in_minutes: Option<i64>,
    ) -> Result<SasToken> {
        self.issue_at(Utc::now(), blob_name, permissions, expires_in_minutes)
    }

    fn issue_at(
        &self,
        now: DateTime<Utc>,
        blob_name: Option<&str>,
        permissions: Option<&str>,
        expires_in_minutes: Option<i64>,
    ) -> Result<SasToken> {
        let permissions = permissions.unwrap_or(DEFAULT_PERMISSIONS);
        validate_permissions(permissions)?;

        let minutes = expires_in_minutes
            .unwrap_or(DEFAULT_EXPIRY_MINUTES)
            .clamp(1, MAX_EXPIRY_MINUTES);

        let blob_name = blob_name.filter(|name| !name.is_empty());
        let starts_on = now;
        let expires_on = now + Duration::minutes(minutes);
        let start = format_sas_time(starts_on);
        let expiry = format_sas_time(expires_on);

        let canonical_resource = match blob_name {
            Some(blob) => format!("/blob/{}/{}/{}", self.account, self.container, blob),
            None => format!("/blob/{}/{}", self.account, self.container),
        };
        let signed_resource = if blob_name.is_some() { "b" } else { "c" };

        // Service SAS string-to-sign, field order fixed by the signed version
        let string_to_sign = format!(
            "{permissions}\n{start}\n{expiry}\n{canonical_resource}\n\n\nhttps\n{version}\n{signed_resource}\n\n\n\n\n",
            version = SIGNED_VERSION,
        );

        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| GatewayError::crypto(format!("Invalid signing key length: {}", e)))?;
        mac.update(string_to_sign.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());

        let sas_token: String = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("sv", SIGNED_VERSION)
            .append_pair("spr", "https")
            .append_pair("st", &start)
            .append_pair("se", &expiry)
            .append_pair("sr", signed_resource)
            .append_pair("sp", permissions)
            .append_pair("sig", &signature)
            .finish();

        let url = format!(
            "https://{}.blob.core.windows.net/{}/{}?{}",
            self.account,
            self.container,
            blob_name.unwrap_or(""),
            sas_token
        );

        Ok(SasToken {
            sas_token,
            url,
            expires_on,
            permissions: permissions.to_string(),
            container_name: self.container.clone(),
            account_name: self.account.clone(),
        })
    }
}

fn format_sas_time(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

fn validate_permissions(permissions: &str) -> Result<()> {
    const ALLOWED: &str = "racwdl";
    if permissions.is_empty() {
        return Err(GatewayError::validation("Permissions cannot be empty"));
    }
    if let Some(invalid) = permissions.chars().find(|c| !ALLOWED.contains(*c)) {
        return Err(GatewayError::validation(format!(
            "Unsupported permission '{}'; allowed: {}",
            invalid, ALLOWED
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn issuer() -> BlobSasIssuer {
        BlobSasIssuer {
            account: "pricingacct".to_string(),
            key: b"0123456789abcdef0123456789abcdef".to_vec(),
            container: "scenariopricing".to_string(),
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_defaults_are_create_write_for_15_minutes() {
        let token = issuer().issue_at(fixed_now(), None, None, None).unwrap();

        assert_eq!(token.permissions, "cw");
        assert_eq!(token.expires_on, fixed_now() + Duration::minutes(15));
        assert!(token.sas_token.contains("sp=cw"));
        assert!(token.sas_token.contains("sr=c"));
        assert!(token.sas_token.contains("spr=https"));
        assert!(token.sas_token.contains("sig="));
    }

    #[test]
    fn test_blob_scoped_token_uses_blob_resource() {
        let token = issuer()
            .issue_at(fixed_now(), Some("report.pdf"), None, None)
            .unwrap();

        assert!(token.sas_token.contains("sr=b"));
        assert!(
            token
                .url
                .starts_with("https://pricingacct.blob.core.windows.net/scenariopricing/report.pdf?")
        );
    }

    #[test]
    fn test_signing_is_deterministic_for_fixed_inputs() {
        let first = issuer()
            .issue_at(fixed_now(), Some("a.json"), Some("cw"), Some(30))
            .unwrap();
        let second = issuer()
            .issue_at(fixed_now(), Some("a.json"), Some("cw"), Some(30))
            .unwrap();
        assert_eq!(first.sas_token, second.sas_token);

        // A different blob name must change the signature
        let other = issuer()
            .issue_at(fixed_now(), Some("b.json"), Some("cw"), Some(30))
            .unwrap();
        assert_ne!(first.sas_token, other.sas_token);
    }

    #[test]
    fn test_expiry_clamped_to_one_day() {
        let token = issuer()
            .issue_at(fixed_now(), None, None, Some(10_000))
            .unwrap();
        assert_eq!(token.expires_on, fixed_now() + Duration::minutes(24 * 60));

        let short = issuer().issue_at(fixed_now(), None, None, Some(0)).unwrap();
        assert_eq!(short.expires_on, fixed_now() + Duration::minutes(1));
    }

    #[test]
    fn test_unknown_permission_rejected() {
        let result = issuer().issue_at(fixed_now(), None, Some("cwz"), None);
        assert!(matches!(result, Err(GatewayError::Validation(_))));
    }

    #[test]
    fn test_issuer_requires_key_and_account() {
        let config = BlobStorageConfig {
            account: "acct".to_string(),
            key: None,
            container: "c".to_string(),
        };
        assert!(matches!(
            BlobSasIssuer::new(&config),
            Err(GatewayError::Config(_))
        ));
    }
}
