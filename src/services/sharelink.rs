//! Shareable configuration links
//!
//! A share link carries a subset of pricing variables as a URL-safe,
//! unpadded base64 JSON payload. Every field is optional so links produced
//! by older clients keep decoding; absent fields fall back to the defaults
//! on the receiving side.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::core::pricing::{TierTable, WorkflowType};
use crate::utils::error::{GatewayError, Result};

/// Variables embedded in a share link
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SharedVariables {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_pack_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_pack_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub byok_savings_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiers: Option<TierTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_types: Option<Vec<WorkflowType>>,
}

impl SharedVariables {
    /// True when the payload carries nothing worth sharing
    pub fn is_empty(&self) -> bool {
        self.credit_rate.is_none()
            && self.credit_pack_size.is_none()
            && self.credit_pack_price.is_none()
            && self.byok_savings_percent.is_none()
            && self.tiers.is_none()
            && self.workflow_types.is_none()
    }
}

/// Encode shared variables into a URL-safe token
pub fn encode(variables: &SharedVariables) -> Result<String> {
    let json = serde_json::to_vec(variables)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a share token back into variables
pub fn decode(token: &str) -> Result<SharedVariables> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token.trim())
        .map_err(|e| GatewayError::bad_request(format!("Invalid share token: {}", e)))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| GatewayError::bad_request(format!("Invalid share payload: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pricing::Tier;

    #[test]
    fn test_round_trip_preserves_variables() {
        let mut tiers = TierTable::new();
        tiers.insert("starter", Tier::new("Starter", 50.0, 1000.0, 10.0));

        let variables = SharedVariables {
            credit_rate: Some(0.02),
            byok_savings_percent: Some(40.0),
            tiers: Some(tiers),
            ..Default::default()
        };

        let token = encode(&variables).unwrap();
        let decoded = decode(&token).unwrap();
        assert_eq!(decoded, variables);
    }

    #[test]
    fn test_token_is_url_safe_and_unpadded() {
        let variables = SharedVariables {
            credit_rate: Some(0.01),
            credit_pack_size: Some(50_000.0),
            ..Default::default()
        };
        let token = encode(&variables).unwrap();
        assert!(!token.contains('='));
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
    }

    #[test]
    fn test_partial_payload_decodes_with_absent_fields() {
        let token = URL_SAFE_NO_PAD.encode(r#"{"credit_rate": 0.05}"#);
        let decoded = decode(&token).unwrap();
        assert_eq!(decoded.credit_rate, Some(0.05));
        assert!(decoded.tiers.is_none());
        assert!(decoded.workflow_types.is_none());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(matches!(
            decode("!!not base64!!"),
            Err(GatewayError::BadRequest(_))
        ));
        let not_json = URL_SAFE_NO_PAD.encode("plainly not json");
        assert!(matches!(decode(&not_json), Err(GatewayError::BadRequest(_))));
    }

    #[test]
    fn test_empty_payload_is_detected() {
        assert!(SharedVariables::default().is_empty());
        let decoded = decode(&encode(&SharedVariables::default()).unwrap()).unwrap();
        assert!(decoded.is_empty());
    }
}
