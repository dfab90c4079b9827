//! Configuration payload handling for library initialization.
//!
//! The full configuration schema is owned by the credential exchange agency;
//! this module only deserializes the payload and validates the shape of the
//! fields the library itself needs to stand up. Unknown fields pass through
//! untouched.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::warn;

use crate::errors::{VcxError, VcxResult};

/// Configuration value that switches initialization into test mode.
pub const CONFIG_ENABLE_TEST_MODE: &str = "enable_test_mode";

/// Base58 identifier of 21-23 characters, the shape of a DID on the ledger.
static REDID: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^[1-9A-HJ-NP-Za-km-z]{21,23}$").expect("Failed to compile regex pattern")
});

/// Base58 verification key, 43-44 characters.
static REVERKEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^[1-9A-HJ-NP-Za-km-z]{43,44}$").expect("Failed to compile regex pattern")
});

static REENDPOINT: Lazy<Regex> =
    Lazy::new(|| Regex::new("^https?://").expect("Failed to compile regex pattern"));

/// Deserialized initialization payload.
///
/// All fields are optional at the syntactic level; which combinations are
/// required for a live agency connection is decided by the layers above this
/// crate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub agency_endpoint: Option<String>,
    #[serde(default)]
    pub agency_did: Option<String>,
    #[serde(default)]
    pub agency_verkey: Option<String>,
    #[serde(default)]
    pub institution_did: Option<String>,
    #[serde(default)]
    pub institution_verkey: Option<String>,
    #[serde(default)]
    pub institution_name: Option<String>,
    #[serde(default)]
    pub wallet_name: Option<String>,
    #[serde(default)]
    pub genesis_path: Option<String>,
    #[serde(default)]
    pub enable_test_mode: Option<String>,
}

impl Settings {
    /// Parse and validate a JSON configuration payload.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for an empty or non-object payload,
    /// `InvalidJson` for syntactically broken JSON, and a field-specific
    /// error (`InvalidDid`, `InvalidVerkey`, `InvalidUrl`) when a recognized
    /// field has the wrong shape.
    pub fn from_json(config: &str) -> VcxResult<Self> {
        if config.trim().is_empty() {
            warn!("rejecting empty configuration payload");
            return Err(VcxError::InvalidConfiguration(
                "configuration payload is empty".to_string(),
            ));
        }

        let value: serde_json::Value = serde_json::from_str(config)?;
        if !value.is_object() {
            return Err(VcxError::InvalidConfiguration(
                "configuration payload must be a JSON object".to_string(),
            ));
        }

        let settings: Settings = serde_json::from_value(value)?;
        settings.validate()?;
        Ok(settings)
    }

    /// The baked-in test harness configuration.
    pub fn test_mode() -> Self {
        Settings {
            enable_test_mode: Some("true".to_string()),
            ..Default::default()
        }
    }

    pub fn is_test_mode(&self) -> bool {
        matches!(self.enable_test_mode.as_deref(), Some("true") | Some("1"))
    }

    fn validate(&self) -> VcxResult<()> {
        for did in [&self.agency_did, &self.institution_did].into_iter().flatten() {
            if !REDID.is_match(did) {
                return Err(VcxError::InvalidDid(did.clone()));
            }
        }

        for verkey in [&self.agency_verkey, &self.institution_verkey]
            .into_iter()
            .flatten()
        {
            if !REVERKEY.is_match(verkey) {
                return Err(VcxError::InvalidVerkey(verkey.clone()));
            }
        }

        if let Some(endpoint) = &self.agency_endpoint {
            if !REENDPOINT.is_match(endpoint) {
                return Err(VcxError::InvalidUrl(endpoint.clone()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "agency_endpoint": "http://localhost:8080",
        "agency_did": "VsKV7grR1BUE29mG2Fm2kX",
        "agency_verkey": "Hezce2UWMZ3wUhVkh2LfKSs8nDzWwzs2Win7EzNN3YaR",
        "institution_did": "V4SGRU86Z58d6TV7PBUe6f",
        "institution_name": "Faber",
        "wallet_name": "faber_wallet"
    }"#;

    #[test]
    fn test_parse_full_config() {
        let settings = Settings::from_json(CONFIG).unwrap();
        assert_eq!(
            settings.agency_endpoint.as_deref(),
            Some("http://localhost:8080")
        );
        assert_eq!(settings.institution_name.as_deref(), Some("Faber"));
        assert!(!settings.is_test_mode());
    }

    #[test]
    fn test_empty_payload_is_invalid_configuration() {
        assert!(matches!(
            Settings::from_json(""),
            Err(VcxError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Settings::from_json("   "),
            Err(VcxError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_broken_json_is_invalid_json() {
        assert!(matches!(
            Settings::from_json("{\"agency_did\":"),
            Err(VcxError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_non_object_payload_is_invalid_configuration() {
        assert!(matches!(
            Settings::from_json("[1, 2, 3]"),
            Err(VcxError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Settings::from_json("\"ENABLE_TEST_MODE\""),
            Err(VcxError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_malformed_did_rejected() {
        let config = r#"{"agency_did": "not-a-did-0OIl"}"#;
        assert!(matches!(
            Settings::from_json(config),
            Err(VcxError::InvalidDid(_))
        ));
    }

    #[test]
    fn test_malformed_verkey_rejected() {
        let config = r#"{"agency_verkey": "tooshort"}"#;
        assert!(matches!(
            Settings::from_json(config),
            Err(VcxError::InvalidVerkey(_))
        ));
    }

    #[test]
    fn test_malformed_endpoint_rejected() {
        let config = r#"{"agency_endpoint": "ftp://agency.example.com"}"#;
        assert!(matches!(
            Settings::from_json(config),
            Err(VcxError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let config = r#"{"wallet_name": "w", "payment_method": "sov"}"#;
        let settings = Settings::from_json(config).unwrap();
        assert_eq!(settings.wallet_name.as_deref(), Some("w"));
    }

    #[test]
    fn test_test_mode_flag() {
        let config = format!("{{\"{}\": \"true\"}}", CONFIG_ENABLE_TEST_MODE);
        let settings = Settings::from_json(&config).unwrap();
        assert!(settings.is_test_mode());
        assert!(Settings::test_mode().is_test_mode());
        assert!(!Settings::default().is_test_mode());
    }
}
