//! Context parameter sets

use serde::{Deserialize, Serialize};

use crate::error::{FfiError, FfiResult};

/// Default multiplicative depth
pub const DEFAULT_DEPTH: u32 = 2;

/// Default plaintext modulus (Fermat prime, NTT-friendly for BGV)
pub const DEFAULT_PLAINTEXT_MODULUS: u64 = 65537;

/// Parameters fixed for the lifetime of a [`Context`](crate::Context).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextParams {
    /// Number of sequential homomorphic multiplications the parameter set supports
    pub depth: u32,
    /// Size of the message space; decrypted values lie in `[0, plaintext_modulus)`
    pub plaintext_modulus: u64,
}

impl Default for ContextParams {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            plaintext_modulus: DEFAULT_PLAINTEXT_MODULUS,
        }
    }
}

impl ContextParams {
    pub fn new(depth: u32, plaintext_modulus: u64) -> Self {
        Self {
            depth,
            plaintext_modulus,
        }
    }

    /// Check the preconditions every engine shares.
    ///
    /// Engines may reject further combinations; that surfaces as a null
    /// context from the native call.
    pub fn validate(&self) -> FfiResult<()> {
        if self.depth < 1 {
            return Err(FfiError::ContextCreation(
                "Multiplicative depth must be at least 1".into(),
            ));
        }
        if self.plaintext_modulus <= 1 {
            return Err(FfiError::ContextCreation(format!(
                "Plaintext modulus must be greater than 1, got {}",
                self.plaintext_modulus
            )));
        }
        Ok(())
    }

    /// Parse a parameter set from TOML, e.g. a `[context]` table read by the caller.
    ///
    /// Malformed TOML is a [`FfiError::Config`]; well-formed TOML with
    /// out-of-range values fails validation like any other parameter set.
    pub fn from_toml_str(s: &str) -> FfiResult<Self> {
        let params: ContextParams = toml::from_str(s)
            .map_err(|e| FfiError::Config(format!("cannot parse TOML: {e}")))?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_toml_string(&self) -> FfiResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| FfiError::Config(format!("cannot encode TOML: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = ContextParams::default();
        assert_eq!(params.depth, 2);
        assert_eq!(params.plaintext_modulus, 65537);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_depth() {
        let err = ContextParams::new(0, 65537).validate().unwrap_err();
        assert!(matches!(err, FfiError::ContextCreation(_)));
    }

    #[test]
    fn test_validate_rejects_trivial_modulus() {
        assert!(ContextParams::new(2, 0).validate().is_err());
        assert!(ContextParams::new(2, 1).validate().is_err());
        assert!(ContextParams::new(1, 2).validate().is_ok());
    }

    #[test]
    fn test_toml_roundtrip() {
        let params = ContextParams::new(3, 786433);
        let text = params.to_toml_string().unwrap();
        assert_eq!(ContextParams::from_toml_str(&text).unwrap(), params);
    }

    #[test]
    fn test_toml_rejects_invalid_values() {
        let err = ContextParams::from_toml_str("depth = 0\nplaintext_modulus = 65537\n");
        assert!(matches!(err, Err(FfiError::ContextCreation(_))));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = ContextParams::from_toml_str("depth = 2\n").unwrap_err();
        assert!(matches!(err, FfiError::Config(ref msg) if msg.starts_with("cannot parse TOML")));

        let err = ContextParams::from_toml_str("depth = \"two\"").unwrap_err();
        assert!(matches!(err, FfiError::Config(_)));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&ContextParams::default()).unwrap();
        assert_eq!(json, r#"{"depth":2,"plaintext_modulus":65537}"#);
    }
}
