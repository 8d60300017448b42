//! Raw trust settings managed by Figment
//!
//! Sources, lowest to highest precedence: built-in defaults, an optional
//! TOML file, then `JWT_*` environment variables.

use crate::error::{ConfigResult, ConfigurationError};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `JWT_PUBLIC_KEY`
pub const DEFAULT_ENV_PREFIX: &str = "JWT_";

/// Unvalidated settings, as read from files and the environment
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TrustSettings {
    /// Inline key material. Env: `JWT_PUBLIC_KEY`.
    #[serde(default, deserialize_with = "deserialize_opt_string_lax")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,

    /// Path to a key file, used when no inline key is set. Env: `JWT_PUBLIC_KEY_FILE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_file: Option<PathBuf>,

    /// Expected `iss`; unset or empty disables the check. Env: `JWT_ISSUER`.
    #[serde(default, deserialize_with = "deserialize_opt_string_lax")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    /// Expected `aud`; unset or empty disables the check. Env: `JWT_AUDIENCE`.
    #[serde(default, deserialize_with = "deserialize_opt_string_lax")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,

    /// Accept the token from a query parameter as well. Env: `JWT_ALLOW_URL_PARAM`.
    #[serde(default, deserialize_with = "deserialize_bool_lax")]
    pub allow_url_param: bool,

    /// Query parameter name; required with `allow_url_param`. Env: `JWT_URL_PARAM_NAME`.
    #[serde(default, deserialize_with = "deserialize_opt_string_lax")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_param_name: Option<String>,
}

impl TrustSettings {
    /// Builds a Figment that merges defaults, `config_file` and the environment
    #[must_use]
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(TrustSettings::default()));
        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(DEFAULT_ENV_PREFIX))
    }

    /// Extract settings from `figment`
    ///
    /// # Errors
    /// [`ConfigurationError::Settings`] when a value has the wrong shape, or
    /// when `config_file` names a file that does not exist.
    pub fn extract(config_file: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = config_file {
            if !path.is_file() {
                return Err(ConfigurationError::Settings(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
        }
        Ok(Self::figment(config_file).extract()?)
    }

    /// Key bytes: the inline key, else the contents of the key file
    ///
    /// # Errors
    /// [`ConfigurationError::MissingPublicKey`] when neither is set,
    /// [`ConfigurationError::KeyFile`] when the file cannot be read.
    pub fn key_material(&self) -> ConfigResult<Vec<u8>> {
        if let Some(inline) = self.public_key.as_deref().filter(|k| !k.trim().is_empty()) {
            return Ok(inline.as_bytes().to_vec());
        }
        match &self.public_key_file {
            Some(path) => std::fs::read(path).map_err(|source| ConfigurationError::KeyFile {
                path: path.clone(),
                source,
            }),
            None => Err(ConfigurationError::MissingPublicKey),
        }
    }
}

fn deserialize_opt_string_lax<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;

    match v {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(serde::de::Error::custom("expected a string")),
    }
}

fn deserialize_bool_lax<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;

    match v {
        Value::Bool(b) => Ok(b),
        Value::Number(n) => match n.as_u64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(serde::de::Error::custom("expected 0 or 1")),
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" | "" => Ok(false),
            _ => Err(serde::de::Error::custom(format!("expected a boolean, got {s:?}"))),
        },
        _ => Err(serde::de::Error::custom("expected a boolean")),
    }
}
