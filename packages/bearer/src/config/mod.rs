//! Trust configuration
//!
//! Built once at startup, then shared read-only (usually behind an `Arc`)
//! by every verification. There are no setters once a value is built; the
//! `with_*` methods consume and return the value while it is still owned
//! by the code constructing it.

mod settings;

pub use settings::{DEFAULT_ENV_PREFIX, TrustSettings};

use crate::api::algorithms::Rs256PublicKey;
use crate::error::{ConfigResult, ConfigurationError};
use std::path::Path;
use std::sync::Arc;

/// Constraint on a string claim
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Expectation {
    /// No constraint; any value, or none, passes
    #[default]
    Any,
    /// Claim must be present and equal this string exactly
    Exactly(String),
}

impl Expectation {
    /// `None` and the empty string both mean "no constraint"
    #[must_use]
    pub fn from_optional(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Expectation::Exactly(v),
            _ => Expectation::Any,
        }
    }

    /// Whether `actual` satisfies this expectation
    #[must_use]
    pub fn accepts(&self, actual: Option<&str>) -> bool {
        match self {
            Expectation::Any => true,
            Expectation::Exactly(expected) => actual == Some(expected.as_str()),
        }
    }

    /// Expected value, when constrained
    #[must_use]
    pub fn expected(&self) -> Option<&str> {
        match self {
            Expectation::Any => None,
            Expectation::Exactly(expected) => Some(expected),
        }
    }
}

/// Where a caller may present the token
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TokenSource {
    /// Only the `Authorization: Bearer` header
    #[default]
    HeaderOnly,
    /// The header, or else the named query parameter
    HeaderOrQuery {
        /// Query parameter carrying the token
        param: String,
    },
}

/// Immutable trust anchor and claim expectations
#[derive(Debug)]
pub struct TrustConfiguration {
    public_key: Rs256PublicKey,
    issuer: Expectation,
    audience: Expectation,
    token_source: TokenSource,
}

impl TrustConfiguration {
    /// Trust `public_key` with no issuer or audience constraint
    #[must_use]
    pub fn new(public_key: Rs256PublicKey) -> Self {
        Self {
            public_key,
            issuer: Expectation::Any,
            audience: Expectation::Any,
            token_source: TokenSource::HeaderOnly,
        }
    }

    /// Trust the key in `material` (PEM, DER or bare base64 DER)
    ///
    /// # Errors
    /// [`ConfigurationError::InvalidPublicKey`] when the material is not a
    /// usable RSA public key.
    pub fn from_key_material(material: impl AsRef<[u8]>) -> ConfigResult<Self> {
        let public_key = Rs256PublicKey::parse(material.as_ref())
            .map_err(|e| ConfigurationError::InvalidPublicKey(e.to_string()))?;
        Ok(Self::new(public_key))
    }

    /// Require `iss` to equal `issuer` exactly, even when it is empty
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Expectation::Exactly(issuer.into());
        self
    }

    /// Require `aud` to equal `audience` exactly, even when it is empty
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Expectation::Exactly(audience.into());
        self
    }

    /// Also accept the token from the query parameter `name`
    ///
    /// # Errors
    /// [`ConfigurationError::MissingUrlParamName`] for an empty name.
    pub fn with_url_param(mut self, name: impl Into<String>) -> ConfigResult<Self> {
        let param = name.into();
        if param.trim().is_empty() {
            return Err(ConfigurationError::MissingUrlParamName);
        }
        self.token_source = TokenSource::HeaderOrQuery { param };
        Ok(self)
    }

    /// Validate raw settings into a trust configuration
    ///
    /// # Errors
    /// Any [`ConfigurationError`]; the caller must not serve verification
    /// requests without a configuration.
    pub fn from_settings(settings: TrustSettings) -> ConfigResult<Self> {
        let material = settings.key_material()?;
        let mut config = Self::from_key_material(material)?;
        config.issuer = Expectation::from_optional(settings.issuer);
        config.audience = Expectation::from_optional(settings.audience);
        if settings.allow_url_param {
            let name = settings
                .url_param_name
                .ok_or(ConfigurationError::MissingUrlParamName)?;
            config = config.with_url_param(name)?;
        }

        tracing::info!(
            modulus_bits = config.public_key.modulus_bits(),
            issuer = config.issuer.expected().unwrap_or("<any>"),
            audience = config.audience.expected().unwrap_or("<any>"),
            url_param = config.url_param_name().unwrap_or("<disabled>"),
            "trust configuration ready"
        );
        Ok(config)
    }

    /// Load from `JWT_*` environment variables
    ///
    /// # Errors
    /// Any [`ConfigurationError`].
    pub fn load() -> ConfigResult<Arc<Self>> {
        Self::load_with(None)
    }

    /// Load from an optional TOML file overlaid by `JWT_*` environment
    /// variables
    ///
    /// # Errors
    /// Any [`ConfigurationError`].
    pub fn load_with(config_file: Option<&Path>) -> ConfigResult<Arc<Self>> {
        TrustSettings::extract(config_file)
            .and_then(Self::from_settings)
            .map(Arc::new)
            .inspect_err(|e| tracing::error!(error = %e, "trust configuration rejected"))
    }

    /// Trusted public key
    #[must_use]
    pub fn public_key(&self) -> &Rs256PublicKey {
        &self.public_key
    }

    /// Issuer constraint
    #[must_use]
    pub fn issuer(&self) -> &Expectation {
        &self.issuer
    }

    /// Audience constraint
    #[must_use]
    pub fn audience(&self) -> &Expectation {
        &self.audience
    }

    /// Token location policy
    #[must_use]
    pub fn token_source(&self) -> &TokenSource {
        &self.token_source
    }

    /// Whether the query parameter may carry the token
    #[must_use]
    pub fn allow_url_param(&self) -> bool {
        matches!(self.token_source, TokenSource::HeaderOrQuery { .. })
    }

    /// Query parameter name, when enabled
    #[must_use]
    pub fn url_param_name(&self) -> Option<&str> {
        match &self.token_source {
            TokenSource::HeaderOnly => None,
            TokenSource::HeaderOrQuery { param } => Some(param),
        }
    }
}
