//! Runtime configuration from the process environment and an optional `.env` file.
//!
//! | Variable | Default |
//! |---|---|
//! | `SCHOLARSHIP_API_URL` | `http://localhost:5000` |
//! | `SCHOLARSHIP_API_TOKEN` | unset |
//! | `STRIPE_API_URL` | `https://api.stripe.com` |
//! | `STRIPE_PUBLISHABLE_KEY` | `pk_test_placeholder` |
//!
//! With the placeholder key the payment provider reports itself as not ready, so the
//! order summary still loads but no card can be submitted.

use crate::error::{CheckoutError, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

pub const API_URL_VAR: &str = "SCHOLARSHIP_API_URL";
pub const API_TOKEN_VAR: &str = "SCHOLARSHIP_API_TOKEN";
pub const PROVIDER_URL_VAR: &str = "STRIPE_API_URL";
pub const PUBLISHABLE_KEY_VAR: &str = "STRIPE_PUBLISHABLE_KEY";

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_PROVIDER_URL: &str = "https://api.stripe.com";

#[derive(Clone, PartialEq, Eq)]
pub struct PublishableKey(String);

impl PublishableKey {
    pub const PLACEHOLDER: &'static str = "pk_test_placeholder";

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn placeholder() -> Self {
        Self(Self::PLACEHOLDER.to_string())
    }

    pub fn is_placeholder(&self) -> bool {
        self.0 == Self::PLACEHOLDER
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PublishableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(8).collect();
        write!(f, "PublishableKey({prefix}...)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub provider_base_url: String,
    pub publishable_key: PublishableKey,
}

impl Config {
    /// Builds a config from a variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            api_base_url: get(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_token: get(API_TOKEN_VAR),
            provider_base_url: get(PROVIDER_URL_VAR)
                .unwrap_or_else(|| DEFAULT_PROVIDER_URL.to_string()),
            publishable_key: get(PUBLISHABLE_KEY_VAR)
                .map(PublishableKey::new)
                .unwrap_or_else(PublishableKey::placeholder),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Process environment first, then the variables in `path`.
    pub fn from_env_and_file(path: &Path) -> Result<Self> {
        let file = read_env_file(path)?;
        Ok(Self::from_lookup(|name| {
            std::env::var(name).ok().or_else(|| file.get(name).cloned())
        }))
    }
}

/// Reads `KEY=value` pairs without touching the process environment.
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let iter = dotenvy::from_path_iter(path)
        .map_err(|e| CheckoutError::Config(format!("{}: {e}", path.display())))?;
    iter.map(|item| item.map_err(|e| CheckoutError::Config(format!("{}: {e}", path.display()))))
        .collect()
}
