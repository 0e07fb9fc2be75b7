//! API credentials, sourced only from the environment.
//!
//! There are no built-in defaults: an enabled chain without its key is a
//! startup error.

use std::fmt;

use crate::domain::Chain;

use super::loader::ConfigError;

/// Environment variable holding the Birdeye key (Solana listings)
pub const SOLANA_API_KEY_ENV: &str = "SOLANA_API_KEY";
/// Environment variable holding the Etherscan key (Ethereum listings)
pub const ETHEREUM_API_KEY_ENV: &str = "ETHEREUM_API_KEY";

/// Secret API key. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Keys for the enabled chains
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub solana: Option<ApiKey>,
    pub ethereum: Option<ApiKey>,
}

impl Credentials {
    /// Read the keys required by `chains` from the process environment
    pub fn from_env(chains: &[Chain]) -> Result<Self, ConfigError> {
        Self::from_lookup(chains, |name| std::env::var(name).ok())
    }

    /// Resolve keys through an arbitrary lookup (environment, test map)
    pub fn from_lookup<F>(chains: &[Chain], lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut credentials = Credentials::default();
        for chain in chains {
            let var = env_var_for(*chain);
            let value = lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::MissingCredential {
                    chain: *chain,
                    var: var.to_string(),
                })?;
            match chain {
                Chain::Solana => credentials.solana = Some(ApiKey::new(value)),
                Chain::Ethereum => credentials.ethereum = Some(ApiKey::new(value)),
            }
        }
        Ok(credentials)
    }

    pub fn key_for(&self, chain: Chain) -> Option<&ApiKey> {
        match chain {
            Chain::Solana => self.solana.as_ref(),
            Chain::Ethereum => self.ethereum.as_ref(),
        }
    }
}

pub fn env_var_for(chain: Chain) -> &'static str {
    match chain {
        Chain::Solana => SOLANA_API_KEY_ENV,
        Chain::Ethereum => ETHEREUM_API_KEY_ENV,
    }
}
