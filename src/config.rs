use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::domain::session::Network;

/// Environment variable carrying the backend base URL (the Vite-era
/// deployment exported the same value as `VITE_API`).
pub const API_ENV_VAR: &str = "SOLVAULT_WALLET_API";

/// Base URL used when neither `--api-url` nor the environment provides one.
const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

/// Devnet faucet for funding test wallets.
pub const FAUCET_URL: &str = "https://faucet.solana.com/";

/// Get the data directory for the application.
pub fn get_data_dir() -> PathBuf {
    if let Ok(s) = std::env::var("SOLVAULT_WALLET_DATA") {
        PathBuf::from(s)
    } else if let Some(proj_dirs) = ProjectDirs::from("com", "solvault", "solvault-wallet") {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub network: Network,
    pub api: ApiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl Config {
    /// Create config from CLI args. The API base URL resolves in order:
    /// `--api-url`, then the environment, then the local default.
    pub fn new(network: Option<&str>, api_url: Option<&str>) -> Self {
        let network = network.map(Network::from_name).unwrap_or_default();
        let base_url = api_url
            .map(str::to_string)
            .or_else(|| std::env::var(API_ENV_VAR).ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            network,
            api: ApiConfig { base_url },
        }
    }
}
