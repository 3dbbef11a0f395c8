//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Terminal client for a remote funds account.
///
/// Check the account balance and deposit funds, finishing net banking
/// payments in the system browser.
#[derive(Parser, Debug)]
#[command(name = "fundsdesk-tui", version, about)]
pub struct Cli {
    /// Path to a YAML config file (defaults to ~/.fundsdesk/config.yaml)
    #[arg(long, short = 'c', env = "FUNDSDESK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Origin + path prefix of the funds API
    #[arg(long, env = "FUNDSDESK_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "FUNDSDESK_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Bearer token to start with. Kept in memory only.
    #[arg(long, env = "FUNDSDESK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

impl Cli {
    /// Resolve the effective configuration
    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let path = self.config.clone().unwrap_or_else(Config::default_path);
        let config = Config::load(&path)?;
        Ok(config.with_overrides(self.base_url.clone(), self.timeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "base_url: https://file.example\nrequest_timeout_secs: 9\n").unwrap();

        let cli = Cli::parse_from([
            "fundsdesk-tui",
            "--config",
            path.to_str().unwrap(),
            "--base-url",
            "https://flag.example",
        ]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.base_url, "https://flag.example");
        assert_eq!(config.request_timeout_secs, 9);
    }
}
