//! Ledger Configuration

use std::str::FromStr;
use std::time::Duration;

/// Which gateway implementation serves ledger calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LedgerMode {
    /// Synthetic responses, no network
    #[default]
    Mock,
    /// Reads go to a Sui full node over JSON-RPC
    Rpc,
}

impl FromStr for LedgerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(LedgerMode::Mock),
            "rpc" => Ok(LedgerMode::Rpc),
            other => Err(format!("Unknown ledger mode: {other}")),
        }
    }
}

/// Ledger configuration
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Published Move package
    pub package_id: String,
    /// Move module holding the challenge types
    pub module_name: String,
    /// Sui network name
    pub network: String,
    /// JSON-RPC endpoint
    pub node_url: String,
    pub mode: LedgerMode,
    pub rpc_timeout: Duration,
    /// Answer reads from the mock when the node fails
    pub rpc_fallback_to_mock: bool,
    /// Balance reported when no node is consulted (1.5 SUI)
    pub fallback_balance_mist: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            package_id: "0xab310610823f47b2e4a58a1987114793514d63605826a766b0c2dd4bd2b6d3d3"
                .to_string(),
            module_name: "boar_challenge".to_string(),
            network: "testnet".to_string(),
            node_url: node_url_for("testnet"),
            mode: LedgerMode::Mock,
            rpc_timeout: Duration::from_secs(10),
            rpc_fallback_to_mock: true,
            fallback_balance_mist: 1_500_000_000,
        }
    }
}

/// Public full node for a network name
pub fn node_url_for(network: &str) -> String {
    format!("https://fullnode.{network}.sui.io:443")
}

impl LedgerConfig {
    /// Defaults overridden by `SUI_NETWORK`, `SUI_NODE_URL`, `SUI_PACKAGE_ID`,
    /// `LEDGER_MODE` and `LEDGER_RPC_FALLBACK`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let network = std::env::var("SUI_NETWORK").unwrap_or(defaults.network.clone());
        let node_url = std::env::var("SUI_NODE_URL").unwrap_or_else(|_| node_url_for(&network));

        let mode = match std::env::var("LEDGER_MODE") {
            Ok(raw) => raw.parse().unwrap_or_else(|e: String| {
                tracing::warn!(error = %e, "Falling back to mock ledger");
                LedgerMode::Mock
            }),
            Err(_) => defaults.mode,
        };

        let rpc_fallback_to_mock = std::env::var("LEDGER_RPC_FALLBACK")
            .map(|v| !matches!(v.trim(), "0" | "false" | "off"))
            .unwrap_or(defaults.rpc_fallback_to_mock);

        Self {
            package_id: std::env::var("SUI_PACKAGE_ID").unwrap_or(defaults.package_id.clone()),
            network,
            node_url,
            mode,
            rpc_fallback_to_mock,
            ..defaults
        }
    }

    /// Move type of challenge pools
    pub fn pool_type(&self) -> String {
        format!("{}::{}::ChallengePool", self.package_id, self.module_name)
    }
}
