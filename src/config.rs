//! Deployment settings: which network payments must go to and how the native
//! token is denominated.

use crate::error::{OrderError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Human readable network name, used in "switch network" messages.
    pub name: String,
    /// Chain the wallet must be connected to before paying.
    pub chain_id: u64,
    /// Fractional digits of the native token (18 for ether/wei).
    pub base_unit_decimals: u32,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: "rinkeby".to_string(),
            chain_id: 4,
            base_unit_decimals: 18,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub network: NetworkConfig,
    /// Address of the restaurant contract receiving payments.
    pub contract_address: Option<String>,
}

impl AppConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let config: AppConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.network.name.trim().is_empty() {
            return Err(OrderError::Configuration(
                "network name must not be empty".to_string(),
            ));
        }
        // 10^decimals must fit in a u64 scale factor
        if self.network.base_unit_decimals > 19 {
            return Err(OrderError::Configuration(format!(
                "base_unit_decimals {} is out of range (max 19)",
                self.network.base_unit_decimals
            )));
        }
        if let Some(address) = &self.contract_address
            && !is_hex_address(address)
        {
            return Err(OrderError::Configuration(format!(
                "contract address '{address}' is not a 0x-prefixed 20-byte hex address"
            )));
        }
        Ok(())
    }
}

fn is_hex_address(address: &str) -> bool {
    address
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_target_rinkeby() {
        let config = AppConfig::default();
        assert_eq!(config.network.chain_id, 4);
        assert_eq!(config.network.base_unit_decimals, 18);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "network": {{ "chain_id": 11155111, "name": "sepolia" }} }}"#).unwrap();

        let config = AppConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.network.chain_id, 11155111);
        assert_eq!(config.network.base_unit_decimals, 18);
        assert_eq!(config.contract_address, None);
    }

    #[test]
    fn test_invalid_contract_address() {
        let config = AppConfig {
            contract_address: Some("0x1234".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(OrderError::Configuration(_))
        ));
    }

    #[test]
    fn test_decimals_out_of_range() {
        let mut config = AppConfig::default();
        config.network.base_unit_decimals = 30;
        assert!(matches!(
            config.validate(),
            Err(OrderError::Configuration(_))
        ));
    }
}
