pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_url, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

// Defaults mirror the production Metro endpoints and stores.
pub const API_URL: &str = "https://api.metro-cc.ru/products-api/graph";
pub const BASE_URL: &str = "https://online.metro-cc.ru";
pub const SPB_STORE_ID: u32 = 15;
pub const MSK_STORE_ID: u32 = 11;
pub const CATEGORY_SLUG: &str = "chay";
pub const PAGE_SIZE: u32 = 1000;
pub const ESHOP_AVAILABILITY: bool = true;
pub const OUTPUT_PATH: &str = ".";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "metro-catalog")]
#[command(about = "Collects Metro store catalog prices for two regions into products.json")]
pub struct CliConfig {
    #[arg(long, default_value = API_URL)]
    pub api_endpoint: String,

    /// Base URL prepended to relative product paths.
    #[arg(long, default_value = BASE_URL)]
    pub base_url: String,

    #[arg(long, default_value = CATEGORY_SLUG)]
    pub category_slug: String,

    #[arg(long, default_value_t = PAGE_SIZE)]
    pub page_size: u32,

    #[arg(long, default_value_t = SPB_STORE_ID)]
    pub spb_store_id: u32,

    #[arg(long, default_value_t = MSK_STORE_ID)]
    pub msk_store_id: u32,

    #[arg(long, default_value = OUTPUT_PATH)]
    pub output_path: String,

    /// Optional TOML configuration file; overrides the CLI flags entirely.
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn category_slug(&self) -> &str {
        &self.category_slug
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }

    fn eshop_availability(&self) -> bool {
        ESHOP_AVAILABILITY
    }

    fn spb_store_id(&self) -> u32 {
        self.spb_store_id
    }

    fn msk_store_id(&self) -> u32 {
        self.msk_store_id
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_url("base_url", &self.base_url)?;
        validate_non_empty_string("category_slug", &self.category_slug)?;
        validate_positive_number("page_size", self.page_size, 1)?;
        validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config() -> CliConfig {
        CliConfig::parse_from(["metro-catalog"])
    }

    #[test]
    fn test_defaults_match_production_literals() {
        let config = default_config();

        assert_eq!(config.api_endpoint, API_URL);
        assert_eq!(config.base_url, BASE_URL);
        assert_eq!(config.category_slug, "chay");
        assert_eq!(config.page_size, 1000);
        assert_eq!(config.spb_store_id, 15);
        assert_eq!(config.msk_store_id, 11);
        assert_eq!(config.output_path, ".");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_endpoint_fails_validation() {
        let mut config = default_config();
        config.api_endpoint = "not-a-url".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_page_size_fails_validation() {
        let mut config = default_config();
        config.page_size = 0;

        assert!(config.validate().is_err());
    }
}
