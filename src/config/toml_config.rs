use crate::config;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};

/// File-based configuration covering the same knobs as the CLI flags.
///
/// ```toml
/// [api]
/// endpoint = "https://api.metro-cc.ru/products-api/graph"
/// base_url = "https://online.metro-cc.ru"
///
/// [category]
/// slug = "chay"
/// page_size = 1000
///
/// [stores]
/// spb = 15
/// msk = 11
///
/// [output]
/// path = "."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiSection,
    pub category: CategorySection,
    pub stores: StoresSection,
    pub output: Option<OutputSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    pub endpoint: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySection {
    pub slug: String,
    pub page_size: Option<u32>,
    pub eshop_availability: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoresSection {
    pub spb: u32,
    pub msk: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: Option<String>,
}

impl TomlConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let parsed: TomlConfig = toml::from_str(&raw)?;
        Ok(parsed)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.api.endpoint
    }

    fn base_url(&self) -> &str {
        &self.api.base_url
    }

    fn category_slug(&self) -> &str {
        &self.category.slug
    }

    fn page_size(&self) -> u32 {
        self.category.page_size.unwrap_or(config::PAGE_SIZE)
    }

    fn eshop_availability(&self) -> bool {
        self.category
            .eshop_availability
            .unwrap_or(config::ESHOP_AVAILABILITY)
    }

    fn spb_store_id(&self) -> u32 {
        self.stores.spb
    }

    fn msk_store_id(&self) -> u32 {
        self.stores.msk
    }

    fn output_path(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|o| o.path.as_deref())
            .unwrap_or(config::OUTPUT_PATH)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.endpoint", &self.api.endpoint)?;
        validate_url("api.base_url", &self.api.base_url)?;
        validate_non_empty_string("category.slug", &self.category.slug)?;
        validate_positive_number("category.page_size", self.page_size(), 1)?;
        validate_path("output.path", self.output_path())?;
        Ok(())
    }
}
