use crate::utils::error::{EtlError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Column headers of the result document, in output order.
pub const CITY_FIELDS: [&str; 6] = [
    "ID",
    "Наименование",
    "Ссылка",
    "Регулярная цена",
    "Промо цена",
    "Бренд",
];

/// The two regional stores the catalog is collected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Spb,
    Msk,
}

impl Region {
    pub fn label(&self) -> &'static str {
        match self {
            Region::Spb => "spb",
            Region::Msk => "msk",
        }
    }
}

/// Raw products fetched for one region, before transformation.
#[derive(Debug, Clone)]
pub struct RegionExtract {
    pub region: Region,
    pub products: Vec<RawProduct>,
}

// Wire format of the products API response. Unknown fields are ignored.

#[derive(Debug, Clone, Deserialize)]
pub struct GraphResponse {
    pub data: GraphData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphData {
    pub category: CategoryNode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryNode {
    pub products: Vec<RawProduct>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawProduct {
    pub id: i64,
    pub name: String,
    /// Relative path, joined with the base URL during transformation.
    pub url: String,
    pub stocks: Vec<Stock>,
    pub manufacturer: Manufacturer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Stock {
    pub prices_per_unit: PricesPerUnit,
}

// Prices stay as serde_json::Number so integer prices re-serialize as
// integers, not floats.
#[derive(Debug, Clone, Deserialize)]
pub struct PricesPerUnit {
    pub old_price: Option<Number>,
    pub price: Number,
    pub is_promo: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Manufacturer {
    pub name: String,
}

/// One transformed catalog entry, as it appears in the output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub regular_price: Option<Number>,
    pub promo_price: Option<Number>,
    pub brand: String,
}

impl Product {
    /// Maps a raw API product to an output entry.
    ///
    /// Price rule: when the promo flag is set the old price is the regular
    /// one and the current price is the promo one; otherwise the other way
    /// around.
    pub fn from_raw(raw: &RawProduct, base_url: &str) -> Result<Self> {
        let stock = raw.stocks.first().ok_or_else(|| EtlError::ProcessingError {
            message: format!("product {} has no stock entries", raw.id),
        })?;

        let prices = &stock.prices_per_unit;
        let (regular_price, promo_price) = if prices.is_promo {
            (prices.old_price.clone(), Some(prices.price.clone()))
        } else {
            (Some(prices.price.clone()), prices.old_price.clone())
        };

        Ok(Self {
            id: raw.id,
            name: raw.name.clone(),
            url: format!("{}{}", base_url, raw.url),
            regular_price,
            promo_price,
            brand: raw.manufacturer.name.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldNames {
    pub city: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionProducts {
    pub spb: Vec<Product>,
    pub msk: Vec<Product>,
}

/// The assembled result document written to products.json.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub fields_names: FieldNames,
    pub products: RegionProducts,
}

impl Catalog {
    pub fn new(spb: Vec<Product>, msk: Vec<Product>) -> Self {
        Self {
            fields_names: FieldNames {
                city: CITY_FIELDS.iter().map(|s| (*s).to_string()).collect(),
            },
            products: RegionProducts { spb, msk },
        }
    }

    /// Serializes as UTF-8 JSON with 3-space indentation, non-ASCII kept
    /// literal.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"   ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(buf)
    }
}
