use crate::core::{Catalog, ConfigProvider, Pipeline, Product, RawProduct, Region, RegionExtract, Storage};
use crate::domain::model::GraphResponse;
use crate::utils::error::{EtlError, Result};
use reqwest::{Client, StatusCode};
use serde::Serialize;

pub const OUTPUT_FILE: &str = "products.json";

// Query text matches what the products API expects verbatim, including the
// leading newline.
const PRODUCTS_QUERY: &str = r#"
query Query($storeId: Int!, $from: Int!, $slug: String!, $size: Int!, $eshopAvailability: Boolean!) {
  category(storeId: $storeId, slug: $slug, eshopAvailability: $eshopAvailability) {
    products(from: $from, size: $size) {
      id
      name
      url
      stocks {
        prices_per_unit {
          old_price
          price
          is_promo
        }
      }
      manufacturer {
        name
      }
    }
  }
}"#;

#[derive(Debug, Serialize)]
struct GraphRequest<'a> {
    query: &'a str,
    variables: QueryVariables<'a>,
}

#[derive(Debug, Serialize)]
struct QueryVariables<'a> {
    #[serde(rename = "storeId")]
    store_id: u32,
    from: u32,
    slug: &'a str,
    size: u32,
    #[serde(rename = "eshopAvailability")]
    eshop_availability: bool,
}

pub struct CatalogPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> CatalogPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    async fn fetch_region(&self, store_id: u32) -> Result<Vec<RawProduct>> {
        let body = GraphRequest {
            query: PRODUCTS_QUERY,
            variables: QueryVariables {
                store_id,
                from: 0,
                slug: self.config.category_slug(),
                size: self.config.page_size(),
                eshop_availability: self.config.eshop_availability(),
            },
        };

        tracing::debug!(
            "Requesting store {} from {}",
            store_id,
            self.config.api_endpoint()
        );
        let response = self
            .client
            .post(self.config.api_endpoint())
            .json(&body)
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());

        // 只有 200 視為成功
        if response.status() != StatusCode::OK {
            return Err(EtlError::UnexpectedStatus {
                status: response.status().as_u16(),
            });
        }

        let parsed: GraphResponse = response.json().await?;
        Ok(parsed.data.category.products)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CatalogPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<RegionExtract>> {
        let regions = [
            (Region::Spb, self.config.spb_store_id()),
            (Region::Msk, self.config.msk_store_id()),
        ];

        // 兩個請求依序執行
        let mut extracts = Vec::with_capacity(regions.len());
        for (region, store_id) in regions {
            let products = self.fetch_region(store_id).await?;
            tracing::debug!(
                "Store {} ({}) returned {} products",
                store_id,
                region.label(),
                products.len()
            );
            extracts.push(RegionExtract { region, products });
        }

        Ok(extracts)
    }

    async fn transform(&self, data: Vec<RegionExtract>) -> Result<Catalog> {
        let mut spb = Vec::new();
        let mut msk = Vec::new();

        for extract in data {
            let mut products = Vec::with_capacity(extract.products.len());
            for raw in &extract.products {
                products.push(Product::from_raw(raw, self.config.base_url())?);
            }
            match extract.region {
                Region::Spb => spb = products,
                Region::Msk => msk = products,
            }
        }

        Ok(Catalog::new(spb, msk))
    }

    async fn load(&self, catalog: Catalog) -> Result<String> {
        let json_data = catalog.to_json_bytes()?;

        tracing::debug!("Writing {} bytes to {}", json_data.len(), OUTPUT_FILE);
        self.storage.write_file(OUTPUT_FILE, &json_data).await?;

        Ok(format!("{}/{}", self.config.output_path(), OUTPUT_FILE))
    }
}
