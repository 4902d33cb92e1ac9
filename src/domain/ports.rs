use crate::domain::model::{Catalog, RegionExtract};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn base_url(&self) -> &str;
    fn category_slug(&self) -> &str;
    fn page_size(&self) -> u32;
    fn eshop_availability(&self) -> bool;
    fn spb_store_id(&self) -> u32;
    fn msk_store_id(&self) -> u32;
    fn output_path(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RegionExtract>>;
    async fn transform(&self, data: Vec<RegionExtract>) -> Result<Catalog>;
    async fn load(&self, catalog: Catalog) -> Result<String>;
}
