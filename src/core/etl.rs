use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Extracting catalog data...");
        let raw_data = self.pipeline.extract().await?;
        let total: usize = raw_data.iter().map(|r| r.products.len()).sum();
        tracing::info!(
            "Extracted {} products across {} regions",
            total,
            raw_data.len()
        );

        tracing::info!("Transforming catalog data...");
        let catalog = self.pipeline.transform(raw_data).await?;
        tracing::info!(
            "Assembled catalog: spb={} products, msk={} products",
            catalog.products.spb.len(),
            catalog.products.msk.len()
        );

        tracing::info!("Writing catalog...");
        let output_path = self.pipeline.load(catalog).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
