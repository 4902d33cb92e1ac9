use clap::Parser;
use metro_catalog::core::ConfigProvider;
use metro_catalog::utils::{logger, validation::Validate};
use metro_catalog::{CatalogPipeline, CliConfig, EtlEngine, LocalStorage, TomlConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting metro-catalog CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    match cli.config.clone() {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path);
            let file_config = match TomlConfig::from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::error!("❌ Failed to load configuration file: {}", e);
                    eprintln!("❌ {}", e);
                    std::process::exit(1);
                }
            };
            run_pipeline(file_config).await
        }
        None => run_pipeline(cli).await,
    }
}

async fn run_pipeline<C>(config: C) -> Result<(), Box<dyn std::error::Error>>
where
    C: ConfigProvider + Validate + std::fmt::Debug + 'static,
{
    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    // 建立存儲和管道
    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = CatalogPipeline::new(storage, config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Catalog collection completed successfully!");
            tracing::info!("📁 Output saved to: {}", output_path);
            println!("✅ Catalog collection completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("❌ Catalog collection failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
