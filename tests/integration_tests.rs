use httpmock::prelude::*;
use metro_catalog::{CatalogPipeline, CliConfig, EtlEngine, LocalStorage, TomlConfig};
use tempfile::TempDir;

fn api_response(products: serde_json::Value) -> serde_json::Value {
    serde_json::json!({"data": {"category": {"products": products}}})
}

fn cli_config(api_endpoint: String, output_path: String) -> CliConfig {
    CliConfig {
        api_endpoint,
        base_url: "https://online.metro-cc.ru".to_string(),
        category_slug: "chay".to_string(),
        page_size: 1000,
        spb_store_id: 15,
        msk_store_id: 11,
        output_path,
        config: None,
        verbose: false,
    }
}

#[tokio::test]
async fn test_end_to_end_two_regions() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let spb_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/products-api/graph")
            .json_body_partial(r#"{"variables": {"storeId": 15}}"#);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(api_response(serde_json::json!([{
                "id": 101,
                "name": "Чай чёрный listovoy",
                "url": "/products/101",
                "stocks": [{"prices_per_unit": {"old_price": 250, "price": 199, "is_promo": true}}],
                "manufacturer": {"name": "Ahmad Tea"}
            }])));
    });
    let msk_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/products-api/graph")
            .json_body_partial(r#"{"variables": {"storeId": 11}}"#);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(api_response(serde_json::json!([{
                "id": 202,
                "name": "Чай зелёный",
                "url": "/products/202",
                "stocks": [{"prices_per_unit": {"old_price": 180, "price": 160, "is_promo": false}}],
                "manufacturer": {"name": "Greenfield"}
            }])));
    });

    let config = cli_config(server.url("/products-api/graph"), output_path.clone());
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = CatalogPipeline::new(storage, config);
    let engine = EtlEngine::new(pipeline);

    let result = engine.run().await;
    assert!(result.is_ok());
    spb_mock.assert();
    msk_mock.assert();

    let output_file = std::path::Path::new(&output_path).join("products.json");
    assert!(output_file.exists());

    let text = std::fs::read_to_string(&output_file).unwrap();

    // 3-space indentation, Cyrillic headers kept literal
    assert!(text.starts_with("{\n   \"fields_names\""));
    assert!(text.contains("Наименование"));
    assert!(!text.contains("\\u"));

    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        parsed["fields_names"]["city"],
        serde_json::json!(["ID", "Наименование", "Ссылка", "Регулярная цена", "Промо цена", "Бренд"])
    );

    // Each region holds the transformed set for its own store id
    let spb = &parsed["products"]["spb"];
    assert_eq!(spb.as_array().unwrap().len(), 1);
    assert_eq!(spb[0]["id"], 101);
    assert_eq!(spb[0]["url"], "https://online.metro-cc.ru/products/101");
    assert_eq!(spb[0]["regular_price"], 250);
    assert_eq!(spb[0]["promo_price"], 199);
    assert_eq!(spb[0]["brand"], "Ahmad Tea");

    let msk = &parsed["products"]["msk"];
    assert_eq!(msk.as_array().unwrap().len(), 1);
    assert_eq!(msk[0]["id"], 202);
    assert_eq!(msk[0]["regular_price"], 160);
    assert_eq!(msk[0]["promo_price"], 180);
}

#[tokio::test]
async fn test_api_failure_writes_no_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/products-api/graph");
        then.status(500);
    });

    let config = cli_config(server.url("/products-api/graph"), output_path.clone());
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = CatalogPipeline::new(storage, config);
    let engine = EtlEngine::new(pipeline);

    let result = engine.run().await;
    assert!(result.is_err());
    api_mock.assert();

    let output_file = std::path::Path::new(&output_path).join("products.json");
    assert!(!output_file.exists());
}

#[tokio::test]
async fn test_end_to_end_with_toml_config() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/graph")
            .json_body_partial(r#"{"variables": {"slug": "kofe", "size": 500}}"#);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(api_response(serde_json::json!([])));
    });

    let config_path = temp_dir.path().join("metro.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
[api]
endpoint = "{}"
base_url = "https://online.metro-cc.ru"

[category]
slug = "kofe"
page_size = 500

[stores]
spb = 15
msk = 11

[output]
path = "{}"
"#,
            server.url("/graph"),
            output_path
        ),
    )
    .unwrap();

    let config = TomlConfig::from_file(config_path.to_str().unwrap()).unwrap();
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = CatalogPipeline::new(storage, config);
    let engine = EtlEngine::new(pipeline);

    let result = engine.run().await;
    assert!(result.is_ok());
    api_mock.assert_hits(2);

    let output_file = std::path::Path::new(&output_path).join("products.json");
    assert!(output_file.exists());

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output_file).unwrap()).unwrap();
    assert_eq!(parsed["products"]["spb"], serde_json::json!([]));
    assert_eq!(parsed["products"]["msk"], serde_json::json!([]));
}
