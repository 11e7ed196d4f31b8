//! Search bachelor programs through a provider service.
//!
//! Run with:
//! ```sh
//! YOKATLAS_PROVIDER_URL=http://localhost:9000 cargo run --example search_programs
//! ```

use std::sync::Arc;
use yokatlas_core::{detect_backend, BachelorSearchParams, ProgramService, SurfacePreference};
use yokatlas_sdk::YokAtlasClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let base_url = std::env::var("YOKATLAS_PROVIDER_URL")
        .unwrap_or_else(|_| "http://localhost:9000".to_string());

    let client = Arc::new(YokAtlasClient::builder().base_url(base_url).build()?);
    let backend = detect_backend(client.clone(), SurfacePreference::Auto).await?;
    println!("Using {} search", backend.surface());

    let service = ProgramService::new(client, backend);
    let params = BachelorSearchParams {
        university: "boğaziçi".to_string(),
        program: "bilgisayar".to_string(),
        results_limit: Some(5),
        ..Default::default()
    };

    let response = service.search_bachelor(&params).await.into_response();
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
