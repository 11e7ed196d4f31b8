//! # YÖK Atlas SDK
//!
//! Async client for a provider service that hosts the YÖK Atlas
//! data-retrieval library. The client implements the provider traits from
//! `yokatlas-core`, so it can be handed straight to a `ProgramService`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use yokatlas_sdk::{YokAtlasClient, YokAtlasResult};
//! use yokatlas_core::{DegreeLevel, Year, YopCode};
//!
//! #[tokio::main]
//! async fn main() -> YokAtlasResult<()> {
//!     let client = YokAtlasClient::builder()
//!         .base_url("http://localhost:9000")
//!         .build()?;
//!
//!     let caps = client.capabilities().get().await?;
//!     println!("smart search available: {}", caps.smart_search);
//!
//!     let program = YopCode::new("102210277").expect("valid code");
//!     let year = Year::new(2024).expect("supported year");
//!     let details = client
//!         .atlas()
//!         .details(DegreeLevel::Bachelor, &program, year)
//!         .await?;
//!     println!("{} detail sections", details.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod provider;
pub mod transport;

pub use client::{YokAtlasClient, YokAtlasClientBuilder};
pub use config::{ClientConfig, RetryConfig};
pub use error::{YokAtlasError, YokAtlasResult};
