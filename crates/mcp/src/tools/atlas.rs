// Atlas detail tools: one program, one year, every detail section

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_integer, json_schema_object, json_schema_string, Tool};
use serde::Deserialize;
use serde_json::{json, Value};
use yokatlas_core::envelope::DetailContext;
use yokatlas_core::{DegreeLevel, DetailOutcome, ProgramService, ToolOutcome, MAX_YEAR, MIN_YEAR};

/// Detail lookup tool, one instance per degree level
pub struct AtlasDetailsTool {
    level: DegreeLevel,
    service: ProgramService,
}

impl AtlasDetailsTool {
    pub fn new(level: DegreeLevel, service: ProgramService) -> Self {
        Self { level, service }
    }

    pub fn bachelor(service: ProgramService) -> Self {
        Self::new(DegreeLevel::Bachelor, service)
    }

    pub fn associate(service: ProgramService) -> Self {
        Self::new(DegreeLevel::Associate, service)
    }

    fn name(&self) -> &'static str {
        match self.level {
            DegreeLevel::Bachelor => "get_bachelor_degree_atlas_details",
            DegreeLevel::Associate => "get_associate_degree_atlas_details",
        }
    }

    fn example_code(&self) -> &'static str {
        match self.level {
            DegreeLevel::Bachelor => "102210277",
            DegreeLevel::Associate => "120910060",
        }
    }

    async fn run(&self, arguments: Value) -> DetailOutcome {
        match serde_json::from_value::<AtlasDetailsArgs>(arguments.clone()) {
            Ok(args) => {
                self.service
                    .atlas_details(self.level, &args.yop_kodu, args.year)
                    .await
            }
            Err(e) => {
                tracing::warn!(tool = self.name(), error = %e, "Rejected tool arguments");
                let echo = |key: &str| arguments.get(key).cloned().unwrap_or(Value::Null);
                ToolOutcome::failure(
                    format!("Invalid arguments: {}", e),
                    DetailContext::new(echo("yop_kodu"), echo("year")),
                )
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct AtlasDetailsArgs {
    yop_kodu: String,
    year: i64,
}

#[async_trait::async_trait]
impl Tool for AtlasDetailsTool {
    fn schema(&self) -> ToolSchema {
        let program_kind = match self.level {
            DegreeLevel::Bachelor => "bachelor's degree",
            DegreeLevel::Associate => "associate degree",
        };

        ToolSchema {
            name: self.name().to_string(),
            description: format!(
                "Get comprehensive details for a specific {} program from YÖK Atlas: \
                 general information, quota, placement and score data, student \
                 demographics, academic staff and historical placement trends.",
                program_kind
            ),
            input_schema: json_schema_object(
                json!({
                    "yop_kodu": json_schema_string(&format!(
                        "Program YÖP code (e.g., '{}'), unique identifier for the {} program",
                        self.example_code(),
                        program_kind
                    )),
                    "year": json_schema_integer(
                        "Data year for statistics (e.g., 2024, 2023)",
                        Some(MIN_YEAR as i64),
                        Some(MAX_YEAR as i64),
                        None,
                    ),
                }),
                vec!["yop_kodu", "year"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> CallToolResult {
        CallToolResult::structured(self.run(arguments).await.into_response())
    }
}
