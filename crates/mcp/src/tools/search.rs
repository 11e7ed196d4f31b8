// Program search tools with friendly and legacy parameter vocabularies

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    json_schema_enum, json_schema_integer, json_schema_number, json_schema_object,
    json_schema_string, Tool,
};
use serde_json::{json, Map, Value};
use yokatlas_core::params::{
    DEFAULT_LOWER_SCORE, DEFAULT_PAGE, DEFAULT_RESULTS_LIMIT, DEFAULT_UPPER_SCORE,
    MAX_RESULTS_LIMIT,
};
use yokatlas_core::{
    AssociateSearchParams, Availability, BachelorSearchParams, EducationType, FeeType,
    ParametersUsed, ProgramService, ProgramType, ScoreType, UniversityType,
};

/// Properties shared by both search tools
fn friendly_properties(university_example: &str, program_example: &str) -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert(
        "university".to_string(),
        json_schema_string(&format!(
            "University name with fuzzy matching support (e.g., {})",
            university_example
        )),
    );
    properties.insert(
        "program".to_string(),
        json_schema_string(&format!(
            "Program name with partial matching (e.g., {})",
            program_example
        )),
    );
    properties.insert(
        "city".to_string(),
        json_schema_string("City name where the university is located"),
    );
    properties.insert(
        "university_type".to_string(),
        json_schema_enum(
            &UniversityType::literals(),
            "University type: Devlet (State), Vakıf (Foundation), KKTC (TRNC), Yurt Dışı (International)",
        ),
    );
    properties.insert(
        "fee_type".to_string(),
        json_schema_enum(
            &FeeType::literals(),
            "Fee status: Ücretsiz (Free), Ücretli (Paid), İÖ-Ücretli (Evening-Paid), Burslu (Scholarship), \
             %50/%25 İndirimli (Discounted), AÖ-Ücretli (Open Education-Paid), UÖ-Ücretli (Distance Learning-Paid)",
        ),
    );
    properties.insert(
        "education_type".to_string(),
        json_schema_enum(
            &EducationType::literals(),
            "Education type: Örgün (Regular), İkinci (Evening), Açıköğretim (Open Education), Uzaktan (Distance Learning)",
        ),
    );
    properties.insert(
        "availability".to_string(),
        json_schema_enum(
            &Availability::literals(),
            "Program availability: Doldu (Filled), Doldu# (Filled with conditions), Dolmadı (Not filled), Yeni (New program)",
        ),
    );
    properties.insert(
        "results_limit".to_string(),
        json_schema_integer(
            "Maximum number of results to return",
            Some(1),
            Some(MAX_RESULTS_LIMIT as i64),
            Some(DEFAULT_RESULTS_LIMIT as i64),
        ),
    );
    properties.insert(
        "uni_adi".to_string(),
        json_schema_string("Legacy alias for university"),
    );
    properties.insert(
        "program_adi".to_string(),
        json_schema_string("Legacy alias for program"),
    );
    properties.insert(
        "universite_turu".to_string(),
        json_schema_string("Legacy alias for university_type"),
    );
    properties.insert(
        "ucret_burs".to_string(),
        json_schema_string("Legacy alias for fee_type"),
    );
    properties.insert(
        "ogretim_turu".to_string(),
        json_schema_string("Legacy alias for education_type"),
    );
    properties
}

/// Bachelor's degree search
pub struct BachelorSearchTool {
    service: ProgramService,
}

impl BachelorSearchTool {
    pub const NAME: &'static str = "search_bachelor_degree_programs";

    pub fn new(service: ProgramService) -> Self {
        Self { service }
    }
}

#[async_trait::async_trait]
impl Tool for BachelorSearchTool {
    fn schema(&self) -> ToolSchema {
        let mut properties = friendly_properties("'boğaziçi'", "'bilgisayar'");
        properties.insert(
            "score_type".to_string(),
            json_schema_enum(
                &ScoreType::literals(),
                "Score type: SAY (Science), EA (Equal Weight), SOZ (Verbal), DIL (Language)",
            ),
        );
        properties.insert("sehir".to_string(), json_schema_string("Legacy alias for city"));
        properties.insert(
            "puan_turu".to_string(),
            json_schema_string("Legacy alias for score_type, any case"),
        );
        properties.insert(
            "length".to_string(),
            json_schema_integer("Legacy alias for results_limit", Some(0), None, None),
        );

        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Search for bachelor's degree programs with fuzzy university matching \
                          (e.g., 'boğaziçi' → 'BOĞAZİÇİ ÜNİVERSİTESİ') and partial program \
                          matching (e.g., 'bilgisayar' finds all computer programs)."
                .to_string(),
            input_schema: json_schema_object(Value::Object(properties), vec![]),
        }
    }

    async fn execute(&self, arguments: Value) -> CallToolResult {
        let outcome = match serde_json::from_value::<BachelorSearchParams>(arguments.clone()) {
            Ok(params) => self.service.search_bachelor(&params).await,
            Err(e) => {
                tracing::warn!(tool = Self::NAME, error = %e, "Rejected tool arguments");
                self.service.search_argument_failure(
                    format!("Invalid arguments: {}", e),
                    ParametersUsed::from_raw(&arguments, "sehir"),
                    None,
                )
            }
        };
        CallToolResult::structured(outcome.into_response())
    }
}

/// Associate degree (önlisans) search
pub struct AssociateSearchTool {
    service: ProgramService,
}

impl AssociateSearchTool {
    pub const NAME: &'static str = "search_associate_degree_programs";

    pub fn new(service: ProgramService) -> Self {
        Self { service }
    }
}

#[async_trait::async_trait]
impl Tool for AssociateSearchTool {
    fn schema(&self) -> ToolSchema {
        let mut properties = friendly_properties("'anadolu'", "'turizm'");
        properties.insert(
            "sehir_adi".to_string(),
            json_schema_string("Legacy alias for city"),
        );
        properties.insert(
            "yop_kodu".to_string(),
            json_schema_string("Exact program YÖP code (legacy search only)"),
        );
        properties.insert(
            "doluluk".to_string(),
            json_schema_string("Legacy availability filter"),
        );
        properties.insert(
            "ust_puan".to_string(),
            json_schema_number("Upper score bound (legacy search only)", Some(DEFAULT_UPPER_SCORE)),
        );
        properties.insert(
            "alt_puan".to_string(),
            json_schema_number("Lower score bound (legacy search only)", Some(DEFAULT_LOWER_SCORE)),
        );
        properties.insert(
            "page".to_string(),
            json_schema_integer(
                "Result page (legacy search only)",
                Some(1),
                None,
                Some(DEFAULT_PAGE as i64),
            ),
        );

        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Search for associate degree (önlisans) programs with fuzzy university \
                          matching (e.g., 'anadolu' → 'ANADOLU ÜNİVERSİTESİ') and partial program \
                          matching (e.g., 'turizm' finds all tourism programs). Associate degree \
                          programs use TYT scores, so there is no score_type filter."
                .to_string(),
            input_schema: json_schema_object(Value::Object(properties), vec![]),
        }
    }

    async fn execute(&self, arguments: Value) -> CallToolResult {
        let outcome = match serde_json::from_value::<AssociateSearchParams>(arguments.clone()) {
            Ok(params) => self.service.search_associate(&params).await,
            Err(e) => {
                tracing::warn!(tool = Self::NAME, error = %e, "Rejected tool arguments");
                self.service.search_argument_failure(
                    format!("Invalid arguments: {}", e),
                    ParametersUsed::from_raw(&arguments, "sehir_adi"),
                    Some(ProgramType::AssociateDegree),
                )
            }
        };
        CallToolResult::structured(outcome.into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friendly_schema_lists_enum_literals() {
        let properties = friendly_properties("'x'", "'y'");
        assert_eq!(properties["fee_type"]["enum"].as_array().unwrap().len(), 8);
        assert_eq!(properties["results_limit"]["maximum"], 500);
        assert!(!properties.contains_key("score_type"));
    }

    #[test]
    fn test_schema_helpers_have_no_required_fields() {
        let schema = json_schema_object(json!({}), vec![]);
        assert_eq!(schema["required"], json!([]));
    }
}
