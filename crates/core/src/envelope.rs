//! Response envelopes and the tagged outcome every tool returns.
//!
//! Tools never surface a domain failure as a protocol fault. Both variants of
//! [`ToolOutcome`] serialize into one JSON object, and callers tell them
//! apart by the presence of an `error` key.

use crate::params::ParametersUsed;
use crate::schema::validate_record;
use crate::types::ProgramRecord;
use serde::{Serialize, Serializer};

/// Which provider search surface produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMethod {
    SmartSearch,
    LegacyApi,
}

impl SearchMethod {
    /// Tag written into a successful envelope
    pub fn tag(&self) -> &'static str {
        match self {
            SearchMethod::SmartSearch => "smart_search_v0.4.3",
            SearchMethod::LegacyApi => "legacy_api",
        }
    }

    /// Tag written into an error envelope
    pub fn attempted_tag(&self) -> &'static str {
        match self {
            SearchMethod::SmartSearch => "smart_search",
            SearchMethod::LegacyApi => "legacy_api",
        }
    }

    pub fn is_fuzzy(&self) -> bool {
        matches!(self, SearchMethod::SmartSearch)
    }
}

impl Serialize for SearchMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramType {
    AssociateDegree,
}

/// Uniform search response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchEnvelope {
    pub programs: Vec<ProgramRecord>,
    pub total_found: usize,
    pub search_method: SearchMethod,
    pub fuzzy_matching: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_type: Option<ProgramType>,
}

/// Wrap smart search output. The provider already honoured the limit.
pub fn shape_smart(
    records: Vec<ProgramRecord>,
    validate: bool,
    program_type: Option<ProgramType>,
) -> SearchEnvelope {
    let programs: Vec<ProgramRecord> = if validate {
        records.into_iter().map(validate_record).collect()
    } else {
        records
    };

    SearchEnvelope {
        total_found: programs.len(),
        programs,
        search_method: SearchMethod::SmartSearch,
        fuzzy_matching: true,
        program_type,
    }
}

/// Wrap legacy search output, truncating client-side.
///
/// `total_found` reports how many records the provider returned before
/// truncation.
pub fn shape_legacy(
    mut records: Vec<ProgramRecord>,
    limit: usize,
    program_type: Option<ProgramType>,
) -> SearchEnvelope {
    let total_found = records.len();
    records.truncate(limit);

    SearchEnvelope {
        programs: records,
        total_found,
        search_method: SearchMethod::LegacyApi,
        fuzzy_matching: false,
        program_type,
    }
}

/// Context echoed back when a detail lookup fails
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailContext {
    pub program_id: serde_json::Value,
    pub year: serde_json::Value,
}

impl DetailContext {
    pub fn new(program_id: impl Into<serde_json::Value>, year: impl Into<serde_json::Value>) -> Self {
        Self {
            program_id: program_id.into(),
            year: year.into(),
        }
    }
}

/// Context echoed back when a search fails
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchContext {
    pub search_method: &'static str,
    pub parameters_used: ParametersUsed,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_type: Option<ProgramType>,
}

impl SearchContext {
    pub fn new(
        method: SearchMethod,
        parameters_used: ParametersUsed,
        program_type: Option<ProgramType>,
    ) -> Self {
        Self {
            search_method: method.attempted_tag(),
            parameters_used,
            program_type,
        }
    }
}

/// Result of a tool invocation
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome<T, C> {
    Success(T),
    Failure { message: String, context: C },
}

#[derive(Serialize)]
struct FailureBody<'a, C> {
    error: &'a str,
    #[serde(flatten)]
    context: &'a C,
}

impl<T: Serialize, C: Serialize> ToolOutcome<T, C> {
    pub fn failure(message: impl Into<String>, context: C) -> Self {
        Self::Failure {
            message: message.into(),
            context,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolOutcome::Success(_))
    }

    /// Serialize whichever variant occurred into the response mapping
    pub fn into_response(self) -> serde_json::Value {
        let serialized = match &self {
            ToolOutcome::Success(payload) => serde_json::to_value(payload),
            ToolOutcome::Failure { message, context } => serde_json::to_value(FailureBody {
                error: message,
                context,
            }),
        };

        serialized.unwrap_or_else(|e| {
            serde_json::json!({ "error": format!("Failed to serialize tool response: {}", e) })
        })
    }
}
