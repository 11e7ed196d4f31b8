//! Tool parameter sets for the two search tools.

use crate::error::{CoreError, CoreResult};
use crate::filter::{resolve_text, FilterBuilder};
use crate::types::{
    empty_as_none, Availability, EducationType, FeeType, FilterMapping, ScoreType, UniversityType,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_RESULTS_LIMIT: u32 = 50;
pub const MAX_RESULTS_LIMIT: u32 = 500;
pub const DEFAULT_UPPER_SCORE: f64 = 550.0;
pub const DEFAULT_LOWER_SCORE: f64 = 150.0;
pub const DEFAULT_PAGE: u32 = 1;

/// University/program/city values echoed back in error envelopes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParametersUsed {
    pub university: String,
    pub program: String,
    pub city: String,
}

impl ParametersUsed {
    /// Best-effort extraction from raw tool arguments that failed to decode
    pub fn from_raw(arguments: &serde_json::Value, city_alias: &str) -> Self {
        let text = |key: &str| {
            arguments
                .get(key)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };
        Self {
            university: resolve_text(&text("university"), &text("uni_adi")).to_string(),
            program: resolve_text(&text("program"), &text("program_adi")).to_string(),
            city: resolve_text(&text("city"), &text(city_alias)).to_string(),
        }
    }
}

fn check_results_limit(limit: u32) -> CoreResult<u32> {
    if limit == 0 || limit > MAX_RESULTS_LIMIT {
        return Err(CoreError::invalid_parameter(format!(
            "results_limit must be between 1 and {}, got {}",
            MAX_RESULTS_LIMIT, limit
        )));
    }
    Ok(limit)
}

/// Arguments of `search_bachelor_degree_programs`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BachelorSearchParams {
    // Friendly vocabulary
    pub university: String,
    pub program: String,
    pub city: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub score_type: Option<ScoreType>,
    #[serde(deserialize_with = "empty_as_none")]
    pub university_type: Option<UniversityType>,
    #[serde(deserialize_with = "empty_as_none")]
    pub fee_type: Option<FeeType>,
    #[serde(deserialize_with = "empty_as_none")]
    pub education_type: Option<EducationType>,
    #[serde(deserialize_with = "empty_as_none")]
    pub availability: Option<Availability>,
    pub results_limit: Option<u32>,

    // Legacy vocabulary
    pub uni_adi: String,
    pub program_adi: String,
    pub sehir: String,
    pub puan_turu: String,
    pub universite_turu: String,
    pub ucret_burs: String,
    pub ogretim_turu: String,
    pub length: u32,
}

impl BachelorSearchParams {
    pub fn validate(&self) -> CoreResult<()> {
        self.results_limit().map(|_| ())
    }

    /// Effective client-side limit
    pub fn results_limit(&self) -> CoreResult<u32> {
        match (self.results_limit, self.length) {
            (Some(limit), _) => check_results_limit(limit),
            (None, length) if length > 0 => check_results_limit(length),
            _ => Ok(DEFAULT_RESULTS_LIMIT),
        }
    }

    /// Sparse mapping for the smart search surface
    pub fn smart_filter(&self) -> FilterMapping {
        FilterBuilder::new()
            .field("uni_adi", self.university.as_str(), self.uni_adi.as_str())
            .field("program_adi", self.program.as_str(), self.program_adi.as_str())
            .field("city", self.city.as_str(), self.sehir.as_str())
            .field(
                "score_type",
                self.score_type.map(|s| s.as_str()),
                self.puan_turu.as_str(),
            )
            .field(
                "university_type",
                self.university_type.map(|u| u.as_str()),
                self.universite_turu.as_str(),
            )
            .field(
                "fee_type",
                self.fee_type.map(|f| f.as_str()),
                self.ucret_burs.as_str(),
            )
            .field(
                "education_type",
                self.education_type.map(|e| e.as_str()),
                self.ogretim_turu.as_str(),
            )
            .field("length", self.results_limit.unwrap_or(0), self.length)
            .build()
    }

    /// Dense mapping for the legacy search surface, empty fields stripped
    pub fn legacy_filter(&self) -> FilterMapping {
        FilterBuilder::new()
            .field("uni_adi", self.university.as_str(), self.uni_adi.as_str())
            .field("program_adi", self.program.as_str(), self.program_adi.as_str())
            .field("sehir_adi", self.city.as_str(), self.sehir.as_str())
            .field(
                "puan_turu",
                self.score_type.map(|s| s.as_str()),
                self.puan_turu.as_str(),
            )
            .map_text("puan_turu", str::to_lowercase)
            .field(
                "universite_turu",
                self.university_type.map(|u| u.as_str()),
                self.universite_turu.as_str(),
            )
            .field(
                "ucret_burs",
                self.fee_type.map(|f| f.as_str()),
                self.ucret_burs.as_str(),
            )
            .field(
                "ogretim_turu",
                self.education_type.map(|e| e.as_str()),
                self.ogretim_turu.as_str(),
            )
            .always("page", DEFAULT_PAGE)
            .build()
    }

    pub fn parameters_used(&self) -> ParametersUsed {
        ParametersUsed {
            university: resolve_text(&self.university, &self.uni_adi).to_string(),
            program: resolve_text(&self.program, &self.program_adi).to_string(),
            city: resolve_text(&self.city, &self.sehir).to_string(),
        }
    }
}

fn default_upper_score() -> f64 {
    DEFAULT_UPPER_SCORE
}

fn default_lower_score() -> f64 {
    DEFAULT_LOWER_SCORE
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

/// Arguments of `search_associate_degree_programs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociateSearchParams {
    // Friendly vocabulary
    #[serde(default)]
    pub university: String,
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub city: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub university_type: Option<UniversityType>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub fee_type: Option<FeeType>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub education_type: Option<EducationType>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub availability: Option<Availability>,
    #[serde(default)]
    pub results_limit: Option<u32>,

    // Legacy vocabulary
    #[serde(default)]
    pub yop_kodu: String,
    #[serde(default)]
    pub uni_adi: String,
    #[serde(default)]
    pub program_adi: String,
    #[serde(default)]
    pub sehir_adi: String,
    #[serde(default)]
    pub universite_turu: String,
    #[serde(default)]
    pub ucret_burs: String,
    #[serde(default)]
    pub ogretim_turu: String,
    #[serde(default)]
    pub doluluk: String,
    #[serde(default = "default_upper_score")]
    pub ust_puan: f64,
    #[serde(default = "default_lower_score")]
    pub alt_puan: f64,
    #[serde(default = "default_page")]
    pub page: u32,
}

impl Default for AssociateSearchParams {
    fn default() -> Self {
        Self {
            university: String::new(),
            program: String::new(),
            city: String::new(),
            university_type: None,
            fee_type: None,
            education_type: None,
            availability: None,
            results_limit: None,
            yop_kodu: String::new(),
            uni_adi: String::new(),
            program_adi: String::new(),
            sehir_adi: String::new(),
            universite_turu: String::new(),
            ucret_burs: String::new(),
            ogretim_turu: String::new(),
            doluluk: String::new(),
            ust_puan: DEFAULT_UPPER_SCORE,
            alt_puan: DEFAULT_LOWER_SCORE,
            page: DEFAULT_PAGE,
        }
    }
}

impl AssociateSearchParams {
    pub fn validate(&self) -> CoreResult<()> {
        self.results_limit()?;
        if self.page == 0 {
            return Err(CoreError::invalid_parameter("page must be at least 1"));
        }
        if self.alt_puan > self.ust_puan {
            return Err(CoreError::invalid_parameter(format!(
                "alt_puan ({}) must not exceed ust_puan ({})",
                self.alt_puan, self.ust_puan
            )));
        }
        Ok(())
    }

    pub fn results_limit(&self) -> CoreResult<u32> {
        match self.results_limit {
            Some(limit) => check_results_limit(limit),
            None => Ok(DEFAULT_RESULTS_LIMIT),
        }
    }

    pub fn smart_filter(&self) -> FilterMapping {
        FilterBuilder::new()
            .field("uni_adi", self.university.as_str(), self.uni_adi.as_str())
            .field("program_adi", self.program.as_str(), self.program_adi.as_str())
            .field("city", self.city.as_str(), self.sehir_adi.as_str())
            .field(
                "university_type",
                self.university_type.map(|u| u.as_str()),
                self.universite_turu.as_str(),
            )
            .field(
                "fee_type",
                self.fee_type.map(|f| f.as_str()),
                self.ucret_burs.as_str(),
            )
            .field(
                "education_type",
                self.education_type.map(|e| e.as_str()),
                self.ogretim_turu.as_str(),
            )
            .value("length", self.results_limit.unwrap_or(0))
            .build()
    }

    /// Score bounds and page always travel, they carry non-empty defaults
    pub fn legacy_filter(&self) -> FilterMapping {
        FilterBuilder::new()
            .value("yop_kodu", self.yop_kodu.as_str())
            .field("uni_adi", self.university.as_str(), self.uni_adi.as_str())
            .field("program_adi", self.program.as_str(), self.program_adi.as_str())
            .field("sehir_adi", self.city.as_str(), self.sehir_adi.as_str())
            .field(
                "universite_turu",
                self.university_type.map(|u| u.as_str()),
                self.universite_turu.as_str(),
            )
            .field(
                "ucret_burs",
                self.fee_type.map(|f| f.as_str()),
                self.ucret_burs.as_str(),
            )
            .field(
                "ogretim_turu",
                self.education_type.map(|e| e.as_str()),
                self.ogretim_turu.as_str(),
            )
            .value("doluluk", self.doluluk.as_str())
            .always("ust_puan", self.ust_puan)
            .always("alt_puan", self.alt_puan)
            .always("page", self.page)
            .build()
    }

    pub fn parameters_used(&self) -> ParametersUsed {
        ParametersUsed {
            university: resolve_text(&self.university, &self.uni_adi).to_string(),
            program: resolve_text(&self.program, &self.program_adi).to_string(),
            city: resolve_text(&self.city, &self.sehir_adi).to_string(),
        }
    }
}
