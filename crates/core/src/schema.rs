//! Typed view used to normalize bachelor smart-search records.

use crate::types::ProgramRecord;
use serde::{Deserialize, Serialize};

/// Program summary as exposed by the smart search surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramInfo {
    pub yop_kodu: String,
    pub program_adi: String,
    #[serde(default)]
    pub uni_adi: Option<String>,
    #[serde(default)]
    pub fakulte: Option<String>,
    #[serde(default)]
    pub sehir: Option<String>,
    #[serde(default)]
    pub puan_turu: Option<String>,
    #[serde(default)]
    pub universite_turu: Option<String>,
    #[serde(default)]
    pub ucret_burs: Option<String>,
    #[serde(default)]
    pub ogretim_turu: Option<String>,
    #[serde(default)]
    pub doluluk: Option<String>,
    #[serde(default)]
    pub kontenjan: Option<serde_json::Value>,
    #[serde(default)]
    pub yerlesen: Option<serde_json::Value>,
    #[serde(default)]
    pub taban_puan: Option<serde_json::Value>,
    #[serde(default)]
    pub basari_sirasi: Option<serde_json::Value>,
}

/// Reshape a record through [`ProgramInfo`], or hand it back untouched if it
/// does not fit the schema.
pub fn validate_record(record: ProgramRecord) -> ProgramRecord {
    let info = match ProgramInfo::deserialize(&record) {
        Ok(info) => info,
        Err(e) => {
            tracing::debug!(error = %e, "Program record failed validation, passing through");
            return record;
        }
    };

    match serde_json::to_value(&info) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "Failed to re-serialize program record");
            record
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_record_is_normalized() {
        let record = json!({
            "yop_kodu": "102210277",
            "program_adi": "Bilgisayar Mühendisliği",
            "uni_adi": "BOĞAZİÇİ ÜNİVERSİTESİ",
            "taban_puan": 540.12,
            "unknown_field": true
        });

        let validated = validate_record(record);
        assert_eq!(validated["yop_kodu"], "102210277");
        assert_eq!(validated["taban_puan"], 540.12);
        assert!(validated.get("unknown_field").is_none());
        assert!(validated["fakulte"].is_null());
    }

    #[test]
    fn test_invalid_record_passes_through() {
        let record = json!({"program_adi": "Tıp", "yop_kodu": 12345});
        let validated = validate_record(record.clone());
        assert_eq!(validated, record);

        let not_an_object = json!("plain string");
        assert_eq!(validate_record(not_an_object.clone()), not_an_object);
    }
}
