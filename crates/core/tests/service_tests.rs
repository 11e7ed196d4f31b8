//! Behavioural tests for ProgramService against recording fake providers.

use serde_json::json;
use std::sync::{Arc, Mutex};
use yokatlas_core::{
    AssociateSearchParams, AtlasProvider, BachelorSearchParams, DegreeLevel, DetailRecord,
    FilterMapping, FilterValue, LegacySearchProvider, ProgramRecord, ProgramService,
    ProviderError, ProviderResult, SearchBackend, SmartSearchProvider, Year, YopCode,
};

#[derive(Default)]
struct RecordingProvider {
    calls: Mutex<Vec<(DegreeLevel, FilterMapping, Option<bool>)>>,
    records: Vec<ProgramRecord>,
    fail_with: Option<ProviderError>,
}

impl RecordingProvider {
    fn returning(records: Vec<ProgramRecord>) -> Arc<Self> {
        Arc::new(Self {
            records,
            ..Default::default()
        })
    }

    fn failing(error: ProviderError) -> Arc<Self> {
        Arc::new(Self {
            fail_with: Some(error),
            ..Default::default()
        })
    }

    fn last_filters(&self) -> FilterMapping {
        self.calls.lock().unwrap().last().unwrap().1.clone()
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn respond(&self) -> ProviderResult<Vec<ProgramRecord>> {
        match &self.fail_with {
            Some(e) => Err(e.clone()),
            None => Ok(self.records.clone()),
        }
    }
}

#[async_trait::async_trait]
impl SmartSearchProvider for RecordingProvider {
    async fn smart_search(
        &self,
        level: DegreeLevel,
        filters: &FilterMapping,
        smart_search: bool,
    ) -> ProviderResult<Vec<ProgramRecord>> {
        self.calls
            .lock()
            .unwrap()
            .push((level, filters.clone(), Some(smart_search)));
        self.respond()
    }
}

#[async_trait::async_trait]
impl LegacySearchProvider for RecordingProvider {
    async fn legacy_search(
        &self,
        level: DegreeLevel,
        filters: &FilterMapping,
    ) -> ProviderResult<Vec<ProgramRecord>> {
        self.calls.lock().unwrap().push((level, filters.clone(), None));
        self.respond()
    }
}

struct StaticAtlas {
    fail_with: Option<ProviderError>,
}

#[async_trait::async_trait]
impl AtlasProvider for StaticAtlas {
    async fn fetch_all_details(
        &self,
        level: DegreeLevel,
        program_id: &YopCode,
        year: Year,
    ) -> ProviderResult<DetailRecord> {
        if let Some(e) = &self.fail_with {
            return Err(e.clone());
        }
        let value = json!({
            "program_id": program_id.as_str(),
            "year": year.value(),
            "level": level.path_segment(),
            "genel_bilgiler": {"kontenjan": 82}
        });
        match value {
            serde_json::Value::Object(map) => Ok(map),
            _ => Err(ProviderError::internal("unreachable")),
        }
    }
}

fn atlas_ok() -> Arc<dyn AtlasProvider> {
    Arc::new(StaticAtlas { fail_with: None })
}

fn smart_service(provider: Arc<RecordingProvider>) -> ProgramService {
    ProgramService::new(atlas_ok(), SearchBackend::Smart(provider))
}

fn legacy_service(provider: Arc<RecordingProvider>) -> ProgramService {
    ProgramService::new(atlas_ok(), SearchBackend::Legacy(provider))
}

fn program(i: usize) -> ProgramRecord {
    json!({
        "yop_kodu": format!("1022{:05}", i),
        "program_adi": "Bilgisayar Mühendisliği",
        "uni_adi": "BOĞAZİÇİ ÜNİVERSİTESİ"
    })
}

#[tokio::test]
async fn test_bachelor_smart_forwards_only_supplied_fields() {
    let provider = RecordingProvider::returning(vec![program(1), program(2)]);
    let service = smart_service(provider.clone());

    let params: BachelorSearchParams = serde_json::from_value(json!({
        "university": "boğaziçi",
        "program": "bilgisayar"
    }))
    .unwrap();
    let response = service.search_bachelor(&params).await.into_response();

    let forwarded = serde_json::to_value(provider.last_filters()).unwrap();
    assert_eq!(
        forwarded,
        json!({"uni_adi": "boğaziçi", "program_adi": "bilgisayar"})
    );
    assert_eq!(provider.calls.lock().unwrap()[0].2, Some(true));
    assert_eq!(response["search_method"], "smart_search_v0.4.3");
    assert_eq!(response["fuzzy_matching"], true);
    assert_eq!(response["total_found"], 2);
    assert!(response.get("error").is_none());
}

#[tokio::test]
async fn test_friendly_university_wins_over_legacy_alias() {
    let provider = RecordingProvider::returning(vec![]);
    let service = legacy_service(provider.clone());

    let params = BachelorSearchParams {
        university: "hacettepe".to_string(),
        uni_adi: "ANKARA ÜNİVERSİTESİ".to_string(),
        ..Default::default()
    };
    service.search_bachelor(&params).await;

    assert_eq!(
        provider.last_filters().get("uni_adi"),
        Some(&FilterValue::from("hacettepe"))
    );
}

#[tokio::test]
async fn test_associate_legacy_without_arguments() {
    let provider = RecordingProvider::returning(vec![]);
    let service = legacy_service(provider.clone());

    let params: AssociateSearchParams = serde_json::from_value(json!({})).unwrap();
    let response = service.search_associate(&params).await.into_response();

    let forwarded = serde_json::to_value(provider.last_filters()).unwrap();
    assert_eq!(
        forwarded,
        json!({"ust_puan": 550.0, "alt_puan": 150.0, "page": 1})
    );
    assert_eq!(response["search_method"], "legacy_api");
    assert_eq!(response["fuzzy_matching"], false);
    assert_eq!(response["program_type"], "associate_degree");
}

#[tokio::test]
async fn test_legacy_results_respect_limit() {
    let provider = RecordingProvider::returning((0..75).map(program).collect());
    let service = legacy_service(provider);

    for limit in [1u32, 10, 50, 500] {
        let params = BachelorSearchParams {
            results_limit: Some(limit),
            ..Default::default()
        };
        let response = service.search_bachelor(&params).await.into_response();
        let returned = response["programs"].as_array().unwrap().len();
        assert!(returned <= limit as usize);
        assert_eq!(returned, (limit as usize).min(75));
        assert_eq!(response["total_found"], 75);
    }
}

#[tokio::test]
async fn test_legacy_default_limit_is_fifty() {
    let provider = RecordingProvider::returning((0..80).map(program).collect());
    let service = legacy_service(provider);

    let response = service
        .search_associate(&AssociateSearchParams::default())
        .await
        .into_response();
    assert_eq!(response["programs"].as_array().unwrap().len(), 50);
}

#[tokio::test]
async fn test_bachelor_smart_passes_invalid_records_through() {
    let malformed = json!({"program_adi": "Hukuk"});
    let provider = RecordingProvider::returning(vec![program(7), malformed.clone()]);
    let service = smart_service(provider);

    let response = service
        .search_bachelor(&BachelorSearchParams::default())
        .await
        .into_response();

    let programs = response["programs"].as_array().unwrap();
    assert_eq!(programs.len(), 2);
    assert_eq!(programs[0]["yop_kodu"], "102200007");
    assert_eq!(programs[1], malformed);
}

#[tokio::test]
async fn test_search_failure_becomes_error_envelope() {
    let provider = RecordingProvider::failing(ProviderError::Network("connection refused".to_string()));
    let service = smart_service(provider);

    let params = AssociateSearchParams {
        university: "anadolu".to_string(),
        sehir_adi: "Eskişehir".to_string(),
        ..Default::default()
    };
    let response = service.search_associate(&params).await.into_response();

    assert_eq!(response["error"], "Provider unreachable: connection refused");
    assert_eq!(response["search_method"], "smart_search");
    assert_eq!(
        response["parameters_used"],
        json!({"university": "anadolu", "program": "", "city": "Eskişehir"})
    );
    assert_eq!(response["program_type"], "associate_degree");
}

#[tokio::test]
async fn test_invalid_limit_never_reaches_provider() {
    let provider = RecordingProvider::returning(vec![]);
    let service = legacy_service(provider.clone());

    let params = BachelorSearchParams {
        results_limit: Some(900),
        ..Default::default()
    };
    let response = service.search_bachelor(&params).await.into_response();

    assert!(response["error"].as_str().unwrap().contains("results_limit"));
    assert_eq!(response["search_method"], "legacy_api");
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_availability_is_not_forwarded() {
    let provider = RecordingProvider::returning(vec![]);
    let service = smart_service(provider.clone());

    let params: BachelorSearchParams =
        serde_json::from_value(json!({"availability": "Dolmadı"})).unwrap();
    service.search_bachelor(&params).await;

    let forwarded = provider.last_filters();
    assert!(forwarded.is_empty());
}

#[tokio::test]
async fn test_detail_failure_echoes_identifier_and_year() {
    let service = ProgramService::new(
        Arc::new(StaticAtlas {
            fail_with: Some(ProviderError::Upstream {
                status: 502,
                message: "bad gateway".to_string(),
            }),
        }),
        SearchBackend::Legacy(RecordingProvider::returning(vec![])),
    );

    let response = service
        .atlas_details(DegreeLevel::Bachelor, "102210277", 2024)
        .await
        .into_response();

    assert_eq!(
        response,
        json!({
            "error": "Provider returned status 502: bad gateway",
            "program_id": "102210277",
            "year": 2024
        })
    );
}

#[tokio::test]
async fn test_detail_year_out_of_range_is_structured() {
    let service = legacy_service(RecordingProvider::returning(vec![]));

    let response = service
        .atlas_details(DegreeLevel::Associate, "120910060", 2035)
        .await
        .into_response();

    assert!(response["error"].as_str().unwrap().contains("2035"));
    assert_eq!(response["program_id"], "120910060");
    assert_eq!(response["year"], 2035);
}

#[tokio::test]
async fn test_detail_lookup_is_idempotent() {
    let service = legacy_service(RecordingProvider::returning(vec![]));

    let first = service
        .atlas_details(DegreeLevel::Associate, "120910060", 2023)
        .await
        .into_response();
    let second = service
        .atlas_details(DegreeLevel::Associate, "120910060", 2023)
        .await
        .into_response();

    assert_eq!(first, second);
    assert_eq!(first["level"], "onlisans");
    assert_eq!(first["genel_bilgiler"]["kontenjan"], 82);
}
