//! Tool-level orchestration: normalize, call the provider, shape.

use crate::capability::SearchBackend;
use crate::envelope::{
    shape_legacy, shape_smart, DetailContext, ProgramType, SearchContext, SearchEnvelope,
    ToolOutcome,
};
use crate::error::CoreResult;
use crate::params::{AssociateSearchParams, BachelorSearchParams, ParametersUsed};
use crate::provider::AtlasProvider;
use crate::types::{DegreeLevel, DetailRecord, FilterMapping, ProgramRecord, Year, YopCode};
use std::sync::Arc;
use tracing::{debug, error, warn};

pub type DetailOutcome = ToolOutcome<DetailRecord, DetailContext>;
pub type SearchOutcome = ToolOutcome<SearchEnvelope, SearchContext>;

/// Per-level search request after validation
struct SearchPlan {
    level: DegreeLevel,
    smart_filter: FilterMapping,
    legacy_filter: FilterMapping,
    limit: u32,
    validate_records: bool,
    program_type: Option<ProgramType>,
}

/// Stateless handler behind the four tools
#[derive(Clone)]
pub struct ProgramService {
    atlas: Arc<dyn AtlasProvider>,
    search: SearchBackend,
}

impl ProgramService {
    pub fn new(atlas: Arc<dyn AtlasProvider>, search: SearchBackend) -> Self {
        Self { atlas, search }
    }

    pub fn search_backend(&self) -> &SearchBackend {
        &self.search
    }

    /// Fetch every detail section for one program and year
    pub async fn atlas_details(
        &self,
        level: DegreeLevel,
        program_id: &str,
        year: i64,
    ) -> DetailOutcome {
        match self.fetch_details(level, program_id, year).await {
            Ok(details) => ToolOutcome::Success(details),
            Err(e) => {
                error!(%level, program_id, year, error = %e, "Atlas detail lookup failed");
                ToolOutcome::failure(e.to_string(), DetailContext::new(program_id, year))
            }
        }
    }

    async fn fetch_details(
        &self,
        level: DegreeLevel,
        program_id: &str,
        year: i64,
    ) -> CoreResult<DetailRecord> {
        let program_id = YopCode::new(program_id)?;
        let year = Year::new(year)?;
        debug!(%level, %program_id, %year, "Fetching atlas details");
        Ok(self.atlas.fetch_all_details(level, &program_id, year).await?)
    }

    pub async fn search_bachelor(&self, params: &BachelorSearchParams) -> SearchOutcome {
        if params.availability.is_some() {
            warn!("availability filter is accepted but not forwarded to the provider");
        }

        let plan = params.results_limit().map(|limit| SearchPlan {
            level: DegreeLevel::Bachelor,
            smart_filter: params.smart_filter(),
            legacy_filter: params.legacy_filter(),
            limit,
            validate_records: true,
            program_type: None,
        });
        self.run_search(plan, params.parameters_used(), None).await
    }

    pub async fn search_associate(&self, params: &AssociateSearchParams) -> SearchOutcome {
        if params.availability.is_some() {
            warn!("availability filter is accepted but not forwarded to the provider");
        }

        let program_type = Some(ProgramType::AssociateDegree);
        let plan = params.validate().and_then(|_| params.results_limit()).map(|limit| SearchPlan {
            level: DegreeLevel::Associate,
            smart_filter: params.smart_filter(),
            legacy_filter: params.legacy_filter(),
            limit,
            validate_records: false,
            program_type,
        });
        self.run_search(plan, params.parameters_used(), program_type)
            .await
    }

    /// Error envelope for arguments that could not be decoded at all
    pub fn search_argument_failure(
        &self,
        message: impl Into<String>,
        parameters_used: ParametersUsed,
        program_type: Option<ProgramType>,
    ) -> SearchOutcome {
        let context = SearchContext::new(self.search.search_method(), parameters_used, program_type);
        ToolOutcome::failure(message, context)
    }

    async fn run_search(
        &self,
        plan: CoreResult<SearchPlan>,
        parameters_used: ParametersUsed,
        program_type: Option<ProgramType>,
    ) -> SearchOutcome {
        let result = match plan {
            Ok(plan) => self.execute(plan).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(envelope) => ToolOutcome::Success(envelope),
            Err(e) => {
                error!(
                    method = self.search.search_method().attempted_tag(),
                    error = %e,
                    "Program search failed"
                );
                self.search_argument_failure(e.to_string(), parameters_used, program_type)
            }
        }
    }

    async fn execute(&self, plan: SearchPlan) -> CoreResult<SearchEnvelope> {
        match &self.search {
            SearchBackend::Smart(provider) => {
                debug!(level = %plan.level, filters = ?plan.smart_filter, "Smart search");
                let records = provider
                    .smart_search(plan.level, &plan.smart_filter, true)
                    .await?;
                Ok(shape_smart(records, plan.validate_records, plan.program_type))
            }
            SearchBackend::Legacy(provider) => {
                debug!(level = %plan.level, filters = ?plan.legacy_filter, "Legacy search");
                let records: Vec<ProgramRecord> = provider
                    .legacy_search(plan.level, &plan.legacy_filter)
                    .await?;
                Ok(shape_legacy(records, plan.limit as usize, plan.program_type))
            }
        }
    }
}

impl std::fmt::Debug for ProgramService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgramService")
            .field("search", &self.search)
            .finish_non_exhaustive()
    }
}
