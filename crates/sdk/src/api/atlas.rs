//! Atlas (program detail) endpoints.

use crate::client::YokAtlasClient;
use crate::error::YokAtlasResult;
use yokatlas_core::{DegreeLevel, DetailRecord, Year, YopCode};

/// Atlas API for full program details.
pub struct AtlasApi<'a> {
    client: &'a YokAtlasClient,
}

impl<'a> AtlasApi<'a> {
    pub(crate) fn new(client: &'a YokAtlasClient) -> Self {
        Self { client }
    }

    /// Fetch every detail section for one program and year.
    pub async fn details(
        &self,
        level: DegreeLevel,
        program_id: &YopCode,
        year: Year,
    ) -> YokAtlasResult<DetailRecord> {
        let path = ["v1", "atlas", level.path_segment(), program_id.as_str()];
        self.client
            .http
            .get_with_query(&path, &[("year", year.value())])
            .await
    }
}
