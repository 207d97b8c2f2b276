use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::db::models::RequirementType;
use crate::modules::review::store::StoreError;

use super::summary::{summarize, RequirementStatusRow, SectionComplianceSummary};

/// Read-side source for compliance aggregation.
#[async_trait]
pub trait ComplianceSource: Send + Sync {
    async fn section_exists(&self, section_id: Uuid) -> Result<bool, StoreError>;
    async fn trainee_count(&self, section_id: Uuid) -> Result<u64, StoreError>;
    async fn requirement_types(&self) -> Result<Vec<RequirementType>, StoreError>;
    /// Current derived status per (trainee, requirement) pair in the section.
    async fn current_statuses(
        &self,
        section_id: Uuid,
    ) -> Result<Vec<RequirementStatusRow>, StoreError>;
}

pub struct ComplianceService<S> {
    source: Arc<S>,
}

impl<S> ComplianceService<S>
where
    S: ComplianceSource + 'static,
{
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    pub async fn section_summary(
        &self,
        section_id: Uuid,
    ) -> Result<SectionComplianceSummary, StoreError> {
        if !self.source.section_exists(section_id).await? {
            return Err(StoreError::NotFound);
        }

        let total_trainees = self.source.trainee_count(section_id).await?;
        let requirement_types = self.source.requirement_types().await?;
        let rows = self.source.current_statuses(section_id).await?;

        Ok(summarize(
            section_id,
            total_trainees,
            &requirement_types,
            &rows,
        ))
    }
}
