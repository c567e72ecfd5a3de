// ==========================================
// Spin QC 报表查询层 - R6 用例实现
// ==========================================

use crate::domain::ReportFilter;
use crate::report::repository::location_repo::LocationRepository;
use crate::report::use_cases::r6_location_performance::{
    LocationPerformance, LocationPerformanceUseCase,
};
use crate::repository::RepositoryResult;
use std::sync::Arc;

/// R6 用例实现：厂区 × 灌装线表现
pub struct LocationPerformanceUseCaseImpl {
    repo: Arc<LocationRepository>,
}

impl LocationPerformanceUseCaseImpl {
    pub fn new(repo: Arc<LocationRepository>) -> Self {
        Self { repo }
    }
}

impl LocationPerformanceUseCase for LocationPerformanceUseCaseImpl {
    fn get_location_performance(
        &self,
        filter: &ReportFilter,
    ) -> RepositoryResult<Vec<LocationPerformance>> {
        self.repo.get_location_performance(filter)
    }
}
