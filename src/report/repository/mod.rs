// ==========================================
// Spin QC 报表查询层 - 报表仓储模块
// ==========================================
// 职责: 每个报表一个只读仓储，统一基于 SampleScope 取样本范围
// ==========================================

pub mod defect_repo;
pub mod fill_line_repo;
pub mod location_repo;
pub mod reagent_failure_repo;
pub mod sample_detail_repo;
pub mod summary_repo;
pub mod trend_repo;

#[cfg(test)]
pub(crate) mod test_fixture;

// 重导出
pub use defect_repo::DefectRepository;
pub use fill_line_repo::FillLineRepository;
pub use location_repo::LocationRepository;
pub use reagent_failure_repo::ReagentFailureRepository;
pub use sample_detail_repo::SampleDetailRepository;
pub use summary_repo::SummaryRepository;
pub use trend_repo::TrendRepository;
