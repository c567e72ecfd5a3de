// ==========================================
// Spin QC 报表查询层 - 领域模型层
// ==========================================
// 职责: 定义 QC 实体、样本状态、过滤条件、合格率口径
// 红线: 不含数据访问逻辑
// ==========================================

pub mod filter;
pub mod metrics;
pub mod sample;
pub mod types;

// 重导出核心类型
pub use filter::{FilterViolation, ReportFilter};
pub use metrics::PassFailCounts;
pub use sample::{
    Approval, FillLine, Location, Product, ReagentFail, Sample, SampleDefect, SampleDetail, Spec,
};
pub use types::{defect_label, SampleState, SAMPLE_DEFECT_CODES, UNKNOWN_DEFECT_LABEL};
