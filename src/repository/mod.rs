// ==========================================
// Spin QC 报表查询层 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑，且只读
// 约束: 所有取值使用参数化绑定，防止 SQL 注入
// ==========================================

pub mod dimension_repo;
pub mod error;
pub mod sample_repo;

// 重导出核心仓储
pub use dimension_repo::{DimensionRepository, UnresolvedNames};
pub use error::{RepositoryError, RepositoryResult};
pub use sample_repo::SampleRepository;
