// ==========================================
// Spin QC 报表查询层 - 样本明细 CSV 导出
// ==========================================
// 列: Sample ID, Collection Date, Status, Fill Line, Location, Product
// ==========================================

use std::io::Write;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::SampleDetail;

/// CSV 表头
pub const SAMPLE_DETAIL_HEADERS: [&str; 6] = [
    "Sample ID",
    "Collection Date",
    "Status",
    "Fill Line",
    "Location",
    "Product",
];

/// 采样时间的导出格式
const COLLECTED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 写出样本明细 CSV
///
/// # 返回
/// - Ok(n): 写出的数据行数（不含表头）
pub fn write_sample_details_csv<W: Write>(rows: &[SampleDetail], writer: W) -> ApiResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(SAMPLE_DETAIL_HEADERS).map_err(export_error)?;

    for row in rows {
        csv_writer
            .write_record([
                row.sample_set_id.to_string(),
                row.collected.format(COLLECTED_FORMAT).to_string(),
                row.status.to_string(),
                row.fill_line.clone(),
                row.location.clone(),
                row.product.clone(),
            ])
            .map_err(export_error)?;
    }

    csv_writer
        .flush()
        .map_err(|e| ApiError::ExportError(e.to_string()))?;
    Ok(rows.len())
}

fn export_error(e: csv::Error) -> ApiError {
    ApiError::ExportError(e.to_string())
}
