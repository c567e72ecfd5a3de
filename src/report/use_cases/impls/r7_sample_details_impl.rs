// ==========================================
// Spin QC 报表查询层 - R7 用例实现
// ==========================================
// 职责: 最近样本明细 + 单样本下钻视图的组装
// ==========================================

use crate::domain::{defect_label, ReportFilter, SampleDetail, SampleState};
use crate::report::repository::sample_detail_repo::SampleDetailRepository;
use crate::report::use_cases::r7_sample_details::{
    DefectView, ReagentFailView, SampleDetailsUseCase, SampleView,
};
use crate::repository::{RepositoryResult, SampleRepository};
use std::collections::HashMap;
use std::sync::Arc;

/// R7 用例实现：样本明细
pub struct SampleDetailsUseCaseImpl {
    /// 明细仓储
    detail_repo: Arc<SampleDetailRepository>,
    /// 单样本仓储（下钻）
    sample_repo: Arc<SampleRepository>,
}

impl SampleDetailsUseCaseImpl {
    pub fn new(detail_repo: Arc<SampleDetailRepository>, sample_repo: Arc<SampleRepository>) -> Self {
        Self {
            detail_repo,
            sample_repo,
        }
    }
}

impl SampleDetailsUseCase for SampleDetailsUseCaseImpl {
    fn list_recent_sample_details(
        &self,
        filter: &ReportFilter,
        limit: usize,
    ) -> RepositoryResult<Vec<SampleDetail>> {
        self.detail_repo.list_recent_sample_details(filter, limit)
    }

    fn get_sample_view(&self, sample_set_id: i64) -> RepositoryResult<SampleView> {
        let sample = self.sample_repo.get_sample(sample_set_id)?;
        let approvals = self.sample_repo.list_approvals(sample_set_id)?;

        // 审批按时间升序，最后一条即最新审批
        let latest = approvals.last();
        let status = latest
            .map(|a| a.sample_state())
            .unwrap_or(SampleState::Unknown);
        let latest_approval_id = latest.map(|a| a.approval_id);

        let (reagent_fails, defects) = match latest_approval_id {
            Some(approval_id) => {
                let fails = self.sample_repo.list_reagent_fails(approval_id)?;
                let spec_ids: Vec<i64> = fails.iter().filter_map(|f| f.spec_id).collect();
                let standards: HashMap<i64, Option<String>> = self
                    .sample_repo
                    .list_specs(&spec_ids)?
                    .into_iter()
                    .map(|s| (s.id, s.standard_name))
                    .collect();

                let reagent_fails = fails
                    .into_iter()
                    .map(|f| ReagentFailView {
                        reagent_fail_id: f.reagent_fail_id,
                        standard: f
                            .spec_id
                            .and_then(|id| standards.get(&id).cloned().flatten()),
                        spec_id: f.spec_id,
                        reagent: f.reagent,
                    })
                    .collect();

                let defects = self
                    .sample_repo
                    .list_sample_defects(approval_id)?
                    .into_iter()
                    .map(|d| DefectView {
                        sample_defect_id: d.sample_defect_id,
                        code: d.defect_type,
                        defect_type: defect_label(d.defect_type).to_string(),
                    })
                    .collect();

                (reagent_fails, defects)
            }
            None => (Vec::new(), Vec::new()),
        };

        Ok(SampleView {
            sample,
            status,
            approvals,
            latest_approval_id,
            reagent_fails,
            defects,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::repository::test_fixture::seeded_conn;
    use crate::repository::RepositoryError;

    fn setup_use_case() -> SampleDetailsUseCaseImpl {
        let conn = seeded_conn();
        SampleDetailsUseCaseImpl::new(
            Arc::new(SampleDetailRepository::new(conn.clone())),
            Arc::new(SampleRepository::new(conn)),
        )
    }

    #[test]
    fn test_sample_view_uses_latest_approval() {
        let view = setup_use_case().get_sample_view(3).unwrap();
        assert_eq!(view.status, SampleState::Passed);
        assert_eq!(view.approvals.len(), 2);
        assert_eq!(view.latest_approval_id, Some(4));
        // 旧审批下的试剂失败与缺陷不出现
        assert!(view.reagent_fails.is_empty());
        assert!(view.defects.is_empty());
    }

    #[test]
    fn test_sample_view_resolves_standards_and_labels() {
        let view = setup_use_case().get_sample_view(2).unwrap();
        assert_eq!(view.status, SampleState::Failed);

        let fails: Vec<(&str, Option<&str>)> = view
            .reagent_fails
            .iter()
            .map(|f| (f.reagent.as_str(), f.standard.as_deref()))
            .collect();
        assert_eq!(fails, vec![("ALB", Some("Level 1")), ("ALT", None)]);

        let labels: Vec<&str> = view.defects.iter().map(|d| d.defect_type.as_str()).collect();
        assert_eq!(labels, vec!["Other", "Bead Missing"]);
    }

    #[test]
    fn test_sample_view_without_approval() {
        let view = setup_use_case().get_sample_view(5).unwrap();
        assert_eq!(view.status, SampleState::Unknown);
        assert_eq!(view.latest_approval_id, None);
    }

    #[test]
    fn test_sample_view_not_found() {
        assert!(matches!(
            setup_use_case().get_sample_view(404),
            Err(RepositoryError::NotFound { .. })
        ));
    }
}
