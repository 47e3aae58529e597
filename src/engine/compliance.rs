// ==========================================
// 施工进度数据导入系统 - 合规分类引擎
// ==========================================
// 红线: COMPLIANT 当且仅当三项均为 Yes；三项均未知为 UNKNOWN
// ==========================================
// 职责: 三项合规字段 → ComplianceStatus + 问题列表
// 输入: 固定位置网格（V2:X2）或行式数据源的列
// 输出: PackageCompliance
// ==========================================

use crate::config::sheet_layout::{
    CESMPS_COL, CESMPS_LABELS, OHS_MEASURES_COL, OHS_MEASURES_LABELS, STAFF_RFB_COL,
    STAFF_RFB_LABELS, STATUS_ROW,
};
use crate::domain::compliance::{ComplianceInput, PackageCompliance};
use crate::domain::sheet::{CellGrid, RawRow};
use crate::domain::types::{ComplianceAnswer, ComplianceStatus};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::task_importer_trait::DataCleaner as _;
use tracing::{debug, warn};

const NO_DATA_ISSUE: &str = "No compliance data available";

// ==========================================
// ComplianceField - 三项合规字段
// ==========================================
#[derive(Debug, Clone, Copy)]
enum ComplianceField {
    StaffRfb,
    Cesmps,
    OhsMeasures,
}

impl ComplianceField {
    /// 答案为 No 时的问题描述
    fn negative_issue(self) -> &'static str {
        match self {
            ComplianceField::StaffRfb => "Staff RFB not provided",
            ComplianceField::Cesmps => "CESMPS not submitted",
            ComplianceField::OhsMeasures => "OHS measures not implemented",
        }
    }

    /// 答案未知时的问题描述
    fn unknown_issue(self) -> &'static str {
        match self {
            ComplianceField::StaffRfb => "Staff RFB status unknown",
            ComplianceField::Cesmps => "CESMPS status unknown",
            ComplianceField::OhsMeasures => "OHS measures status unknown",
        }
    }
}

pub struct ComplianceClassifier {
    cleaner: DataCleaner,
}

impl Default for ComplianceClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplianceClassifier {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 分类（主入口）
    pub fn classify(&self, package_id: &str, input: &ComplianceInput) -> PackageCompliance {
        let staff_rfb = self.cleaner.parse_yes_no(input.no_of_staff_rfb.as_deref());
        let cesmps_submitted = self.cleaner.parse_yes_no(input.cesmps_submitted.as_deref());
        let ohs_measures = self.cleaner.parse_yes_no(input.ohs_measures.as_deref());

        let answers = [
            (ComplianceField::StaffRfb, staff_rfb),
            (ComplianceField::Cesmps, cesmps_submitted),
            (ComplianceField::OhsMeasures, ohs_measures),
        ];

        let (status, issues) = if answers.iter().all(|(_, a)| *a == ComplianceAnswer::Yes) {
            (ComplianceStatus::Compliant, Vec::new())
        } else if answers.iter().all(|(_, a)| *a == ComplianceAnswer::Unknown) {
            (ComplianceStatus::Unknown, vec![NO_DATA_ISSUE.to_string()])
        } else {
            let issues = answers
                .iter()
                .filter_map(|(field, answer)| match answer {
                    ComplianceAnswer::Yes => None,
                    ComplianceAnswer::No => Some(field.negative_issue().to_string()),
                    ComplianceAnswer::Unknown => Some(field.unknown_issue().to_string()),
                })
                .collect();
            (ComplianceStatus::NonCompliant, issues)
        };

        PackageCompliance {
            package_id: package_id.to_string(),
            staff_rfb,
            cesmps_submitted,
            ohs_measures,
            status,
            issues,
        }
    }

    /// 从固定位置网格读取（V2:X2）
    ///
    /// 网格过窄时缺失字段按未知处理
    pub fn classify_grid(&self, package_id: &str, grid: &CellGrid) -> PackageCompliance {
        let width = grid.width_of(STATUS_ROW);
        if grid.is_empty() {
            debug!(package_id = %package_id, "空网格，合规状态未知");
        } else if width <= OHS_MEASURES_COL {
            warn!(
                package_id = %package_id,
                width = width,
                required = OHS_MEASURES_COL + 1,
                "网格列数不足，缺失的合规字段按未知处理"
            );
        }

        let read = |col: usize| grid.get(STATUS_ROW, col).and_then(|cell| cell.as_text());
        let input = ComplianceInput {
            no_of_staff_rfb: read(STAFF_RFB_COL),
            cesmps_submitted: read(CESMPS_COL),
            ohs_measures: read(OHS_MEASURES_COL),
        };

        self.classify(package_id, &input)
    }

    /// 按标段读取合规状态
    ///
    /// 固定位置网格优先；网格无答案（空网格、列数不足或 V2:X2 为空）时改读行式数据源的列
    pub fn classify_sheet(
        &self,
        package_id: &str,
        grid: &CellGrid,
        rows: &[RawRow],
    ) -> PackageCompliance {
        let from_grid = self.classify_grid(package_id, grid);
        if from_grid.status != ComplianceStatus::Unknown || rows.is_empty() {
            return from_grid;
        }

        let from_rows = self.classify_rows(package_id, rows);
        if from_rows.status != ComplianceStatus::Unknown {
            debug!(package_id = %package_id, "合规字段取自行式数据源");
        }
        from_rows
    }

    /// 从行式数据源读取（首个带合规列的行；友好标签优先）
    pub fn classify_rows(&self, package_id: &str, rows: &[RawRow]) -> PackageCompliance {
        let read = |row: &RawRow, labels: &[&str; 2]| {
            labels
                .iter()
                .find_map(|label| row.get(label))
                .and_then(|cell| cell.as_text())
        };

        let input = rows
            .iter()
            .map(|row| ComplianceInput {
                no_of_staff_rfb: read(row, &STAFF_RFB_LABELS),
                cesmps_submitted: read(row, &CESMPS_LABELS),
                ohs_measures: read(row, &OHS_MEASURES_LABELS),
            })
            .find(|input| {
                input.no_of_staff_rfb.is_some()
                    || input.cesmps_submitted.is_some()
                    || input.ohs_measures.is_some()
            })
            .unwrap_or_default();

        self.classify(package_id, &input)
    }
}
