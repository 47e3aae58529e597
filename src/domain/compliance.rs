// ==========================================
// 施工进度数据导入系统 - 合规领域模型
// ==========================================
// 职责: 标段合规输入（原始三字段）与分类结果
// ==========================================

use crate::domain::types::{ComplianceAnswer, ComplianceStatus};
use serde::{Deserialize, Serialize};

// ==========================================
// ComplianceInput - 原始合规字段
// ==========================================
// 字段顺序固定: 人员 RFB → CESMP 提交 → OHS 措施
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceInput {
    pub no_of_staff_rfb: Option<String>,
    pub cesmps_submitted: Option<String>,
    pub ohs_measures: Option<String>,
}

impl ComplianceInput {
    pub fn new(
        no_of_staff_rfb: Option<&str>,
        cesmps_submitted: Option<&str>,
        ohs_measures: Option<&str>,
    ) -> Self {
        Self {
            no_of_staff_rfb: no_of_staff_rfb.map(str::to_string),
            cesmps_submitted: cesmps_submitted.map(str::to_string),
            ohs_measures: ohs_measures.map(str::to_string),
        }
    }
}

// ==========================================
// PackageCompliance - 标段合规结果
// ==========================================
// 红线: status = COMPLIANT 当且仅当三项均为 Yes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageCompliance {
    pub package_id: String,
    pub staff_rfb: ComplianceAnswer,
    pub cesmps_submitted: ComplianceAnswer,
    pub ohs_measures: ComplianceAnswer,
    pub status: ComplianceStatus,
    pub issues: Vec<String>,
}
