// ==========================================
// 施工进度数据导入系统 - 任务领域模型
// ==========================================
// 职责: 标准任务记录 + 派生状态记录 + 现场进度汇总
// 红线: 无 site_id 的任务不可构造；日期字段只能是合法日期或 None
// ==========================================

use crate::domain::types::ScheduleStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Task - 标准任务记录
// ==========================================
// 用途: 导入层写入,引擎层只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    // ===== 主键 =====
    pub task_uid: String, // 跨标段唯一、跨拉取稳定（UUIDv5）

    // ===== 描述信息 =====
    pub package_id: String,
    pub package_name: String,
    pub district: String,
    pub site_id: String,
    pub site_name: String,
    pub discipline: String,
    pub task_name: String,

    // ===== 计划与实际 =====
    pub planned_start: Option<NaiveDate>,
    pub planned_finish: Option<NaiveDate>,
    pub planned_duration_days: Option<f64>,
    pub actual_start: Option<NaiveDate>,
    pub actual_finish: Option<NaiveDate>,

    // ===== 进度 =====
    pub progress_pct: Option<f64>, // 0-100
    pub variance: Option<f64>,
    pub delay_flag_calc: Option<String>, // 表格自带的延误标记（原样保留）
    pub weight: Option<f64>,             // 表格显式权重（可选）
    pub last_updated: Option<NaiveDate>,

    // ===== 备注与照片 =====
    pub remarks: Option<String>,
    pub photo_folder_url: Option<String>,
    pub cover_photo_share_url: Option<String>,
    pub before_photo_share_url: Option<String>,
    pub after_photo_share_url: Option<String>,
    // 直链由外部协作方填充，导入时恒为 None
    pub cover_photo_direct_url: Option<String>,
    pub before_photo_direct_url: Option<String>,
    pub after_photo_direct_url: Option<String>,
}

// ==========================================
// TaskWithStatus - 带派生状态的任务
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskWithStatus {
    #[serde(flatten)]
    pub task: Task,
    pub status: ScheduleStatus,
    pub delay_flag: bool,
    pub planned_progress_pct: Option<f64>, // 按计划日期线性插值的应完成进度
    pub normalized_weight: f64,            // 站点内归一化权重（由 WeightNormalizer 写入）
}

impl TaskWithStatus {
    pub fn task_uid(&self) -> &str {
        &self.task.task_uid
    }
}

// ==========================================
// SiteProgress - 站点加权进度
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteProgress {
    pub package_id: String,
    pub site_id: String,
    pub site_name: String,
    pub task_count: usize,
    pub weighted_progress_pct: f64,
}
