// ==========================================
// 施工进度数据导入系统 - 标段数据源与导入结果
// ==========================================
// 职责: 数据源描述 / 单标段导入结果 / 运行汇总
// ==========================================

use crate::domain::sheet::{CellGrid, RawRow};
use crate::domain::task::Task;
use serde::{Deserialize, Serialize};

// ==========================================
// PackageSource - 标段数据源
// ==========================================
// locator 对核心管道不透明；FileSheetFetcher 将其视为文件路径
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSource {
    pub package_id: String,
    pub package_name: String,
    pub locator: String,
}

impl PackageSource {
    pub fn new(package_id: &str, package_name: &str, locator: &str) -> Self {
        Self {
            package_id: package_id.to_string(),
            package_name: package_name.to_string(),
            locator: locator.to_string(),
        }
    }
}

// ==========================================
// PackageIngestSummary - 单标段汇总统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageIngestSummary {
    pub package_id: String,
    pub rows_read: usize,    // 解析出的非空行
    pub tasks_mapped: usize, // 成功映射为任务
    pub rows_skipped: usize, // 无站点编号（空尾行等）
    pub rows_failed: usize,  // 映射异常
    pub fetch_failed: bool,  // 拉取/解析失败，已降级为空结果
}

// ==========================================
// PackageImportResult - 单标段导入结果
// ==========================================
// 用途: TaskImporter 返回值,供编排器合并
#[derive(Debug, Clone)]
pub struct PackageImportResult {
    pub source: PackageSource,
    pub tasks: Vec<Task>,
    pub rows: Vec<RawRow>, // 原始行（行式数据源的合规字段从这里读取）
    pub grid: CellGrid,    // 固定位置提取（合规/付款证书）使用
    pub summary: PackageIngestSummary,
}

// ==========================================
// IngestReport - 整次运行汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    pub packages: Vec<PackageIngestSummary>,
    pub raw_tasks: usize,
    pub unique_tasks: usize,
    pub duplicates_dropped: usize,
    pub elapsed_ms: u128,
}

impl IngestReport {
    pub fn failed_packages(&self) -> Vec<&str> {
        self.packages
            .iter()
            .filter(|p| p.fetch_failed)
            .map(|p| p.package_id.as_str())
            .collect()
    }
}
