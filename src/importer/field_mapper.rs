// ==========================================
// 施工进度数据导入系统 - 字段映射器实现
// ==========================================
// 职责: 原始行 → Task（表头双写法回退 + 类型转换）
// 红线: 无站点编号的行不产出 Task；单元格异常降级为缺失
// ==========================================

use crate::domain::sheet::{CellValue, RawRow};
use crate::domain::task::Task;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::date_normalizer::normalize_date_cell;
use crate::importer::derivation::DerivationService;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::task_importer_trait::{
    DataCleaner as _, DerivationService as _, FieldMapper as FieldMapperTrait,
};
use chrono::NaiveDate;

// ==========================================
// HeaderSchema - 已知表头写法
// ==========================================
// 早期 CSV/API 导出使用 snake_case,发布版 XLSX 使用友好标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderSchema {
    Friendly,  // "Site ID"
    SnakeCase, // "site_id"
}

impl HeaderSchema {
    /// 查找顺序: 先友好标签,后 snake_case
    pub const ALL: [HeaderSchema; 2] = [HeaderSchema::Friendly, HeaderSchema::SnakeCase];
}

// ==========================================
// TaskField - 任务字段（A:U 数据区 + 权重）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    District,
    SiteId,
    SiteName,
    Discipline,
    TaskName,
    PlannedStart,
    PlannedFinish,
    PlannedDurationDays,
    ActualStart,
    ActualFinish,
    ProgressPct,
    Variance,
    DelayFlag,
    LastUpdated,
    Remarks,
    PhotoFolder,
    CoverPhoto,
    BeforePhoto,
    AfterPhoto,
    Weight,
}

impl TaskField {
    /// 字段在指定表头写法下的列名
    pub fn label(self, schema: HeaderSchema) -> &'static str {
        use HeaderSchema::*;
        use TaskField::*;
        match (self, schema) {
            (District, Friendly) => "District",
            (District, SnakeCase) => "district",
            (SiteId, Friendly) => "Site ID",
            (SiteId, SnakeCase) => "site_id",
            (SiteName, Friendly) => "Site Name",
            (SiteName, SnakeCase) => "site_name",
            (Discipline, Friendly) => "Discipline",
            (Discipline, SnakeCase) => "discipline",
            (TaskName, Friendly) => "Task Name",
            (TaskName, SnakeCase) => "task_name",
            (PlannedStart, Friendly) => "Planned Start",
            (PlannedStart, SnakeCase) => "planned_start",
            (PlannedFinish, Friendly) => "Planned Finish",
            (PlannedFinish, SnakeCase) => "planned_finish",
            (PlannedDurationDays, Friendly) => "Planned Duration (Days)",
            (PlannedDurationDays, SnakeCase) => "planned_duration_days",
            (ActualStart, Friendly) => "Actual Start",
            (ActualStart, SnakeCase) => "actual_start",
            (ActualFinish, Friendly) => "Actual Finish",
            (ActualFinish, SnakeCase) => "actual_finish",
            (ProgressPct, Friendly) => "Progress %",
            (ProgressPct, SnakeCase) => "progress_pct",
            (Variance, Friendly) => "Variance",
            (Variance, SnakeCase) => "variance",
            (DelayFlag, Friendly) => "Delay Flag",
            (DelayFlag, SnakeCase) => "delay_flag_calc",
            (LastUpdated, Friendly) => "Last Updated",
            (LastUpdated, SnakeCase) => "last_updated",
            (Remarks, Friendly) => "Remarks",
            (Remarks, SnakeCase) => "remarks",
            (PhotoFolder, Friendly) => "Photo Folder",
            (PhotoFolder, SnakeCase) => "photo_folder_url",
            (CoverPhoto, Friendly) => "Cover Photo",
            (CoverPhoto, SnakeCase) => "cover_photo_share_url",
            (BeforePhoto, Friendly) => "Before Photo",
            (BeforePhoto, SnakeCase) => "before_photo_share_url",
            (AfterPhoto, Friendly) => "After Photo",
            (AfterPhoto, SnakeCase) => "after_photo_share_url",
            (Weight, Friendly) => "Weight",
            (Weight, SnakeCase) => "weight",
        }
    }
}

pub struct FieldMapper {
    cleaner: DataCleaner,
    derivation: DerivationService,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
            derivation: DerivationService,
        }
    }

    /// 按 HeaderSchema::ALL 顺序查找第一个非空单元格（含错误值）
    fn find_raw_cell<'a>(&self, row: &'a RawRow, field: TaskField) -> Option<&'a CellValue> {
        HeaderSchema::ALL
            .iter()
            .find_map(|schema| row.get(field.label(*schema)))
    }

    /// 按 HeaderSchema::ALL 顺序查找第一个有效单元格
    ///
    /// 表格错误值（#N/A 等）视为缺失，继续尝试下一种写法
    fn find_cell<'a>(&self, row: &'a RawRow, field: TaskField) -> Option<&'a CellValue> {
        HeaderSchema::ALL
            .iter()
            .filter_map(|schema| row.get(field.label(*schema)))
            .find(|cell| !matches!(cell, CellValue::Error(_)))
    }

    /// 提取字符串字段（缺失时为空串）
    fn get_string(&self, row: &RawRow, field: TaskField) -> String {
        self.get_optional_string(row, field).unwrap_or_default()
    }

    /// 提取字符串字段（返回 Option）
    fn get_optional_string(&self, row: &RawRow, field: TaskField) -> Option<String> {
        let text = self.find_cell(row, field).and_then(CellValue::as_text);
        self.cleaner.normalize_null(text)
    }

    /// 解析数值（失败降级为 None）
    fn parse_f64(&self, row: &RawRow, field: TaskField) -> Option<f64> {
        self.find_cell(row, field)
            .and_then(|cell| self.cleaner.parse_number(cell))
    }

    /// 解析日期（DMY 文本或 Excel 序列号，失败降级为 None）
    fn parse_date(&self, row: &RawRow, field: TaskField) -> Option<NaiveDate> {
        self.find_cell(row, field).and_then(normalize_date_cell)
    }

    /// 提取站点编号
    ///
    /// # 返回
    /// - Ok(None): 两种写法均缺失
    /// - Err: 站点编号单元格为表格错误值（行结构异常）
    fn extract_site_id(&self, row: &RawRow) -> ImportResult<Option<String>> {
        match self.find_raw_cell(row, TaskField::SiteId) {
            None => Ok(None),
            Some(CellValue::Error(code)) => Err(ImportError::FieldMappingError {
                row: row.row_number,
                message: format!("站点编号单元格为错误值: {}", code),
            }),
            Some(cell) => Ok(cell.as_text().map(|s| self.cleaner.clean_text(&s))),
        }
    }
}

impl FieldMapperTrait for FieldMapper {
    fn map_row(
        &self,
        row: &RawRow,
        package_id: &str,
        package_name: &str,
    ) -> ImportResult<Option<Task>> {
        let Some(site_id) = self.extract_site_id(row)? else {
            return Ok(None);
        };

        let discipline = self.get_string(row, TaskField::Discipline);
        let task_name = self.get_string(row, TaskField::TaskName);
        let task_uid = self
            .derivation
            .derive_task_uid(package_id, &site_id, &discipline, &task_name);

        Ok(Some(Task {
            // 主键
            task_uid,

            // 描述信息
            package_id: package_id.to_string(),
            package_name: package_name.to_string(),
            district: self.get_string(row, TaskField::District),
            site_id,
            site_name: self.get_string(row, TaskField::SiteName),
            discipline,
            task_name,

            // 计划与实际
            planned_start: self.parse_date(row, TaskField::PlannedStart),
            planned_finish: self.parse_date(row, TaskField::PlannedFinish),
            planned_duration_days: self.parse_f64(row, TaskField::PlannedDurationDays),
            actual_start: self.parse_date(row, TaskField::ActualStart),
            actual_finish: self.parse_date(row, TaskField::ActualFinish),

            // 进度
            progress_pct: self
                .parse_f64(row, TaskField::ProgressPct)
                .map(|p| p.clamp(0.0, 100.0)),
            variance: self.parse_f64(row, TaskField::Variance),
            delay_flag_calc: self.get_optional_string(row, TaskField::DelayFlag),
            weight: self.parse_f64(row, TaskField::Weight),
            last_updated: self.parse_date(row, TaskField::LastUpdated),

            // 备注与照片
            remarks: self.get_optional_string(row, TaskField::Remarks),
            photo_folder_url: self.get_optional_string(row, TaskField::PhotoFolder),
            cover_photo_share_url: self.get_optional_string(row, TaskField::CoverPhoto),
            before_photo_share_url: self.get_optional_string(row, TaskField::BeforePhoto),
            after_photo_share_url: self.get_optional_string(row, TaskField::AfterPhoto),
            cover_photo_direct_url: None,
            before_photo_direct_url: None,
            after_photo_direct_url: None,
        }))
    }
}
