// ==========================================
// 施工进度数据导入系统 - 任务导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 流程: 拉取 → 解析 → 映射 → 派生标识 → 去重
// ==========================================

use crate::domain::package::{PackageImportResult, PackageSource};
use crate::domain::sheet::{CellValue, RawRow, SheetData};
use crate::domain::task::Task;
use crate::domain::types::ComplianceAnswer;
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// TaskImporter Trait
// ==========================================
// 用途: 任务导入主接口
// 实现者: TaskImporterImpl
#[async_trait]
pub trait TaskImporter: Send + Sync {
    /// 导入单个标段
    ///
    /// # 说明
    /// - 拉取/解析失败不返回错误: 降级为空结果并标记 fetch_failed
    /// - 单行映射异常只跳过该行
    async fn import_package(&self, source: &PackageSource) -> PackageImportResult;

    /// 批量导入多个标段（并发执行）
    ///
    /// # 说明
    /// - 每个标段独立执行，一个失败不影响其他标段
    /// - 返回顺序与 sources 顺序一致（去重"先到先得"依赖此顺序）
    async fn batch_import(&self, sources: &[PackageSource]) -> Vec<PackageImportResult>;
}

// ==========================================
// SheetFetcher Trait
// ==========================================
// 用途: 传输层接口（本地文件 / 其他来源）
// 实现者: FileSheetFetcher
#[async_trait]
pub trait SheetFetcher: Send + Sync {
    /// 按数据源取回已解析的工作表
    async fn fetch(&self, source: &PackageSource) -> ImportResult<SheetData>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: ExcelParser, CsvParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行 + 单元格网格
    ///
    /// # 返回
    /// - Ok(SheetData): 首行为表头，后续非空行转为 RawRow
    /// - Err: 文件读取错误、格式错误
    fn parse_sheet(&self, file_path: &Path) -> ImportResult<SheetData>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 行映射接口
// 实现者: FieldMapperImpl
pub trait FieldMapper: Send + Sync {
    /// 将原始行映射为 Task
    ///
    /// # 返回
    /// - Ok(Some(Task)): 映射成功
    /// - Ok(None): 无站点编号（空尾行），跳过
    /// - Err: 行结构异常，由调用方记录并跳过
    fn map_row(
        &self,
        row: &RawRow,
        package_id: &str,
        package_name: &str,
    ) -> ImportResult<Option<Task>>;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 单元格清洗接口
// 实现者: DataCleanerImpl
pub trait DataCleaner: Send + Sync {
    /// 清洗文本字段（TRIM）
    fn clean_text(&self, value: &str) -> String;

    /// 标准化 NULL 值（空字符串/空白 → None）
    fn normalize_null(&self, value: Option<String>) -> Option<String>;

    /// 宽松数值解析，失败返回 None
    fn parse_number(&self, cell: &CellValue) -> Option<f64>;

    /// Yes/No 规整（大小写与空白不敏感），其他一律 Unknown
    fn parse_yes_no(&self, value: Option<&str>) -> ComplianceAnswer;

    /// 标签规整: TRIM + 小写 + 折叠内部空白
    fn normalize_label(&self, value: &str) -> String;
}

// ==========================================
// DerivationService Trait
// ==========================================
// 用途: 任务标识派生接口
// 实现者: DerivationServiceImpl
pub trait DerivationService: Send + Sync {
    /// 派生 task_uid
    ///
    /// # 规则
    /// - UUIDv5(URL 命名空间, "package|site|discipline|task")
    /// - 各分量 TRIM + 小写，保证跨拉取稳定
    fn derive_task_uid(
        &self,
        package_id: &str,
        site_id: &str,
        discipline: &str,
        task_name: &str,
    ) -> String;
}

// ==========================================
// ConflictHandler Trait
// ==========================================
// 用途: 重复任务处理接口
// 实现者: ConflictHandlerImpl
pub trait ConflictHandler: Send + Sync {
    /// 去重（先到先得，保持首次出现顺序）
    ///
    /// # 返回
    /// - (唯一任务, 被丢弃的重复任务)
    fn deduplicate(&self, tasks: Vec<Task>) -> (Vec<Task>, Vec<Task>);
}
