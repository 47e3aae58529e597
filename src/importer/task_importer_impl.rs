// ==========================================
// 施工进度数据导入系统 - 任务导入器实现
// ==========================================
// 职责: 单标段 拉取 → 解析 → 映射（含标识派生）；多标段并发
// 红线: 单标段失败只影响该标段；单行失败只影响该行
// ==========================================

use crate::domain::package::{PackageImportResult, PackageIngestSummary, PackageSource};
use crate::domain::sheet::{CellGrid, SheetData};
use crate::importer::field_mapper::FieldMapper as FieldMapperImpl;
use crate::importer::file_fetcher::FileSheetFetcher;
use crate::importer::task_importer_trait::{FieldMapper, SheetFetcher, TaskImporter};
use async_trait::async_trait;
use futures::future::join_all;
use tracing::{debug, error, info, instrument, warn};

// ==========================================
// TaskImporterImpl - 任务导入器实现
// ==========================================
pub struct TaskImporterImpl {
    // 传输层
    fetcher: Box<dyn SheetFetcher>,

    // 导入组件
    field_mapper: Box<dyn FieldMapper>,
}

impl TaskImporterImpl {
    /// 创建新的 TaskImporter 实例
    ///
    /// # 参数
    /// - fetcher: 工作表拉取器
    /// - field_mapper: 行映射器
    pub fn new(fetcher: Box<dyn SheetFetcher>, field_mapper: Box<dyn FieldMapper>) -> Self {
        Self {
            fetcher,
            field_mapper,
        }
    }

    /// 本地文件数据源 + 标准行映射器
    pub fn with_file_fetcher(fetcher: FileSheetFetcher) -> Self {
        Self::new(Box::new(fetcher), Box::new(FieldMapperImpl::new()))
    }

    /// 将已解析的工作表映射为任务（同步，纯计算）
    pub fn map_sheet(&self, source: &PackageSource, sheet: SheetData) -> PackageImportResult {
        let mut summary = PackageIngestSummary {
            package_id: source.package_id.clone(),
            rows_read: sheet.rows.len(),
            ..PackageIngestSummary::default()
        };

        let mut tasks = Vec::with_capacity(sheet.rows.len());
        for row in &sheet.rows {
            match self
                .field_mapper
                .map_row(row, &source.package_id, &source.package_name)
            {
                Ok(Some(task)) => tasks.push(task),
                Ok(None) => {
                    summary.rows_skipped += 1;
                    debug!(row_number = row.row_number, "无站点编号，跳过");
                }
                Err(e) => {
                    summary.rows_failed += 1;
                    warn!(row_number = row.row_number, error = %e, "字段映射失败");
                }
            }
        }
        summary.tasks_mapped = tasks.len();

        PackageImportResult {
            source: source.clone(),
            tasks,
            rows: sheet.rows,
            grid: sheet.grid,
            summary,
        }
    }

    /// 拉取失败时的降级结果
    fn failed_result(source: &PackageSource) -> PackageImportResult {
        PackageImportResult {
            source: source.clone(),
            tasks: Vec::new(),
            rows: Vec::new(),
            grid: CellGrid::default(),
            summary: PackageIngestSummary {
                package_id: source.package_id.clone(),
                fetch_failed: true,
                ..PackageIngestSummary::default()
            },
        }
    }
}

#[async_trait]
impl TaskImporter for TaskImporterImpl {
    #[instrument(skip(self, source), fields(package_id = %source.package_id))]
    async fn import_package(&self, source: &PackageSource) -> PackageImportResult {
        debug!("步骤 1: 拉取工作表");
        let sheet = match self.fetcher.fetch(source).await {
            Ok(sheet) => sheet,
            Err(e) => {
                error!(error = %e, "标段数据拉取失败，降级为空结果");
                return Self::failed_result(source);
            }
        };

        debug!(rows = sheet.rows.len(), "步骤 2: 行映射");
        let result = self.map_sheet(source, sheet);

        info!(
            rows_read = result.summary.rows_read,
            tasks_mapped = result.summary.tasks_mapped,
            rows_skipped = result.summary.rows_skipped,
            rows_failed = result.summary.rows_failed,
            "标段导入完成"
        );

        result
    }

    async fn batch_import(&self, sources: &[PackageSource]) -> Vec<PackageImportResult> {
        info!(packages = sources.len(), "开始批量导入");

        // join_all 按输入顺序返回结果
        join_all(sources.iter().map(|source| self.import_package(source))).await
    }
}
