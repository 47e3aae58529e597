// ==========================================
// 施工进度数据导入系统 - 引擎编排器
// ==========================================
// 用途: 协调导入层与各引擎的执行顺序
// 流程:
//   1. 并发导入全部标段（失败标段降级为空）
//   2. 按数据源列表顺序合并 → 去重（先到先得）
//   3. 状态派生 → 权重归一化 → 站点进度
//   4. 按标段提取合规状态与付款证书状态
// ==========================================

use crate::config::pipeline_config::DEFAULT_REFRESH_INTERVAL_MINUTES;
use crate::config::PipelineConfigReader;
use crate::domain::compliance::PackageCompliance;
use crate::domain::ipc::IpcData;
use crate::domain::package::{IngestReport, PackageImportResult};
use crate::domain::task::{SiteProgress, TaskWithStatus};
use crate::engine::{CertificateStatusExtractor, ComplianceClassifier, StatusDeriver, WeightNormalizer};
use crate::importer::error::ImportResult;
use crate::importer::task_importer_trait::{ConflictHandler, TaskImporter};
use crate::importer::ConflictHandlerImpl;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// PipelineOptions - 单次运行参数
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub today: NaiveDate, // 状态判定基准日（由调用方读取时钟）
}

// ==========================================
// PipelineOutput - 管道输出
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub run_id: String,
    pub refresh_interval_minutes: u64, // 调用方下次拉取的建议间隔

    // 任务输出（去重、带状态、带归一化权重）
    pub tasks: Vec<TaskWithStatus>,
    pub site_progress: Vec<SiteProgress>,

    // 标段级输出
    pub compliance: BTreeMap<String, PackageCompliance>,
    pub ipc: BTreeMap<String, IpcData>,

    // 运行汇总
    pub report: IngestReport,
}

// ==========================================
// IngestOrchestrator - 引擎编排器
// ==========================================
pub struct IngestOrchestrator<C>
where
    C: PipelineConfigReader,
{
    config: Arc<C>,
    importer: Box<dyn TaskImporter>,
    conflict_handler: Box<dyn ConflictHandler>,
    weight: WeightNormalizer,
    compliance: ComplianceClassifier,
    certificate: CertificateStatusExtractor,
}

impl<C> IngestOrchestrator<C>
where
    C: PipelineConfigReader,
{
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - config: 配置读取器
    /// - importer: 任务导入器
    pub fn new(config: Arc<C>, importer: Box<dyn TaskImporter>) -> Self {
        Self {
            config,
            importer,
            conflict_handler: Box::new(ConflictHandlerImpl),
            weight: WeightNormalizer,
            compliance: ComplianceClassifier::new(),
            certificate: CertificateStatusExtractor::new(),
        }
    }

    /// 执行完整流程
    ///
    /// # 返回
    /// - Err: 仅配置读取失败；标段级失败已降级并记录在 report 中
    #[instrument(skip(self, options), fields(today = %options.today))]
    pub async fn run(&self, options: PipelineOptions) -> ImportResult<PipelineOutput> {
        let started = Instant::now();

        let sources = self.config.get_package_sources().await?;
        let tolerance = self.config.get_delay_tolerance().await?;
        let refresh_interval_minutes = self.config.get_refresh_interval_minutes().await?;
        info!(packages = sources.len(), tolerance = tolerance, "开始执行导入流程");

        // ==========================================
        // 步骤1: 并发导入
        // ==========================================
        debug!("步骤1: 并发导入全部标段");
        let results = self.importer.batch_import(&sources).await;

        // ==========================================
        // 步骤2-4: 合并与派生
        // ==========================================
        let mut output = self.assemble(results, options.today, tolerance);
        output.refresh_interval_minutes = refresh_interval_minutes;
        output.report.elapsed_ms = started.elapsed().as_millis();

        let failed = output.report.failed_packages();
        if !failed.is_empty() {
            warn!(failed_packages = ?failed, "部分标段拉取失败，已按空数据处理");
        }
        info!(
            run_id = %output.run_id,
            raw_tasks = output.report.raw_tasks,
            unique_tasks = output.report.unique_tasks,
            duplicates_dropped = output.report.duplicates_dropped,
            elapsed_ms = output.report.elapsed_ms as u64,
            "导入流程完成"
        );

        Ok(output)
    }

    /// 合并各标段导入结果并派生输出（同步，纯计算）
    ///
    /// results 的顺序决定去重时保留哪一条
    pub fn assemble(
        &self,
        results: Vec<PackageImportResult>,
        today: NaiveDate,
        delay_tolerance_pct: f64,
    ) -> PipelineOutput {
        let mut compliance = BTreeMap::new();
        let mut ipc = BTreeMap::new();
        let mut packages = Vec::with_capacity(results.len());
        let mut all_tasks = Vec::new();

        for result in results {
            let package_id = result.source.package_id.clone();

            compliance.insert(
                package_id.clone(),
                self.compliance
                    .classify_sheet(&package_id, &result.grid, &result.rows),
            );

            let ipc_data = self.certificate.extract(&result.source, &result.grid);
            debug!(package_id = %package_id, counts = ?ipc_data.status_counts(), "付款证书状态");
            ipc.insert(package_id, ipc_data);

            packages.push(result.summary);
            all_tasks.extend(result.tasks);
        }

        // ==========================================
        // 步骤2: 去重
        // ==========================================
        let raw_tasks = all_tasks.len();
        let (unique, dropped) = self.conflict_handler.deduplicate(all_tasks);
        if !dropped.is_empty() {
            let uids: Vec<&str> = dropped.iter().map(|t| t.task_uid.as_str()).collect();
            debug!(duplicates = dropped.len(), task_uids = ?uids, "丢弃重复任务");
        }

        // ==========================================
        // 步骤3: 状态派生 + 权重归一化
        // ==========================================
        let deriver = StatusDeriver::new(delay_tolerance_pct);
        let mut tasks = deriver.derive_batch(unique, today);
        self.weight.normalize(&mut tasks);
        let site_progress = self.weight.site_progress(&tasks);

        let report = IngestReport {
            packages,
            raw_tasks,
            unique_tasks: tasks.len(),
            duplicates_dropped: dropped.len(),
            elapsed_ms: 0,
        };

        PipelineOutput {
            run_id: Uuid::new_v4().to_string(),
            refresh_interval_minutes: DEFAULT_REFRESH_INTERVAL_MINUTES,
            tasks,
            site_progress,
            compliance,
            ipc,
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigManager, PipelineConfig};
    use crate::domain::package::{PackageIngestSummary, PackageSource};
    use crate::domain::sheet::{CellGrid, CellValue, RawRow};
    use crate::domain::task::Task;
    use crate::domain::types::{ComplianceStatus, IpcStatus, ScheduleStatus};
    use async_trait::async_trait;

    struct NoopImporter;

    #[async_trait]
    impl TaskImporter for NoopImporter {
        async fn import_package(&self, source: &PackageSource) -> PackageImportResult {
            package_result(source, Vec::new(), CellGrid::default())
        }

        async fn batch_import(&self, sources: &[PackageSource]) -> Vec<PackageImportResult> {
            sources
                .iter()
                .map(|s| package_result(s, Vec::new(), CellGrid::default()))
                .collect()
        }
    }

    fn package_result(source: &PackageSource, tasks: Vec<Task>, grid: CellGrid) -> PackageImportResult {
        PackageImportResult {
            source: source.clone(),
            summary: PackageIngestSummary {
                package_id: source.package_id.clone(),
                rows_read: tasks.len(),
                tasks_mapped: tasks.len(),
                ..PackageIngestSummary::default()
            },
            tasks,
            rows: Vec::new(),
            grid,
        }
    }

    fn create_test_task(uid: &str, package_id: &str, site_id: &str, remarks: &str) -> Task {
        Task {
            task_uid: uid.to_string(),
            package_id: package_id.to_string(),
            package_name: String::new(),
            district: String::new(),
            site_id: site_id.to_string(),
            site_name: String::new(),
            discipline: String::new(),
            task_name: String::new(),
            planned_start: None,
            planned_finish: NaiveDate::from_ymd_opt(2024, 1, 1),
            planned_duration_days: None,
            actual_start: None,
            actual_finish: None,
            progress_pct: Some(50.0),
            variance: None,
            delay_flag_calc: None,
            weight: None,
            last_updated: None,
            remarks: Some(remarks.to_string()),
            photo_folder_url: None,
            cover_photo_share_url: None,
            before_photo_share_url: None,
            after_photo_share_url: None,
            cover_photo_direct_url: None,
            before_photo_direct_url: None,
            after_photo_direct_url: None,
        }
    }

    fn orchestrator() -> IngestOrchestrator<ConfigManager> {
        let config = ConfigManager::from_config(PipelineConfig::default()).unwrap();
        IngestOrchestrator::new(Arc::new(config), Box::new(NoopImporter))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_assemble_dedups_in_source_order() {
        let fp1 = PackageSource::new("FP1", "P1", "a");
        let fp2 = PackageSource::new("FP2", "P2", "b");
        let results = vec![
            package_result(
                &fp1,
                vec![
                    create_test_task("T1", "FP1", "S1", "first"),
                    create_test_task("T2", "FP1", "S1", "x"),
                ],
                CellGrid::default(),
            ),
            package_result(
                &fp2,
                vec![create_test_task("T1", "FP2", "S1", "second")],
                CellGrid::default(),
            ),
        ];

        let output = orchestrator().assemble(results, today(), 10.0);

        assert_eq!(output.report.raw_tasks, 3);
        assert_eq!(output.report.unique_tasks, 2);
        assert_eq!(output.report.duplicates_dropped, 1);
        assert_eq!(output.tasks[0].task.remarks.as_deref(), Some("first"));
        assert!(output.tasks.iter().all(|t| t.status == ScheduleStatus::Delayed));
        assert_eq!(output.tasks[0].normalized_weight, 0.5);
    }

    #[test]
    fn test_assemble_per_package_maps() {
        let mut status_row = vec![CellValue::Empty; 21];
        status_row.extend(
            ["Yes", "Yes", "Yes", "Released", "submitted"]
                .iter()
                .map(|s| CellValue::from(*s)),
        );
        let grid = CellGrid::new(vec![vec![CellValue::from("Site ID")], status_row]);

        let fp1 = PackageSource::new("FP1", "P1", "a");
        let fp2 = PackageSource::new("FP2", "P2", "b");
        let results = vec![
            package_result(&fp1, Vec::new(), grid),
            package_result(&fp2, Vec::new(), CellGrid::default()),
        ];

        let output = orchestrator().assemble(results, today(), 10.0);

        assert_eq!(output.compliance["FP1"].status, ComplianceStatus::Compliant);
        assert_eq!(output.compliance["FP2"].status, ComplianceStatus::Unknown);
        assert_eq!(output.ipc["FP1"].records[0].status, Some(IpcStatus::Released));
        assert_eq!(output.ipc["FP1"].records[1].status, Some(IpcStatus::Submitted));
        assert_eq!(output.ipc["FP2"].records.len(), 6);
    }

    #[test]
    fn test_assemble_reads_compliance_from_rows_without_grid() {
        let fp1 = PackageSource::new("FP1", "P1", "a");
        let mut result = package_result(
            &fp1,
            vec![create_test_task("T1", "FP1", "S1", "x")],
            CellGrid::default(),
        );
        result.rows = vec![RawRow::new(2)
            .with("site_id", "S1")
            .with("no_of_staff_rfb", "Yes")
            .with("cesmps_submitted", "Yes")
            .with("ohs_measures", "Yes")];

        let output = orchestrator().assemble(vec![result], today(), 10.0);

        assert_eq!(output.compliance["FP1"].status, ComplianceStatus::Compliant);
        assert!(output.compliance["FP1"].issues.is_empty());
    }

    #[tokio::test]
    async fn test_run_covers_every_configured_package() {
        let output = orchestrator()
            .run(PipelineOptions { today: today() })
            .await
            .unwrap();

        assert!(output.tasks.is_empty());
        assert_eq!(output.compliance.len(), 5);
        assert_eq!(output.ipc.len(), 5);
        assert_eq!(output.report.packages.len(), 5);
        assert_eq!(output.refresh_interval_minutes, 30);
        assert!(!output.run_id.is_empty());
    }

    #[test]
    fn test_output_serializes() {
        let output = orchestrator().assemble(Vec::new(), today(), 10.0);
        let json = serde_json::to_value(&output).unwrap();
        assert!(json["tasks"].as_array().unwrap().is_empty());
        assert!(json["compliance"].as_object().unwrap().is_empty());
    }
}
