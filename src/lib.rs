// ==========================================
// 施工进度数据导入系统 - 核心库
// ==========================================
// 输入: 各标段进度表（XLSX / CSV）
// 输出: 去重任务 + 进度状态 + 站点权重 + 合规状态 + 付款证书状态
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 外部数据
pub mod importer;

// 引擎层 - 派生规则
pub mod engine;

// 配置层 - 管道配置与表格布局
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ComplianceAnswer, ComplianceStatus, IpcStatus, ScheduleStatus};

// 领域实体
pub use domain::{
    CellGrid, CellValue, IngestReport, IpcData, IpcRecord, PackageCompliance, PackageSource,
    RawRow, SheetData, SiteProgress, Task, TaskWithStatus,
};

// 引擎
pub use engine::{
    CertificateStatusExtractor, ComplianceClassifier, IngestOrchestrator, PipelineOptions,
    PipelineOutput, StatusDeriver, WeightNormalizer,
};

// 导入
pub use importer::{FileSheetFetcher, ImportError, ImportResult, TaskImporterImpl};

// 配置
pub use config::{ConfigManager, PipelineConfig};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "progress-ingest";
