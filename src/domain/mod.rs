// ==========================================
// 施工进度数据导入系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含解析逻辑,不含派生规则
// ==========================================

pub mod compliance;
pub mod ipc;
pub mod package;
pub mod sheet;
pub mod task;
pub mod types;

// 重导出核心类型
pub use compliance::{ComplianceInput, PackageCompliance};
pub use ipc::{IpcData, IpcRecord, IpcStatusCounts};
pub use package::{IngestReport, PackageImportResult, PackageIngestSummary, PackageSource};
pub use sheet::{CellGrid, CellValue, RawRow, SheetData};
pub use task::{SiteProgress, Task, TaskWithStatus};
pub use types::{ComplianceAnswer, ComplianceStatus, IpcStatus, ScheduleStatus};
