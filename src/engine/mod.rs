// ==========================================
// 施工进度数据导入系统 - 引擎层
// ==========================================
// 职责: 对标准 Task 与单元格网格执行派生规则
// 红线: 引擎不做 I/O,不读时钟
// ==========================================

pub mod certificate;
pub mod compliance;
pub mod orchestrator;
pub mod status;
pub mod weight;

// 重导出核心引擎
pub use certificate::CertificateStatusExtractor;
pub use compliance::ComplianceClassifier;
pub use orchestrator::{IngestOrchestrator, PipelineOptions, PipelineOutput};
pub use status::{planned_progress, StatusAssessment, StatusDeriver};
pub use weight::WeightNormalizer;
