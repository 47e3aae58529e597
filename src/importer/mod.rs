// ==========================================
// 施工进度数据导入系统 - 导入层
// ==========================================
// 职责: 外部工作表导入,生成标准 Task
// 支持: Excel, CSV（其他来源实现 SheetFetcher 即可接入）
// ==========================================

// 模块声明
pub mod conflict_handler;
pub mod data_cleaner;
pub mod date_normalizer;
pub mod derivation;
pub mod error;
pub mod field_mapper;
pub mod file_fetcher;
pub mod file_parser;
pub mod task_importer_impl;
pub mod task_importer_trait;

// 重导出核心类型
pub use conflict_handler::ConflictHandler as ConflictHandlerImpl;
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use date_normalizer::{from_excel_serial, normalize_date, normalize_date_cell};
pub use derivation::DerivationService as DerivationServiceImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{FieldMapper as FieldMapperImpl, HeaderSchema, TaskField};
pub use file_fetcher::FileSheetFetcher;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use task_importer_impl::TaskImporterImpl;

// 重导出 Trait 接口
pub use task_importer_trait::{
    ConflictHandler, DataCleaner, DerivationService, FieldMapper, FileParser, SheetFetcher,
    TaskImporter,
};
