// ==========================================
// 施工进度数据导入系统 - 配置层
// ==========================================
// 职责: 管道配置加载与校验；工作表固定布局约定
// 存储: JSON 文件（可选）+ 内置默认值
// ==========================================

pub mod config_manager;
pub mod pipeline_config;
pub mod pipeline_config_trait;
pub mod sheet_layout;

// 重导出核心配置管理器
pub use config_manager::{default_config_path, ConfigManager, ConfigSource, CONFIG_ENV_VAR};
pub use pipeline_config::PipelineConfig;
pub use pipeline_config_trait::PipelineConfigReader;
