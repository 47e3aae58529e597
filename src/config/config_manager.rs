// ==========================================
// 施工进度数据导入系统 - 配置管理器
// ==========================================
// 职责: 配置加载、校验、查询
// 加载顺序:
//   1. 显式路径（--config）
//   2. 环境变量 PROGRESS_INGEST_CONFIG
//   3. 用户配置目录 <config_dir>/progress-ingest/config.json（存在时）
//   4. 内置默认值
// ==========================================

use crate::config::pipeline_config::PipelineConfig;
use crate::config::pipeline_config_trait::PipelineConfigReader;
use crate::domain::package::PackageSource;
use crate::importer::error::{ImportError, ImportResult};
use async_trait::async_trait;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// 配置文件路径环境变量
pub const CONFIG_ENV_VAR: &str = "PROGRESS_INGEST_CONFIG";

/// 用户配置目录下的应用子目录
const APP_DIR_NAME: &str = "progress-ingest";
const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// ConfigSource - 配置来源（日志与诊断用）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    ExplicitPath(PathBuf),
    EnvVar(PathBuf),
    UserConfigDir(PathBuf),
    BuiltIn,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::ExplicitPath(p)
            | ConfigSource::EnvVar(p)
            | ConfigSource::UserConfigDir(p) => Some(p.as_path()),
            ConfigSource::BuiltIn => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::ExplicitPath(p) => write!(f, "explicit:{}", p.display()),
            ConfigSource::EnvVar(p) => write!(f, "env:{}", p.display()),
            ConfigSource::UserConfigDir(p) => write!(f, "user:{}", p.display()),
            ConfigSource::BuiltIn => write!(f, "built-in"),
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: PipelineConfig,
    source: ConfigSource,
}

impl ConfigManager {
    /// 按加载顺序解析并加载配置
    ///
    /// # 参数
    /// - explicit_path: 命令行显式指定的路径
    ///
    /// # 返回
    /// - Err: 指定的文件不存在/无法解析/校验失败
    pub fn load(explicit_path: Option<&Path>) -> ImportResult<Self> {
        let env_value = std::env::var(CONFIG_ENV_VAR).ok();
        let source = resolve_source(explicit_path, env_value.as_deref(), default_config_path());
        Self::load_from(source)
    }

    /// 从指定来源加载
    pub fn load_from(source: ConfigSource) -> ImportResult<Self> {
        let config = match source.path() {
            Some(path) => read_config_file(path)?,
            None => PipelineConfig::default(),
        };
        config.validate()?;

        info!(
            source = %source,
            packages = config.packages.len(),
            "配置加载完成"
        );

        Ok(Self { config, source })
    }

    /// 从已有配置创建（校验后）
    pub fn from_config(config: PipelineConfig) -> ImportResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            source: ConfigSource::BuiltIn,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }
}

/// 用户配置目录下的默认配置路径
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// 决定配置来源
///
/// 显式路径与环境变量即使指向不存在的文件也会被选中（随后报错）；
/// 用户目录下的文件只在存在时生效
fn resolve_source(
    explicit_path: Option<&Path>,
    env_value: Option<&str>,
    user_path: Option<PathBuf>,
) -> ConfigSource {
    if let Some(path) = explicit_path {
        return ConfigSource::ExplicitPath(path.to_path_buf());
    }
    if let Some(value) = env_value.map(str::trim).filter(|v| !v.is_empty()) {
        return ConfigSource::EnvVar(PathBuf::from(value));
    }
    match user_path {
        Some(path) if path.is_file() => ConfigSource::UserConfigDir(path),
        _ => ConfigSource::BuiltIn,
    }
}

fn read_config_file(path: &Path) -> ImportResult<PipelineConfig> {
    let text = fs::read_to_string(path).map_err(|e| ImportError::ConfigReadError {
        key: path.display().to_string(),
        message: e.to_string(),
    })?;

    PipelineConfig::from_json(&text).map_err(|e| ImportError::ConfigReadError {
        key: path.display().to_string(),
        message: e.to_string(),
    })
}

#[async_trait]
impl PipelineConfigReader for ConfigManager {
    async fn get_package_sources(&self) -> ImportResult<Vec<PackageSource>> {
        Ok(self.config.packages.clone())
    }

    async fn get_tab_name(&self) -> ImportResult<String> {
        Ok(self.config.tab_name.clone())
    }

    async fn get_delay_tolerance(&self) -> ImportResult<f64> {
        Ok(self.config.delay_tolerance_pct)
    }

    async fn get_refresh_interval_minutes(&self) -> ImportResult<u64> {
        Ok(self.config.refresh_interval_minutes)
    }
}
