// ==========================================
// 施工进度数据导入系统 - 管道配置
// ==========================================
// 职责: 配置结构 + 内置默认值 + 校验
// 格式: JSON（缺省字段取默认值）
// ==========================================

use crate::config::sheet_layout::DATA_ENTRY_TAB;
use crate::domain::package::PackageSource;
use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 默认延误容差（百分点）
pub const DEFAULT_DELAY_TOLERANCE_PCT: f64 = 10.0;

/// 默认刷新间隔（分钟，供调用方做缓存）
pub const DEFAULT_REFRESH_INTERVAL_MINUTES: u64 = 30;

// ==========================================
// PipelineConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    // ===== 数据源 =====
    pub packages: Vec<PackageSource>,
    pub tab_name: String,

    // ===== 状态派生 =====
    pub delay_tolerance_pct: f64,

    // ===== 调用方提示 =====
    pub refresh_interval_minutes: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            packages: default_packages(),
            tab_name: DATA_ENTRY_TAB.to_string(),
            delay_tolerance_pct: DEFAULT_DELAY_TOLERANCE_PCT,
            refresh_interval_minutes: DEFAULT_REFRESH_INTERVAL_MINUTES,
        }
    }
}

/// 内置数据源: Flood Package 1..5
fn default_packages() -> Vec<PackageSource> {
    (1..=5)
        .map(|n| {
            let id = format!("FP{}", n);
            PackageSource::new(
                &id,
                &format!("Flood Package-{}", n),
                &format!("data/{}.xlsx", id),
            )
        })
        .collect()
}

impl PipelineConfig {
    /// 从 JSON 文本解析（不校验）
    pub fn from_json(text: &str) -> ImportResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// 校验配置
    ///
    /// # 规则
    /// - package_id 非空且唯一
    /// - delay_tolerance_pct 在 [0, 100]
    /// - tab_name 非空
    pub fn validate(&self) -> ImportResult<()> {
        let mut seen = HashSet::new();
        for source in &self.packages {
            let id = source.package_id.trim();
            if id.is_empty() {
                return Err(ImportError::ConfigValueError {
                    key: "packages.package_id".to_string(),
                    value: source.package_id.clone(),
                    message: "标段编号不能为空".to_string(),
                });
            }
            if !seen.insert(id) {
                return Err(ImportError::ConfigValueError {
                    key: "packages.package_id".to_string(),
                    value: source.package_id.clone(),
                    message: "标段编号重复".to_string(),
                });
            }
        }

        if !(0.0..=100.0).contains(&self.delay_tolerance_pct) {
            return Err(ImportError::ConfigValueError {
                key: "delay_tolerance_pct".to_string(),
                value: self.delay_tolerance_pct.to_string(),
                message: "延误容差必须在 0-100 之间".to_string(),
            });
        }

        if self.tab_name.trim().is_empty() {
            return Err(ImportError::ConfigValueError {
                key: "tab_name".to_string(),
                value: self.tab_name.clone(),
                message: "工作表名不能为空".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.packages.len(), 5);
        assert_eq!(config.packages[0].package_id, "FP1");
        assert_eq!(config.packages[4].package_name, "Flood Package-5");
        assert_eq!(config.packages[2].locator, "data/FP3.xlsx");
        assert_eq!(config.tab_name, "Data_Entry");
        assert_eq!(config.delay_tolerance_pct, 10.0);
        assert_eq!(config.refresh_interval_minutes, 30);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = PipelineConfig::from_json(r#"{"delay_tolerance_pct": 5}"#).unwrap();
        assert_eq!(config.delay_tolerance_pct, 5.0);
        assert_eq!(config.packages.len(), 5);
        assert_eq!(config.tab_name, "Data_Entry");
    }

    #[test]
    fn test_invalid_json_is_read_error() {
        let result = PipelineConfig::from_json("{not json");
        assert!(matches!(result, Err(ImportError::ConfigReadError { .. })));
    }

    #[test]
    fn test_validate_duplicate_ids() {
        let config = PipelineConfig {
            packages: vec![
                PackageSource::new("FP1", "A", "a.csv"),
                PackageSource::new(" FP1 ", "B", "b.csv"),
            ],
            ..PipelineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ImportError::ConfigValueError { .. })
        ));
    }

    #[test]
    fn test_validate_empty_id() {
        let config = PipelineConfig {
            packages: vec![PackageSource::new("  ", "A", "a.csv")],
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_tolerance_range() {
        let mut config = PipelineConfig::default();
        config.delay_tolerance_pct = 100.5;
        assert!(config.validate().is_err());

        config.delay_tolerance_pct = -1.0;
        assert!(config.validate().is_err());

        config.delay_tolerance_pct = 0.0;
        assert!(config.validate().is_ok());
    }
}
