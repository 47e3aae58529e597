// ==========================================
// 施工进度数据导入系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 宽松数值解析 / Yes-No 规整 / 标签规整
// 红线: 单元格级异常一律降级为缺失,不向上传播
// ==========================================

use crate::domain::sheet::CellValue;
use crate::domain::types::ComplianceAnswer;
use crate::importer::task_importer_trait::DataCleaner as DataCleanerTrait;

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    fn parse_number(&self, cell: &CellValue) -> Option<f64> {
        match cell {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => parse_number_text(s),
            _ => None,
        }
    }

    fn parse_yes_no(&self, value: Option<&str>) -> ComplianceAnswer {
        let Some(raw) = value else {
            return ComplianceAnswer::Unknown;
        };
        match raw.trim().to_lowercase().as_str() {
            "yes" | "y" | "true" | "1" => ComplianceAnswer::Yes,
            "no" | "n" | "false" | "0" => ComplianceAnswer::No,
            _ => ComplianceAnswer::Unknown,
        }
    }

    fn normalize_label(&self, value: &str) -> String {
        value
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

/// 宽松数值解析
///
/// - 去掉千分位逗号与末尾 `%`
/// - 含字母（"N/A"、"inf"、"NaN"）一律视为非法
fn parse_number_text(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    if trimmed.is_empty() || trimmed.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    trimmed
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_basic() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.clean_text("  hello  "), "hello");
    }

    #[test]
    fn test_normalize_null() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_null(Some("  ".to_string())), None);
        assert_eq!(cleaner.normalize_null(Some("".to_string())), None);
        assert_eq!(
            cleaner.normalize_null(Some("  value  ".to_string())),
            Some("value".to_string())
        );
        assert_eq!(cleaner.normalize_null(None), None);
    }

    #[test]
    fn test_parse_number_lenient() {
        let cleaner = DataCleaner;
        let text = |s: &str| CellValue::Text(s.to_string());

        assert_eq!(cleaner.parse_number(&text("50")), Some(50.0));
        assert_eq!(cleaner.parse_number(&text(" 50.5 ")), Some(50.5));
        assert_eq!(cleaner.parse_number(&text("75%")), Some(75.0));
        assert_eq!(cleaner.parse_number(&text("1,250")), Some(1250.0));
        assert_eq!(cleaner.parse_number(&text("-3")), Some(-3.0));
        assert_eq!(cleaner.parse_number(&CellValue::Number(12.0)), Some(12.0));
    }

    #[test]
    fn test_parse_number_failures_are_none() {
        let cleaner = DataCleaner;
        let text = |s: &str| CellValue::Text(s.to_string());

        assert_eq!(cleaner.parse_number(&text("")), None);
        assert_eq!(cleaner.parse_number(&text("N/A")), None);
        assert_eq!(cleaner.parse_number(&text("NaN")), None);
        assert_eq!(cleaner.parse_number(&text("inf")), None);
        assert_eq!(cleaner.parse_number(&text("12 days")), None);
        assert_eq!(cleaner.parse_number(&text("%")), None);
        assert_eq!(cleaner.parse_number(&CellValue::Number(f64::INFINITY)), None);
        assert_eq!(cleaner.parse_number(&CellValue::Bool(true)), None);
        assert_eq!(cleaner.parse_number(&CellValue::Error("#DIV/0!".to_string())), None);
        assert_eq!(cleaner.parse_number(&CellValue::Empty), None);
    }

    #[test]
    fn test_parse_yes_no() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_yes_no(Some("Yes")), ComplianceAnswer::Yes);
        assert_eq!(cleaner.parse_yes_no(Some("  YES ")), ComplianceAnswer::Yes);
        assert_eq!(cleaner.parse_yes_no(Some("y")), ComplianceAnswer::Yes);
        assert_eq!(cleaner.parse_yes_no(Some("no")), ComplianceAnswer::No);
        assert_eq!(cleaner.parse_yes_no(Some(" No")), ComplianceAnswer::No);
        assert_eq!(cleaner.parse_yes_no(Some("")), ComplianceAnswer::Unknown);
        assert_eq!(cleaner.parse_yes_no(Some("maybe")), ComplianceAnswer::Unknown);
        assert_eq!(cleaner.parse_yes_no(None), ComplianceAnswer::Unknown);
    }

    #[test]
    fn test_normalize_label() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_label("  In   Process "), "in process");
        assert_eq!(cleaner.normalize_label("NOT SUBMITTED"), "not submitted");
        assert_eq!(cleaner.normalize_label("\tReleased\n"), "released");
        assert_eq!(cleaner.normalize_label("   "), "");
    }
}
