// ==========================================
// 施工进度数据导入系统 - 表格中间结构
// ==========================================
// 职责: 单元格值 / 原始行 / 单元格网格
// 用途: 传输层（CSV/XLSX/其他）统一产出,导入管道统一消费
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ==========================================
// CellValue - 单元格标量值
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Error(String), // 表格错误值，如 #REF!
}

impl CellValue {
    /// 空单元格或仅含空白的文本视为缺失
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// 文本形式（已 TRIM）；空白与错误值返回 None
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty | CellValue::Error(_) => None,
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            CellValue::Number(n) => Some(format_number(*n)),
            CellValue::Bool(b) => Some(b.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Error(e) => write!(f, "{}", e),
        }
    }
}

// 整数值不带小数点输出（表格里的 "12" 读出来是 12.0）
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

// ==========================================
// RawRow - 原始行（列名 → 值）
// ==========================================
// 生命周期: 仅在导入流程内
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    pub row_number: usize, // 表格行号（1 起，含表头）
    pub cells: HashMap<String, CellValue>,
}

impl RawRow {
    pub fn new(row_number: usize) -> Self {
        Self {
            row_number,
            cells: HashMap::new(),
        }
    }

    /// 链式构造（测试与内存数据源使用）
    pub fn with(mut self, label: &str, value: impl Into<CellValue>) -> Self {
        self.cells.insert(label.to_string(), value.into());
        self
    }

    pub fn insert(&mut self, label: impl Into<String>, value: CellValue) {
        self.cells.insert(label.into(), value);
    }

    /// 读取单元格；缺失键与空白值均返回 None
    pub fn get(&self, label: &str) -> Option<&CellValue> {
        self.cells.get(label).filter(|v| !v.is_blank())
    }

    /// 整行空白
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(CellValue::is_blank)
    }
}

// ==========================================
// CellGrid - 按行列寻址的单元格网格（0 起）
// ==========================================
// 用途: 固定位置读取（合规字段、付款证书状态）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellGrid {
    rows: Vec<Vec<CellValue>>,
}

impl CellGrid {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// 越界读取返回 None，不 panic
    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 指定行的列数（行不存在时为 0）
    pub fn width_of(&self, row: usize) -> usize {
        self.rows.get(row).map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ==========================================
// SheetData - 单个工作表解析结果
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct SheetData {
    pub rows: Vec<RawRow>,
    pub grid: CellGrid,
}

impl SheetData {
    /// 拉取失败时的降级结果
    pub fn empty() -> Self {
        Self::default()
    }
}
