// ==========================================
// 施工进度数据导入系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 产出: SheetData（表头行 → RawRow 列名 + 绝对坐标单元格网格）
// ==========================================

use crate::config::sheet_layout::{DATA_ENTRY_TAB, HEADER_ROW};
use crate::domain::sheet::{CellGrid, CellValue, RawRow, SheetData};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::task_importer_trait::FileParser;
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::debug;

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_sheet(&self, file_path: &Path) -> ImportResult<SheetData> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        // 表头也进入网格，故不让 csv crate 消费表头
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let mut grid_rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            grid_rows.push(record.iter().map(CellValue::from).collect::<Vec<_>>());
        }

        Ok(build_sheet_data(grid_rows))
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser {
    preferred_sheet: String,
}

impl Default for ExcelParser {
    fn default() -> Self {
        Self::new(DATA_ENTRY_TAB)
    }
}

impl ExcelParser {
    /// # 参数
    /// - preferred_sheet: 优先读取的工作表名；不存在时读取第一个工作表
    pub fn new(preferred_sheet: &str) -> Self {
        Self {
            preferred_sheet: preferred_sheet.to_string(),
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_sheet(&self, file_path: &Path) -> ImportResult<SheetData> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开 Excel 文件（xlsx / xls 由 calamine 按扩展名选择读取器）
        let mut workbook = open_workbook_auto(path)?;

        // 选择工作表
        let sheet_names = workbook.sheet_names();
        let sheet_name = if sheet_names.iter().any(|n| n == &self.preferred_sheet) {
            self.preferred_sheet.clone()
        } else {
            sheet_names
                .first()
                .cloned()
                .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?
        };
        debug!(sheet = %sheet_name, "读取工作表");

        let range = workbook.worksheet_range(&sheet_name)?;

        // calamine 的 range 从首个非空单元格开始，补齐为 A1 起的绝对坐标
        let (row_offset, col_offset) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        let mut grid_rows: Vec<Vec<CellValue>> = vec![Vec::new(); row_offset];
        for data_row in range.rows() {
            let mut cells = vec![CellValue::Empty; col_offset];
            cells.extend(data_row.iter().map(convert_cell));
            grid_rows.push(cells);
        }

        Ok(build_sheet_data(grid_rows))
    }
}

/// calamine 单元格 → CellValue
///
/// 日期单元格保留为 Excel 序列号，由日期规整器统一处理
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::from(s.as_str()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::from(s.as_str()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}

/// 网格 → SheetData
///
/// - HEADER_ROW 行为列名（TRIM，空列名的列不进入 RawRow）
/// - 完全空白的数据行跳过
fn build_sheet_data(grid_rows: Vec<Vec<CellValue>>) -> SheetData {
    let headers: Vec<String> = grid_rows
        .get(HEADER_ROW)
        .map(|row| {
            row.iter()
                .map(|cell| cell.as_text().unwrap_or_default())
                .collect()
        })
        .unwrap_or_default();

    let mut rows = Vec::new();
    for (idx, cells) in grid_rows.iter().enumerate().skip(HEADER_ROW + 1) {
        let mut raw = RawRow::new(idx + 1);
        for (col_idx, value) in cells.iter().enumerate() {
            if let Some(header) = headers.get(col_idx).filter(|h| !h.is_empty()) {
                raw.insert(header.clone(), value.clone());
            }
        }

        // 跳过完全空白的行
        if raw.is_blank() {
            continue;
        }

        rows.push(raw);
    }

    SheetData {
        rows,
        grid: CellGrid::new(grid_rows),
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser {
    excel: ExcelParser,
}

impl Default for UniversalFileParser {
    fn default() -> Self {
        Self::new(DATA_ENTRY_TAB)
    }
}

impl UniversalFileParser {
    pub fn new(preferred_sheet: &str) -> Self {
        Self {
            excel: ExcelParser::new(preferred_sheet),
        }
    }

    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<SheetData> {
        self.parse_sheet(file_path.as_ref())
    }
}

impl FileParser for UniversalFileParser {
    fn parse_sheet(&self, file_path: &Path) -> ImportResult<SheetData> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_sheet(file_path),
            "xlsx" | "xls" => self.excel.parse_sheet(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
