// ==========================================
// 施工进度数据导入系统 - 日期规整器
// ==========================================
// 职责: 日-月-年 文本 / Excel 序列号 → NaiveDate
// 红线: 永远日在月前；任何异常输入降级为 None,不返回错误
// ==========================================

use crate::domain::sheet::CellValue;
use chrono::{Duration, NaiveDate};

// Excel 1900 日期系统的零点（含 1900-02-29 缺陷补偿）
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

// 序列号合理范围: 1950-01-01 .. 2099-12-31
const EXCEL_SERIAL_MIN: f64 = 18264.0;
const EXCEL_SERIAL_MAX: f64 = 73050.0;

/// 解析 DD-MM-YYYY / D/M/YYYY / DD.MM.YY 等日-月-年格式，以及 YYYY-MM-DD
///
/// # 规则
/// - 分隔符: `-` `/` `.`
/// - 日、月可为 1 位或 2 位
/// - 两位年份 → 2000 + YY
/// - 首段为 4 位数字时按 年-月-日 读取（xlsx 的 ISO 日期单元格）
/// - 末尾时间部分（空格或 `T` 后）忽略
/// - 日 0 或 >31、月 0 或 >12、日历上不存在的日期 → None
pub fn normalize_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    // 去掉 "01-02-2024 00:00:00" / "2024-02-01T00:00:00" 中的时间部分
    let date_part = trimmed.split_whitespace().next()?;
    let date_part = date_part.split('T').next()?;

    let parts: Vec<&str> = date_part.split(['-', '/', '.']).collect();
    if parts.len() != 3 {
        return None;
    }

    if parts[0].len() == 4 {
        let year = parse_component(parts[0], 4)? as i32;
        let month = parse_component(parts[1], 2)?;
        let day = parse_component(parts[2], 2)?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    let day = parse_component(parts[0], 2)?;
    let month = parse_component(parts[1], 2)?;
    let year_raw = parts[2];
    let year = match year_raw.len() {
        2 => 2000 + parse_component(year_raw, 2)? as i32,
        4 => parse_component(year_raw, 4)? as i32,
        _ => return None,
    };

    if day == 0 || day > 31 || month == 0 || month > 12 {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

/// 单元格日期规整：文本走 DMY 解析，数值视为 Excel 序列号
pub fn normalize_date_cell(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Text(s) => normalize_date(s),
        CellValue::Number(n) => from_excel_serial(*n),
        _ => None,
    }
}

/// Excel 序列号 → 日期（超出合理范围返回 None）
pub fn from_excel_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(EXCEL_SERIAL_MIN..=EXCEL_SERIAL_MAX).contains(&serial) {
        return None;
    }
    let (y, m, d) = EXCEL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

// 纯数字分量，长度 1..=max_len
fn parse_component(s: &str, max_len: usize) -> Option<u32> {
    if s.is_empty() || s.len() > max_len || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse::<u32>().ok()
}
