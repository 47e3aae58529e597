// ==========================================
// 施工进度数据导入系统 - 工作表布局约定
// ==========================================
// 职责: 所有固定位置偏移的唯一来源（0 起下标）
// 布局:
//   第 1 行 (HEADER_ROW)  A:U 任务表头；V:X 合规字段表头；Y:AD IPC 1..6
//   第 2 行 (STATUS_ROW)  A:U 首条任务；V:X 合规答案；Y:AD 付款证书状态
// 红线: 表格模板调整时只改这里
// ==========================================

/// 优先读取的工作表名
pub const DATA_ENTRY_TAB: &str = "Data_Entry";

/// 表头所在行
pub const HEADER_ROW: usize = 0;

/// 合规答案 / 付款证书状态所在行
pub const STATUS_ROW: usize = 1;

/// 任务数据列数（A:U）
pub const DATA_COLUMN_COUNT: usize = 21;

// ===== 合规字段（V:X） =====
/// V: No. of Staff RFB
pub const STAFF_RFB_COL: usize = 21;
/// W: CESMPs Submitted
pub const CESMPS_COL: usize = 22;
/// X: OHS Measures
pub const OHS_MEASURES_COL: usize = 23;

// ===== 付款证书（Y:AD） =====
/// Y: IPC 1
pub const IPC_FIRST_COL: usize = 24;
/// IPC 1..IPC 6
pub const IPC_COUNT: usize = 6;

/// 固定位置提取要求的最小网格宽度（到 AD 列为止）
pub const REQUIRED_GRID_WIDTH: usize = IPC_FIRST_COL + IPC_COUNT;

// ===== 行式数据源的合规列名（友好标签, snake_case） =====
pub const STAFF_RFB_LABELS: [&str; 2] = ["No. of Staff RFB", "no_of_staff_rfb"];
pub const CESMPS_LABELS: [&str; 2] = ["CESMPs Submitted", "cesmps_submitted"];
pub const OHS_MEASURES_LABELS: [&str; 2] = ["OHS Measures", "ohs_measures"];

/// 0 起列下标 → 列字母（日志输出用）
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}
