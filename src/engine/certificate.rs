// ==========================================
// 施工进度数据导入系统 - 付款证书状态提取引擎
// ==========================================
// 红线: 无论网格大小,始终输出 IPC 1..IPC 6 共 6 条记录
// ==========================================
// 职责: 固定位置（Y2:AD2）状态标签 → IpcStatus
// 规则: 标签 TRIM + 小写 + 折叠空白后精确匹配；无法匹配为 None
// ==========================================

use crate::config::sheet_layout::{column_letter, IPC_COUNT, IPC_FIRST_COL, STATUS_ROW};
use crate::domain::ipc::{IpcData, IpcRecord};
use crate::domain::package::PackageSource;
use crate::domain::sheet::CellGrid;
use crate::domain::types::IpcStatus;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::task_importer_trait::DataCleaner as _;
use tracing::{debug, warn};

pub struct CertificateStatusExtractor {
    cleaner: DataCleaner,
}

impl Default for CertificateStatusExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CertificateStatusExtractor {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 提取单个标段的 6 条付款证书记录
    pub fn extract(&self, source: &PackageSource, grid: &CellGrid) -> IpcData {
        let width = grid.width_of(STATUS_ROW);
        let last_col = IPC_FIRST_COL + IPC_COUNT - 1;
        if grid.is_empty() {
            debug!(package_id = %source.package_id, "空网格，付款证书状态全部缺失");
        } else if width <= last_col {
            warn!(
                package_id = %source.package_id,
                width = width,
                required = last_col + 1,
                last_column = %column_letter(last_col),
                "网格列数不足，缺失的付款证书状态按未知处理"
            );
        }

        let records = (0..IPC_COUNT)
            .map(|i| IpcRecord {
                ipc_number: format!("IPC {}", i + 1),
                status: self.read_status(grid, IPC_FIRST_COL + i),
                package_id: source.package_id.clone(),
                package_name: source.package_name.clone(),
            })
            .collect();

        IpcData {
            package_id: source.package_id.clone(),
            records,
        }
    }

    fn read_status(&self, grid: &CellGrid, col: usize) -> Option<IpcStatus> {
        let label = grid.get(STATUS_ROW, col)?.as_text()?;
        IpcStatus::from_label(&self.cleaner.normalize_label(&label))
    }
}
