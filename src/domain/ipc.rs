// ==========================================
// 施工进度数据导入系统 - 期中付款证书模型
// ==========================================
// 红线: 每个标段恰好 6 条记录,按证书编号排序
// ==========================================

use crate::domain::types::IpcStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpcRecord {
    pub ipc_number: String, // "IPC 1" .. "IPC 6"
    pub status: Option<IpcStatus>,
    pub package_id: String,
    pub package_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpcData {
    pub package_id: String,
    pub records: Vec<IpcRecord>,
}

/// 各状态计数（None 计入 unknown）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpcStatusCounts {
    pub released: usize,
    pub in_process: usize,
    pub submitted: usize,
    pub not_submitted: usize,
    pub unknown: usize,
}

impl IpcData {
    pub fn status_counts(&self) -> IpcStatusCounts {
        let mut counts = IpcStatusCounts::default();
        for record in &self.records {
            match record.status {
                Some(IpcStatus::Released) => counts.released += 1,
                Some(IpcStatus::InProcess) => counts.in_process += 1,
                Some(IpcStatus::Submitted) => counts.submitted += 1,
                Some(IpcStatus::NotSubmitted) => counts.not_submitted += 1,
                None => counts.unknown += 1,
            }
        }
        counts
    }
}
