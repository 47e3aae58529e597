// ==========================================
// 施工进度数据导入系统 - 领域类型定义
// ==========================================
// 职责: 进度状态 / 合规状态 / 付款证书状态枚举
// 序列化格式与下游展示层约定保持一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 进度状态 (Schedule Status)
// ==========================================
// 由 StatusDeriver 派生,不从表格直接读取
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleStatus {
    #[serde(rename = "not started")]
    NotStarted, // 未开工
    #[serde(rename = "in progress")]
    InProgress, // 进行中
    #[serde(rename = "completed")]
    Completed, // 已完工
    #[serde(rename = "delayed")]
    Delayed, // 已延误
}

impl ScheduleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::NotStarted => "not started",
            ScheduleStatus::InProgress => "in progress",
            ScheduleStatus::Completed => "completed",
            ScheduleStatus::Delayed => "delayed",
        }
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 合规字段取值 (Compliance Answer)
// ==========================================
// 三态: Yes / No / 未知（空白或无法识别）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceAnswer {
    Yes,
    No,
    Unknown,
}

impl fmt::Display for ComplianceAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceAnswer::Yes => write!(f, "Yes"),
            ComplianceAnswer::No => write!(f, "No"),
            ComplianceAnswer::Unknown => write!(f, "Unknown"),
        }
    }
}

// ==========================================
// 合规汇总状态 (Compliance Status)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    Compliant,    // 三项均为 Yes
    NonCompliant, // 至少一项非 Yes
    Unknown,      // 三项均未知
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceStatus::Compliant => write!(f, "COMPLIANT"),
            ComplianceStatus::NonCompliant => write!(f, "NON_COMPLIANT"),
            ComplianceStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ==========================================
// 期中付款证书状态 (IPC Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IpcStatus {
    #[serde(rename = "released")]
    Released, // 已拨付
    #[serde(rename = "in process")]
    InProcess, // 审批中
    #[serde(rename = "submitted")]
    Submitted, // 已提交
    #[serde(rename = "not submitted")]
    NotSubmitted, // 未提交
}

impl IpcStatus {
    /// 全部已知状态（匹配顺序）
    pub const ALL: [IpcStatus; 4] = [
        IpcStatus::Released,
        IpcStatus::InProcess,
        IpcStatus::Submitted,
        IpcStatus::NotSubmitted,
    ];

    /// 表格中使用的小写标签
    pub fn label(&self) -> &'static str {
        match self {
            IpcStatus::Released => "released",
            IpcStatus::InProcess => "in process",
            IpcStatus::Submitted => "submitted",
            IpcStatus::NotSubmitted => "not submitted",
        }
    }

    /// 按标签匹配（调用方负责大小写与空白规整）
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl fmt::Display for IpcStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_status_serde_labels() {
        let json = serde_json::to_string(&ScheduleStatus::NotStarted).unwrap();
        assert_eq!(json, "\"not started\"");
        let status: ScheduleStatus = serde_json::from_str("\"delayed\"").unwrap();
        assert_eq!(status, ScheduleStatus::Delayed);
    }

    #[test]
    fn test_compliance_status_serde() {
        let json = serde_json::to_string(&ComplianceStatus::NonCompliant).unwrap();
        assert_eq!(json, "\"NON_COMPLIANT\"");
        assert_eq!(ComplianceStatus::Unknown.to_string(), "UNKNOWN");
    }

    #[test]
    fn test_ipc_status_from_label() {
        assert_eq!(IpcStatus::from_label("in process"), Some(IpcStatus::InProcess));
        assert_eq!(IpcStatus::from_label("not submitted"), Some(IpcStatus::NotSubmitted));
        assert_eq!(IpcStatus::from_label("Released"), None);
        assert_eq!(IpcStatus::from_label(""), None);
    }
}
