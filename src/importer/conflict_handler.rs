// ==========================================
// 施工进度数据导入系统 - 冲突处理器实现
// ==========================================
// 职责: 按 task_uid 去重
// 策略: 先到先得；保持首次出现顺序；重复项静默丢弃
// ==========================================

use crate::domain::task::Task;
use crate::importer::task_importer_trait::ConflictHandler as ConflictHandlerTrait;
use std::collections::HashSet;

pub struct ConflictHandler;

impl ConflictHandlerTrait for ConflictHandler {
    /// 去重（先到先得）
    fn deduplicate(&self, tasks: Vec<Task>) -> (Vec<Task>, Vec<Task>) {
        let mut seen: HashSet<String> = HashSet::with_capacity(tasks.len());
        let mut unique = Vec::with_capacity(tasks.len());
        let mut dropped = Vec::new();

        for task in tasks {
            if seen.insert(task.task_uid.clone()) {
                unique.push(task);
            } else {
                dropped.push(task);
            }
        }

        (unique, dropped)
    }
}
