// ==========================================
// 施工进度数据导入系统 - 进度状态派生引擎
// ==========================================
// 红线: today 由调用方注入,引擎内不读时钟
// ==========================================
// 职责: Task → ScheduleStatus + delay_flag + 计划应完成进度
// 判定顺序（先命中先返回）:
//   1. Completed  有实际完成日期,或进度 ≥ 100
//   2. Delayed    计划完成日期早于 today,或计划进度领先实际进度超过容差
//   3. InProgress 有实际开始日期,或进度 > 0
//   4. NotStarted 其余
// ==========================================

use crate::config::pipeline_config::DEFAULT_DELAY_TOLERANCE_PCT;
use crate::domain::task::{Task, TaskWithStatus};
use crate::domain::types::ScheduleStatus;
use chrono::NaiveDate;
use tracing::instrument;

// ==========================================
// StatusAssessment - 单任务判定结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusAssessment {
    pub status: ScheduleStatus,
    pub delay_flag: bool,
    pub planned_progress_pct: Option<f64>,
}

// ==========================================
// StatusDeriver - 进度状态派生引擎
// ==========================================
pub struct StatusDeriver {
    delay_tolerance_pct: f64, // 计划进度领先实际进度的容差（百分点）
}

impl Default for StatusDeriver {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY_TOLERANCE_PCT)
    }
}

impl StatusDeriver {
    pub fn new(delay_tolerance_pct: f64) -> Self {
        Self {
            delay_tolerance_pct,
        }
    }

    /// 批量派生（normalized_weight 由 WeightNormalizer 后续写入）
    #[instrument(skip(self, tasks), fields(count = tasks.len()))]
    pub fn derive_batch(&self, tasks: Vec<Task>, today: NaiveDate) -> Vec<TaskWithStatus> {
        tasks
            .into_iter()
            .map(|task| {
                let assessment = self.assess(&task, today);
                TaskWithStatus {
                    task,
                    status: assessment.status,
                    delay_flag: assessment.delay_flag,
                    planned_progress_pct: assessment.planned_progress_pct,
                    normalized_weight: 0.0,
                }
            })
            .collect()
    }

    /// 单任务判定
    pub fn assess(&self, task: &Task, today: NaiveDate) -> StatusAssessment {
        let planned_progress_pct = planned_progress(task, today);
        let status = self.classify(task, today, planned_progress_pct);

        StatusAssessment {
            status,
            delay_flag: status == ScheduleStatus::Delayed,
            planned_progress_pct,
        }
    }

    fn classify(
        &self,
        task: &Task,
        today: NaiveDate,
        planned_progress_pct: Option<f64>,
    ) -> ScheduleStatus {
        let progress = task.progress_pct;

        // 1. 已完成
        if task.actual_finish.is_some() || progress.is_some_and(|p| p >= 100.0) {
            return ScheduleStatus::Completed;
        }

        // 2. 延误
        let past_finish = task.planned_finish.is_some_and(|finish| finish < today);
        let behind_plan = match (planned_progress_pct, progress) {
            (Some(planned), Some(actual)) => planned - actual > self.delay_tolerance_pct,
            _ => false,
        };
        if past_finish || behind_plan {
            return ScheduleStatus::Delayed;
        }

        // 3. 进行中
        if task.actual_start.is_some() || progress.is_some_and(|p| p > 0.0) {
            return ScheduleStatus::InProgress;
        }

        ScheduleStatus::NotStarted
    }
}

/// 计划应完成进度（按计划起止日期线性插值，0-100）
///
/// 计划起止日期任一缺失时为 None；完成日期不晚于开始日期时按阶跃处理
pub fn planned_progress(task: &Task, today: NaiveDate) -> Option<f64> {
    let start = task.planned_start?;
    let finish = task.planned_finish?;

    let total_days = (finish - start).num_days();
    if total_days <= 0 {
        return Some(if today >= finish { 100.0 } else { 0.0 });
    }

    let elapsed_days = (today - start).num_days();
    let pct = elapsed_days as f64 / total_days as f64 * 100.0;
    Some(pct.clamp(0.0, 100.0))
}
