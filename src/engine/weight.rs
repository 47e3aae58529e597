// ==========================================
// 施工进度数据导入系统 - 站点权重归一化引擎
// ==========================================
// 红线: 每个 (package_id, site_id) 分组内权重之和 = 1
// ==========================================
// 职责: 写入 normalized_weight + 汇总站点加权进度
// 规则:
//   - 分组内每个任务都有正的显式权重 → 按显式权重比例
//   - 否则 → 均分 1/n
// ==========================================

use crate::domain::task::{SiteProgress, TaskWithStatus};
use std::collections::HashMap;
use tracing::{debug, instrument};

pub struct WeightNormalizer;

impl WeightNormalizer {
    /// 按站点分组（保持首次出现顺序），返回各组任务下标
    fn group_by_site(tasks: &[TaskWithStatus]) -> Vec<Vec<usize>> {
        let mut index: HashMap<(&str, &str), usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for (idx, item) in tasks.iter().enumerate() {
            let key = (item.task.package_id.as_str(), item.task.site_id.as_str());
            let group = *index.entry(key).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[group].push(idx);
        }

        groups
    }

    /// 写入 normalized_weight
    #[instrument(skip(self, tasks), fields(count = tasks.len()))]
    pub fn normalize(&self, tasks: &mut [TaskWithStatus]) {
        let groups = Self::group_by_site(tasks);

        for members in &groups {
            let explicit: Option<Vec<f64>> = members
                .iter()
                .map(|&i| tasks[i].task.weight.filter(|w| w.is_finite() && *w > 0.0))
                .collect();

            match explicit {
                Some(weights) => {
                    // 先按最大值缩放，极大的权重求和也不会溢出
                    let max = weights.iter().copied().fold(0.0_f64, f64::max);
                    let total: f64 = weights.iter().map(|w| w / max).sum();
                    for (&i, w) in members.iter().zip(weights) {
                        tasks[i].normalized_weight = w / max / total;
                    }
                }
                None => {
                    let share = 1.0 / members.len() as f64;
                    for &i in members {
                        tasks[i].normalized_weight = share;
                    }
                }
            }
        }

        debug!(sites = groups.len(), "权重归一化完成");
    }

    /// 站点加权进度（缺失进度按 0 计）
    ///
    /// 要求 normalize 已执行
    pub fn site_progress(&self, tasks: &[TaskWithStatus]) -> Vec<SiteProgress> {
        Self::group_by_site(tasks)
            .into_iter()
            .map(|members| {
                let first = &tasks[members[0]].task;
                let weighted: f64 = members
                    .iter()
                    .map(|&i| tasks[i].normalized_weight * tasks[i].task.progress_pct.unwrap_or(0.0))
                    .sum();

                SiteProgress {
                    package_id: first.package_id.clone(),
                    site_id: first.site_id.clone(),
                    site_name: first.site_name.clone(),
                    task_count: members.len(),
                    weighted_progress_pct: weighted,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::Task;
    use crate::domain::types::ScheduleStatus;

    fn create_test_item(
        uid: &str,
        package_id: &str,
        site_id: &str,
        progress: Option<f64>,
        weight: Option<f64>,
    ) -> TaskWithStatus {
        TaskWithStatus {
            task: Task {
                task_uid: uid.to_string(),
                package_id: package_id.to_string(),
                package_name: String::new(),
                district: String::new(),
                site_id: site_id.to_string(),
                site_name: format!("Site {}", site_id),
                discipline: String::new(),
                task_name: uid.to_string(),
                planned_start: None,
                planned_finish: None,
                planned_duration_days: None,
                actual_start: None,
                actual_finish: None,
                progress_pct: progress,
                variance: None,
                delay_flag_calc: None,
                weight,
                last_updated: None,
                remarks: None,
                photo_folder_url: None,
                cover_photo_share_url: None,
                before_photo_share_url: None,
                after_photo_share_url: None,
                cover_photo_direct_url: None,
                before_photo_direct_url: None,
                after_photo_direct_url: None,
            },
            status: ScheduleStatus::NotStarted,
            delay_flag: false,
            planned_progress_pct: None,
            normalized_weight: 0.0,
        }
    }

    fn group_sums(tasks: &[TaskWithStatus]) -> HashMap<(String, String), f64> {
        let mut sums = HashMap::new();
        for t in tasks {
            *sums
                .entry((t.task.package_id.clone(), t.task.site_id.clone()))
                .or_insert(0.0) += t.normalized_weight;
        }
        sums
    }

    #[test]
    fn test_equal_weights_per_site() {
        let mut tasks = vec![
            create_test_item("a", "FP1", "S1", None, None),
            create_test_item("b", "FP1", "S1", None, None),
            create_test_item("c", "FP1", "S1", None, None),
            create_test_item("d", "FP1", "S2", None, None),
        ];

        WeightNormalizer.normalize(&mut tasks);

        assert!((tasks[0].normalized_weight - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(tasks[3].normalized_weight, 1.0);
        for sum in group_sums(&tasks).values() {
            assert!((sum - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_same_site_id_in_different_packages_is_separate() {
        let mut tasks = vec![
            create_test_item("a", "FP1", "S1", None, None),
            create_test_item("b", "FP2", "S1", None, None),
        ];

        WeightNormalizer.normalize(&mut tasks);

        assert_eq!(tasks[0].normalized_weight, 1.0);
        assert_eq!(tasks[1].normalized_weight, 1.0);
    }

    #[test]
    fn test_explicit_weights_are_proportional() {
        let mut tasks = vec![
            create_test_item("a", "FP1", "S1", None, Some(1.0)),
            create_test_item("b", "FP1", "S1", None, Some(3.0)),
        ];

        WeightNormalizer.normalize(&mut tasks);

        assert!((tasks[0].normalized_weight - 0.25).abs() < 1e-12);
        assert!((tasks[1].normalized_weight - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_huge_explicit_weights_still_sum_to_one() {
        let mut tasks = vec![
            create_test_item("a", "FP1", "S1", None, Some(1e308)),
            create_test_item("b", "FP1", "S1", None, Some(1e308)),
            create_test_item("c", "FP1", "S2", None, Some(1.5e308)),
            create_test_item("d", "FP1", "S2", None, Some(5e307)),
        ];

        WeightNormalizer.normalize(&mut tasks);

        assert!((tasks[0].normalized_weight - 0.5).abs() < 1e-12);
        assert!((tasks[1].normalized_weight - 0.5).abs() < 1e-12);
        assert!((tasks[2].normalized_weight - 0.75).abs() < 1e-12);
        assert!((tasks[3].normalized_weight - 0.25).abs() < 1e-12);
        for sum in group_sums(&tasks).values() {
            assert!((sum - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_tiny_explicit_weights_are_proportional() {
        let mut tasks = vec![
            create_test_item("a", "FP1", "S1", None, Some(1e-320)),
            create_test_item("b", "FP1", "S1", None, Some(3e-320)),
        ];

        WeightNormalizer.normalize(&mut tasks);

        let sum = tasks[0].normalized_weight + tasks[1].normalized_weight;
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(tasks[1].normalized_weight > tasks[0].normalized_weight);
    }

    #[test]
    fn test_partial_explicit_weights_fall_back_to_equal() {
        let mut tasks = vec![
            create_test_item("a", "FP1", "S1", None, Some(5.0)),
            create_test_item("b", "FP1", "S1", None, None),
            create_test_item("c", "FP1", "S2", None, Some(0.0)),
            create_test_item("d", "FP1", "S2", None, Some(2.0)),
        ];

        WeightNormalizer.normalize(&mut tasks);

        assert_eq!(tasks[0].normalized_weight, 0.5);
        assert_eq!(tasks[1].normalized_weight, 0.5);
        assert_eq!(tasks[2].normalized_weight, 0.5);
        assert_eq!(tasks[3].normalized_weight, 0.5);
    }

    #[test]
    fn test_site_weights_sum_to_one_many_groups() {
        let mut tasks: Vec<TaskWithStatus> = (0..97)
            .map(|i| {
                let weight = if i % 3 == 0 { None } else { Some((i % 5 + 1) as f64) };
                create_test_item(
                    &format!("t{}", i),
                    &format!("FP{}", i % 2),
                    &format!("S{}", i % 7),
                    None,
                    weight,
                )
            })
            .collect();

        WeightNormalizer.normalize(&mut tasks);

        for sum in group_sums(&tasks).values() {
            assert!((sum - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_site_progress_weighted_mean() {
        let mut tasks = vec![
            create_test_item("a", "FP1", "S1", Some(100.0), Some(1.0)),
            create_test_item("b", "FP1", "S1", Some(20.0), Some(3.0)),
            create_test_item("c", "FP1", "S2", Some(40.0), None),
            create_test_item("d", "FP1", "S2", None, None),
        ];

        let normalizer = WeightNormalizer;
        normalizer.normalize(&mut tasks);
        let progress = normalizer.site_progress(&tasks);

        assert_eq!(progress.len(), 2);
        assert_eq!(progress[0].site_id, "S1");
        assert_eq!(progress[0].task_count, 2);
        assert!((progress[0].weighted_progress_pct - 40.0).abs() < 1e-9);
        assert_eq!(progress[1].site_name, "Site S2");
        assert!((progress[1].weighted_progress_pct - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input() {
        let mut tasks: Vec<TaskWithStatus> = Vec::new();
        WeightNormalizer.normalize(&mut tasks);
        assert!(WeightNormalizer.site_progress(&tasks).is_empty());
    }
}
