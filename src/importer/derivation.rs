// ==========================================
// 施工进度数据导入系统 - 标识派生服务实现
// ==========================================
// 职责: task_uid 派生（跨标段唯一、跨拉取稳定）
// ==========================================

use crate::importer::task_importer_trait::DerivationService as DerivationServiceTrait;
use uuid::Uuid;

pub struct DerivationService;

impl DerivationServiceTrait for DerivationService {
    /// 派生 task_uid
    ///
    /// # 规则
    /// - UUIDv5(NAMESPACE_URL, "package|site|discipline|task")
    /// - 分量 TRIM + 小写；package_id 参与计算保证跨标段唯一
    fn derive_task_uid(
        &self,
        package_id: &str,
        site_id: &str,
        discipline: &str,
        task_name: &str,
    ) -> String {
        let key = [package_id, site_id, discipline, task_name]
            .iter()
            .map(|part| part.trim().to_lowercase())
            .collect::<Vec<_>>()
            .join("|");

        Uuid::new_v5(&Uuid::NAMESPACE_URL, key.as_bytes()).to_string()
    }
}
