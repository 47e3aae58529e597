// ==========================================
// 施工进度数据导入系统 - 管道配置读取 Trait
// ==========================================
// 职责: 定义编排器所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::package::PackageSource;
use crate::importer::error::ImportResult;
use async_trait::async_trait;

// ==========================================
// PipelineConfigReader Trait
// ==========================================
// 用途: 编排器读取数据源与阈值
// 实现者: ConfigManager（测试中可替换为 Mock）
#[async_trait]
pub trait PipelineConfigReader: Send + Sync {
    // ===== 数据源 =====

    /// 获取标段数据源列表（顺序即合并顺序）
    async fn get_package_sources(&self) -> ImportResult<Vec<PackageSource>>;

    /// 获取优先读取的工作表名
    ///
    /// # 默认值
    /// - Data_Entry
    async fn get_tab_name(&self) -> ImportResult<String>;

    // ===== 状态派生 =====

    /// 获取延误容差（百分点）
    ///
    /// # 默认值
    /// - 10.0
    async fn get_delay_tolerance(&self) -> ImportResult<f64>;

    // ===== 调用方提示 =====

    /// 获取刷新间隔（分钟）
    ///
    /// # 默认值
    /// - 30
    async fn get_refresh_interval_minutes(&self) -> ImportResult<u64>;
}
