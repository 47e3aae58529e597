// ==========================================
// 施工进度数据导入系统 - 本地文件拉取器
// ==========================================
// 职责: SheetFetcher 的本地文件实现（locator = 文件路径）
// 说明: 解析为阻塞操作，放到 tokio 阻塞线程池执行
// ==========================================

use crate::config::sheet_layout::DATA_ENTRY_TAB;
use crate::domain::package::PackageSource;
use crate::domain::sheet::SheetData;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::task_importer_trait::SheetFetcher;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

pub struct FileSheetFetcher {
    parser: Arc<UniversalFileParser>,
    base_dir: Option<PathBuf>,
}

impl Default for FileSheetFetcher {
    fn default() -> Self {
        Self::new(DATA_ENTRY_TAB)
    }
}

impl FileSheetFetcher {
    /// # 参数
    /// - tab_name: Excel 优先读取的工作表名
    pub fn new(tab_name: &str) -> Self {
        Self {
            parser: Arc::new(UniversalFileParser::new(tab_name)),
            base_dir: None,
        }
    }

    /// 相对路径的 locator 以 base_dir 为根解析
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    fn resolve(&self, locator: &str) -> PathBuf {
        let path = PathBuf::from(locator);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        }
    }
}

#[async_trait]
impl SheetFetcher for FileSheetFetcher {
    async fn fetch(&self, source: &PackageSource) -> ImportResult<SheetData> {
        let path = self.resolve(&source.locator);
        debug!(package_id = %source.package_id, path = %path.display(), "读取本地文件");

        let parser = Arc::clone(&self.parser);
        tokio::task::spawn_blocking(move || parser.parse(&path))
            .await
            .map_err(|e| ImportError::FetchError {
                package_id: source.package_id.clone(),
                message: e.to_string(),
            })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_fetch_csv_relative_to_base_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut file = std::fs::File::create(dir.path().join("FP1.csv")).unwrap();
        writeln!(file, "Site ID,Task Name").unwrap();
        writeln!(file, "S1,Excavation").unwrap();

        let fetcher = FileSheetFetcher::default().with_base_dir(dir.path());
        let source = PackageSource::new("FP1", "Flood Package-1", "FP1.csv");
        let sheet = fetcher.fetch(&source).await.unwrap();

        assert_eq!(sheet.rows.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let fetcher = FileSheetFetcher::default();
        let source = PackageSource::new("FP1", "Flood Package-1", "/no/such/FP1.xlsx");
        let result = fetcher.fetch(&source).await;
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_absolute_locator_ignores_base_dir() {
        let fetcher = FileSheetFetcher::default().with_base_dir("/data");
        assert_eq!(fetcher.resolve("/abs/FP1.xlsx"), PathBuf::from("/abs/FP1.xlsx"));
        assert_eq!(fetcher.resolve("FP1.xlsx"), PathBuf::from("/data/FP1.xlsx"));
    }
}
