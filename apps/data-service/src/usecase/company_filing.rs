//! 企業ファイリングデータのユースケース

use std::{future::Future, sync::Arc, time::Duration};

use edgar_data_domain::company_filing::{
    CompanyFilingId,
    CompanyFilingRecord,
    CompanyFilingUpdate,
};
use edgar_data_infra::{InfraError, repository::CompanyFilingRepository};

use crate::error::{ApiError, StoreOperation};

/// 企業ファイリングデータのユースケース
pub struct CompanyFilingUseCaseImpl {
    repository:    Arc<dyn CompanyFilingRepository>,
    store_timeout: Duration,
}

impl CompanyFilingUseCaseImpl {
    pub fn new(repository: Arc<dyn CompanyFilingRepository>, store_timeout: Duration) -> Self {
        Self {
            repository,
            store_timeout,
        }
    }

    /// 全レコードを取得する
    pub async fn list(&self) -> Result<Vec<CompanyFilingRecord>, ApiError> {
        self.call("find_all", self.repository.find_all())
            .await
            .map_err(|e| store_error(StoreOperation::Fetch, None, e))
    }

    /// ID を指定してレコードを取得する
    pub async fn get(&self, id: CompanyFilingId) -> Result<CompanyFilingRecord, ApiError> {
        self.call("find_by_id", self.repository.find_by_id(id))
            .await
            .map_err(|e| store_error(StoreOperation::Fetch, Some(id), e))?
            .ok_or(ApiError::NotFound)
    }

    /// 4 フィールドを上書きする
    ///
    /// 該当レコードがなくても成功として扱う。
    pub async fn update(
        &self,
        id: CompanyFilingId,
        update: CompanyFilingUpdate,
    ) -> Result<(), ApiError> {
        let affected = self
            .call("update", self.repository.update(id, &update))
            .await
            .map_err(|e| store_error(StoreOperation::Update, Some(id), e))?;

        tracing::debug!(%id, affected, "UPDATE の影響行数");
        tracing::info!(%id, "Data with ID {id} updated successfully");
        Ok(())
    }

    /// レコードを削除する
    ///
    /// 該当レコードがなくても成功として扱う。
    pub async fn delete(&self, id: CompanyFilingId) -> Result<(), ApiError> {
        let affected = self
            .call("delete", self.repository.delete(id))
            .await
            .map_err(|e| store_error(StoreOperation::Delete, Some(id), e))?;

        tracing::debug!(%id, affected, "DELETE の影響行数");
        tracing::info!(%id, "Data with ID {id} deleted successfully");
        Ok(())
    }

    /// ストア呼び出しを `store_timeout` で打ち切る
    async fn call<T>(
        &self,
        operation: &'static str,
        future: impl Future<Output = Result<T, InfraError>>,
    ) -> Result<T, InfraError> {
        tokio::time::timeout(self.store_timeout, future)
            .await
            .unwrap_or_else(|_| Err(InfraError::timeout(operation, self.store_timeout)))
    }
}

fn store_error(
    operation: StoreOperation,
    id: Option<CompanyFilingId>,
    source: InfraError,
) -> ApiError {
    match id {
        Some(id) => tracing::error!(%operation, %id, error = %source, "ストア呼び出しに失敗しました"),
        None => tracing::error!(%operation, error = %source, "ストア呼び出しに失敗しました"),
    }
    ApiError::store(operation, source)
}

#[cfg(test)]
mod tests {
    use edgar_data_infra::fake::FakeCompanyFilingRepository;
    use pretty_assertions::assert_eq;

    use super::*;

    fn annual_report() -> CompanyFilingRecord {
        CompanyFilingRecord::new(
            CompanyFilingId::new(1),
            CompanyFilingUpdate {
                filings:          Some("10-K".to_string()),
                descr:            Some("Annual report".to_string()),
                filed_effective:  Some("2023-01-01".to_string()),
                file_film_number: Some("F123".to_string()),
            },
        )
    }

    fn sut(repository: &FakeCompanyFilingRepository) -> CompanyFilingUseCaseImpl {
        CompanyFilingUseCaseImpl::new(Arc::new(repository.clone()), Duration::from_secs(10))
    }

    #[tokio::test]
    async fn test_getは存在するレコードを返す() {
        let repository = FakeCompanyFilingRepository::with_records([annual_report()]);

        let record = sut(&repository).get(CompanyFilingId::new(1)).await.unwrap();

        assert_eq!(record, annual_report());
    }

    #[tokio::test]
    async fn test_getは存在しないidでnot_foundを返す() {
        let repository = FakeCompanyFilingRepository::new();

        let result = sut(&repository).get(CompanyFilingId::new(42)).await;

        assert!(matches!(result, Err(ApiError::NotFound)));
    }

    #[tokio::test]
    async fn test_updateは4フィールドを上書きし未指定はnoneになる() {
        let repository = FakeCompanyFilingRepository::with_records([annual_report()]);
        let update = CompanyFilingUpdate {
            filings: Some("10-Q".to_string()),
            ..Default::default()
        };

        sut(&repository)
            .update(CompanyFilingId::new(1), update)
            .await
            .unwrap();

        let record = repository.get(CompanyFilingId::new(1)).unwrap();
        assert_eq!(record.filings.as_deref(), Some("10-Q"));
        assert_eq!(record.descr, None);
        assert_eq!(record.filed_effective, None);
        assert_eq!(record.file_film_number, None);
    }

    #[tokio::test]
    async fn test_存在しないidへの更新と削除は成功扱いになる() {
        let repository = FakeCompanyFilingRepository::new();
        let sut = sut(&repository);
        let id = CompanyFilingId::new(404);

        assert!(sut.update(id, CompanyFilingUpdate::default()).await.is_ok());
        assert!(sut.delete(id).await.is_ok());
    }

    #[tokio::test]
    async fn test_ストアエラーは操作ごとのstoreエラーになる() {
        let repository = FakeCompanyFilingRepository::with_records([annual_report()]);
        repository.set_unavailable(true);
        let sut = sut(&repository);
        let id = CompanyFilingId::new(1);

        assert!(matches!(
            sut.list().await,
            Err(ApiError::Store { operation: StoreOperation::Fetch, .. })
        ));
        assert!(matches!(
            sut.get(id).await,
            Err(ApiError::Store { operation: StoreOperation::Fetch, .. })
        ));
        assert!(matches!(
            sut.update(id, CompanyFilingUpdate::default()).await,
            Err(ApiError::Store { operation: StoreOperation::Update, .. })
        ));
        assert!(matches!(
            sut.delete(id).await,
            Err(ApiError::Store { operation: StoreOperation::Delete, .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_タイムアウトを超えたストア呼び出しはstoreエラーになる() {
        let repository = FakeCompanyFilingRepository::with_records([annual_report()]);
        repository.set_delay(Duration::from_secs(30));

        let result = sut(&repository).get(CompanyFilingId::new(1)).await;

        let Err(ApiError::Store { operation, source }) = result else {
            panic!("expected store error, got {result:?}");
        };
        assert_eq!(operation, StoreOperation::Fetch);
        assert!(source.is_timeout());
    }
}
