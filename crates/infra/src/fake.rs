//! # テスト用インメモリリポジトリ
//!
//! ハンドラ・ユースケースのテストで使用する [`CompanyFilingRepository`] の実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! edgar-data-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    collections::BTreeMap,
    sync::{
        Arc,
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use edgar_data_domain::company_filing::{
    CompanyFilingId,
    CompanyFilingRecord,
    CompanyFilingUpdate,
};

use crate::{error::InfraError, repository::CompanyFilingRepository};

/// インメモリの CompanyFilingRepository
///
/// - `set_unavailable(true)` で全操作がストアエラーを返す
/// - `set_delay(..)` で全操作の完了を遅らせる（タイムアウトの検証用）
/// - `call_count()` でリポジトリが呼ばれた回数を確認できる
#[derive(Clone, Default)]
pub struct FakeCompanyFilingRepository {
    records:     Arc<Mutex<BTreeMap<CompanyFilingId, CompanyFilingRecord>>>,
    unavailable: Arc<AtomicBool>,
    delay:       Arc<Mutex<Option<Duration>>>,
    calls:       Arc<AtomicUsize>,
}

impl FakeCompanyFilingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = CompanyFilingRecord>) -> Self {
        let repo = Self::new();
        for record in records {
            repo.insert(record);
        }
        repo
    }

    pub fn insert(&self, record: CompanyFilingRecord) {
        self.records.lock().unwrap().insert(record.id, record);
    }

    pub fn get(&self, id: CompanyFilingId) -> Option<CompanyFilingRecord> {
        self.records.lock().unwrap().get(&id).cloned()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self, operation: &str) -> Result<(), InfraError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(InfraError::unexpected(format!(
                "fake store unavailable during {operation}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl CompanyFilingRepository for FakeCompanyFilingRepository {
    async fn find_all(&self) -> Result<Vec<CompanyFilingRecord>, InfraError> {
        self.enter("find_all").await?;
        Ok(self.records.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_id(
        &self,
        id: CompanyFilingId,
    ) -> Result<Option<CompanyFilingRecord>, InfraError> {
        self.enter("find_by_id").await?;
        Ok(self.get(id))
    }

    async fn update(
        &self,
        id: CompanyFilingId,
        update: &CompanyFilingUpdate,
    ) -> Result<u64, InfraError> {
        self.enter("update").await?;
        let mut records = self.records.lock().unwrap();
        match records.get_mut(&id) {
            Some(record) => {
                record.apply(update.clone());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: CompanyFilingId) -> Result<u64, InfraError> {
        self.enter("delete").await?;
        Ok(u64::from(self.records.lock().unwrap().remove(&id).is_some()))
    }
}
