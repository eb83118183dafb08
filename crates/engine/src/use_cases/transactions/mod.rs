//! Transaction use cases
//!
//! Stock only changes through transactions once a record is stocked: a
//! sale, a restock or a count adjustment is applied to the record and the
//! movement is kept as history.

use std::sync::Arc;

use storager_domain::{DomainError, RecordId, RecordKind, ShopId, Transaction, TransactionDraft};

use crate::infrastructure::ports::{RecordRepo, RepoError, ShopRepo, TransactionRepo};

/// Container for transaction use cases.
pub struct TransactionUseCases {
    pub record: Arc<RecordTransaction>,
    pub history: Arc<TransactionHistory>,
}

impl TransactionUseCases {
    pub fn new(record: Arc<RecordTransaction>, history: Arc<TransactionHistory>) -> Self {
        Self { record, history }
    }
}

/// Record transaction use case.
///
/// Orchestrates: shop and record lookup, stock movement, history entry. The
/// stock movement is undone when the history entry cannot be written.
pub struct RecordTransaction {
    record_repo: Arc<dyn RecordRepo>,
    shop_repo: Arc<dyn ShopRepo>,
    transaction_repo: Arc<dyn TransactionRepo>,
}

impl RecordTransaction {
    pub fn new(
        record_repo: Arc<dyn RecordRepo>,
        shop_repo: Arc<dyn ShopRepo>,
        transaction_repo: Arc<dyn TransactionRepo>,
    ) -> Self {
        Self {
            record_repo,
            shop_repo,
            transaction_repo,
        }
    }

    pub async fn execute(&self, draft: TransactionDraft) -> Result<Transaction, TransactionError> {
        draft.validate()?;

        if self.shop_repo.get(&draft.shop_id).await?.is_none() {
            return Err(TransactionError::ShopNotFound(draft.shop_id));
        }

        let mut record = self
            .record_repo
            .get(draft.record_kind, &draft.record_id)
            .await?
            .ok_or_else(|| {
                TransactionError::RecordNotFound(draft.record_kind, draft.record_id.clone())
            })?;

        let original = record.clone();
        let movement = draft.apply_to(&mut record)?;
        self.record_repo.save(&record).await?;

        // Stock and history move together: without a history entry the
        // stock goes back to what it was.
        let transaction = match self.transaction_repo.create(draft, movement).await {
            Ok(transaction) => transaction,
            Err(e) => {
                if let Err(rollback) = self.record_repo.save(&original).await {
                    tracing::error!(
                        record_id = %original.id,
                        error = %rollback,
                        "Failed to restore stock after transaction write failed"
                    );
                }
                return Err(e.into());
            }
        };

        tracing::info!(
            transaction_id = %transaction.id,
            record_id = %transaction.record_id,
            shop_id = %transaction.shop_id,
            kind = %transaction.kind,
            previous_storage = transaction.previous_storage,
            new_storage = transaction.new_storage,
            "Transaction recorded"
        );

        Ok(transaction)
    }
}

/// Transaction history of a shop, newest first.
pub struct TransactionHistory {
    shop_repo: Arc<dyn ShopRepo>,
    transaction_repo: Arc<dyn TransactionRepo>,
}

impl TransactionHistory {
    pub fn new(shop_repo: Arc<dyn ShopRepo>, transaction_repo: Arc<dyn TransactionRepo>) -> Self {
        Self {
            shop_repo,
            transaction_repo,
        }
    }

    pub async fn execute(&self, shop_id: ShopId) -> Result<Vec<Transaction>, TransactionError> {
        if self.shop_repo.get(&shop_id).await?.is_none() {
            return Err(TransactionError::ShopNotFound(shop_id));
        }
        Ok(self.transaction_repo.list_for_shop(&shop_id).await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    #[error("Shop not found: {0}")]
    ShopNotFound(ShopId),
    #[error("{0} not found: {1}")]
    RecordNotFound(RecordKind, RecordId),
    #[error("Invalid transaction: {0}")]
    Invalid(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
