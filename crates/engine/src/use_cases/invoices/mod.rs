//! Invoice use cases.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use storager_domain::{
    DomainError, Invoice, InvoiceDraft, InvoiceId, InvoiceLine, RecordId, RecordKind, ShopId,
};

use crate::infrastructure::ports::{InvoiceRepo, RecordRepo, RepoError, ShopRepo};

/// One requested invoice line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLineRequest {
    pub record_id: RecordId,
    #[serde(default)]
    pub record_kind: RecordKind,
    pub quantity: i64,
}

/// Container for invoice use cases.
pub struct InvoiceUseCases {
    pub ops: Arc<InvoiceOps>,
}

impl InvoiceUseCases {
    pub fn new(ops: Arc<InvoiceOps>) -> Self {
        Self { ops }
    }
}

/// Invoice operations.
///
/// Invoices bill records at the shop's prices. They do not move stock;
/// sales are recorded as transactions.
pub struct InvoiceOps {
    record_repo: Arc<dyn RecordRepo>,
    shop_repo: Arc<dyn ShopRepo>,
    invoice_repo: Arc<dyn InvoiceRepo>,
}

impl InvoiceOps {
    pub fn new(
        record_repo: Arc<dyn RecordRepo>,
        shop_repo: Arc<dyn ShopRepo>,
        invoice_repo: Arc<dyn InvoiceRepo>,
    ) -> Self {
        Self {
            record_repo,
            shop_repo,
            invoice_repo,
        }
    }

    pub async fn issue(
        &self,
        shop_id: ShopId,
        customer: Option<String>,
        requests: Vec<InvoiceLineRequest>,
    ) -> Result<Invoice, InvoiceError> {
        self.ensure_shop(&shop_id).await?;

        let mut lines = Vec::with_capacity(requests.len());
        for request in requests {
            let record = self
                .record_repo
                .get(request.record_kind, &request.record_id)
                .await?
                .ok_or_else(|| {
                    InvoiceError::RecordNotFound(request.record_kind, request.record_id.clone())
                })?;
            lines.push(InvoiceLine::for_record(&record, &shop_id, request.quantity)?);
        }

        let draft = InvoiceDraft::new(shop_id, customer, lines)?;
        let invoice = self.invoice_repo.create(draft).await?;

        tracing::info!(
            invoice_id = %invoice.id,
            shop_id = %invoice.shop_id,
            lines = invoice.lines.len(),
            total = invoice.total,
            "Invoice issued"
        );

        Ok(invoice)
    }

    pub async fn get(&self, invoice_id: &InvoiceId) -> Result<Invoice, InvoiceError> {
        self.invoice_repo
            .get(invoice_id)
            .await?
            .ok_or_else(|| InvoiceError::NotFound(invoice_id.clone()))
    }

    pub async fn list_for_shop(&self, shop_id: ShopId) -> Result<Vec<Invoice>, InvoiceError> {
        self.ensure_shop(&shop_id).await?;
        Ok(self.invoice_repo.list_for_shop(&shop_id).await?)
    }

    async fn ensure_shop(&self, shop_id: &ShopId) -> Result<(), InvoiceError> {
        match self.shop_repo.get(shop_id).await? {
            Some(_) => Ok(()),
            None => Err(InvoiceError::ShopNotFound(shop_id.clone())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InvoiceError {
    #[error("Invoice not found: {0}")]
    NotFound(InvoiceId),
    #[error("Shop not found: {0}")]
    ShopNotFound(ShopId),
    #[error("{0} not found: {1}")]
    RecordNotFound(RecordKind, RecordId),
    #[error("Invalid invoice: {0}")]
    Invalid(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
