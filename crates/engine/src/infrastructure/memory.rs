//! In-memory document store.
//!
//! Keeps every collection in a `DashMap` keyed by document id. Ids are
//! generated on create, saves merge into the existing document, and deletes
//! of missing documents succeed, matching the hosted document database the
//! application was written against.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use storager_domain::{
    InventoryRecord, Invoice, InvoiceDraft, InvoiceId, RecordDraft, RecordId, RecordKind, Shop,
    ShopDraft, ShopId, ShopStock, StockMovement, Transaction, TransactionDraft, TransactionId,
};

use crate::infrastructure::ports::{
    ClockPort, IdPort, InvoiceRepo, RecordRepo, RepoError, ShopRepo, TransactionRepo,
};

pub struct InMemoryStore {
    items: DashMap<RecordId, InventoryRecord>,
    parts: DashMap<RecordId, InventoryRecord>,
    shops: DashMap<ShopId, Shop>,
    transactions: DashMap<TransactionId, Transaction>,
    invoices: DashMap<InvoiceId, Invoice>,
    clock: Arc<dyn ClockPort>,
    ids: Arc<dyn IdPort>,
}

impl InMemoryStore {
    pub fn new(clock: Arc<dyn ClockPort>, ids: Arc<dyn IdPort>) -> Self {
        Self {
            items: DashMap::new(),
            parts: DashMap::new(),
            shops: DashMap::new(),
            transactions: DashMap::new(),
            invoices: DashMap::new(),
            clock,
            ids,
        }
    }

    fn records(&self, kind: RecordKind) -> &DashMap<RecordId, InventoryRecord> {
        match kind {
            RecordKind::Item => &self.items,
            RecordKind::Part => &self.parts,
        }
    }
}

/// Documents come back ordered by id.
fn sorted_by_id(mut records: Vec<InventoryRecord>) -> Vec<InventoryRecord> {
    records.sort_by(|a, b| a.id.cmp(&b.id));
    records
}

#[async_trait]
impl RecordRepo for InMemoryStore {
    async fn get(
        &self,
        kind: RecordKind,
        id: &RecordId,
    ) -> Result<Option<InventoryRecord>, RepoError> {
        Ok(self.records(kind).get(id).map(|r| r.value().clone()))
    }

    async fn list_at_shop(
        &self,
        kind: RecordKind,
        shop_id: &ShopId,
    ) -> Result<Vec<InventoryRecord>, RepoError> {
        let records = self
            .records(kind)
            .iter()
            .filter(|r| r.value().is_stocked_at(shop_id))
            .map(|r| r.value().clone())
            .collect();
        Ok(sorted_by_id(records))
    }

    async fn create(
        &self,
        draft: RecordDraft,
        first_stock: ShopStock,
    ) -> Result<InventoryRecord, RepoError> {
        let mut record = InventoryRecord::from_draft(RecordId::new(self.ids.next_id()), draft);
        record.upsert_stock(first_stock);
        self.records(record.kind)
            .insert(record.id.clone(), record.clone());
        tracing::debug!(
            record_id = %record.id,
            collection = record.kind.collection(),
            shops = record.shop_count(),
            "Document created"
        );
        Ok(record)
    }

    async fn save(&self, record: &InventoryRecord) -> Result<(), RepoError> {
        let collection = self.records(record.kind);
        let mut merged = record.clone();
        // Fields the caller does not know about survive the write.
        if let Some(existing) = collection.get(&record.id) {
            for (key, value) in existing.attributes.iter() {
                merged
                    .attributes
                    .entry(key.clone())
                    .or_insert_with(|| value.clone());
            }
        }
        collection.insert(record.id.clone(), merged);
        Ok(())
    }

    async fn delete(&self, kind: RecordKind, id: &RecordId) -> Result<(), RepoError> {
        self.records(kind).remove(id);
        Ok(())
    }
}

#[async_trait]
impl ShopRepo for InMemoryStore {
    async fn get(&self, id: &ShopId) -> Result<Option<Shop>, RepoError> {
        Ok(self.shops.get(id).map(|s| s.value().clone()))
    }

    async fn list(&self) -> Result<Vec<Shop>, RepoError> {
        let mut shops: Vec<Shop> = self.shops.iter().map(|s| s.value().clone()).collect();
        shops.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(shops)
    }

    async fn create(&self, draft: ShopDraft) -> Result<Shop, RepoError> {
        let shop = Shop::from_draft(ShopId::new(self.ids.next_id()), draft, self.clock.now());
        self.shops.insert(shop.id.clone(), shop.clone());
        Ok(shop)
    }
}

#[async_trait]
impl TransactionRepo for InMemoryStore {
    async fn create(
        &self,
        draft: TransactionDraft,
        movement: StockMovement,
    ) -> Result<Transaction, RepoError> {
        let transaction = Transaction::from_draft(
            TransactionId::new(self.ids.next_id()),
            draft,
            movement,
            self.clock.now(),
        );
        self.transactions
            .insert(transaction.id.clone(), transaction.clone());
        Ok(transaction)
    }

    async fn list_for_shop(&self, shop_id: &ShopId) -> Result<Vec<Transaction>, RepoError> {
        let mut transactions: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| t.value().shop_id == *shop_id)
            .map(|t| t.value().clone())
            .collect();
        transactions.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(transactions)
    }
}

#[async_trait]
impl InvoiceRepo for InMemoryStore {
    async fn get(&self, id: &InvoiceId) -> Result<Option<Invoice>, RepoError> {
        Ok(self.invoices.get(id).map(|i| i.value().clone()))
    }

    async fn create(&self, draft: InvoiceDraft) -> Result<Invoice, RepoError> {
        let invoice = Invoice::from_draft(InvoiceId::new(self.ids.next_id()), draft, self.clock.now());
        self.invoices.insert(invoice.id.clone(), invoice.clone());
        Ok(invoice)
    }

    async fn list_for_shop(&self, shop_id: &ShopId) -> Result<Vec<Invoice>, RepoError> {
        let mut invoices: Vec<Invoice> = self
            .invoices
            .iter()
            .filter(|i| i.value().shop_id == *shop_id)
            .map(|i| i.value().clone())
            .collect();
        invoices.sort_by(|a, b| b.issued_at.cmp(&a.issued_at).then_with(|| a.id.cmp(&b.id)));
        Ok(invoices)
    }
}
