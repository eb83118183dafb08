//! Shop use cases.

use std::sync::Arc;

use storager_domain::{DomainError, Shop, ShopDraft, ShopId};

use crate::infrastructure::ports::{RepoError, ShopRepo};

/// Container for shop use cases.
pub struct ShopUseCases {
    pub ops: Arc<ShopOps>,
}

impl ShopUseCases {
    pub fn new(ops: Arc<ShopOps>) -> Self {
        Self { ops }
    }
}

/// Shop operations.
pub struct ShopOps {
    shop_repo: Arc<dyn ShopRepo>,
}

impl ShopOps {
    pub fn new(shop_repo: Arc<dyn ShopRepo>) -> Self {
        Self { shop_repo }
    }

    pub async fn list(&self) -> Result<Vec<Shop>, ShopError> {
        Ok(self.shop_repo.list().await?)
    }

    pub async fn get(&self, shop_id: &ShopId) -> Result<Shop, ShopError> {
        self.shop_repo
            .get(shop_id)
            .await?
            .ok_or_else(|| ShopError::NotFound(shop_id.clone()))
    }

    pub async fn create(&self, name: &str, address: Option<&str>) -> Result<Shop, ShopError> {
        let mut draft = ShopDraft::new(name)?;
        if let Some(address) = address {
            draft = draft.with_address(address);
        }
        let shop = self.shop_repo.create(draft).await?;
        tracing::info!(shop_id = %shop.id, name = %shop.name, "Shop created");
        Ok(shop)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShopError {
    #[error("Shop not found: {0}")]
    NotFound(ShopId),
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
