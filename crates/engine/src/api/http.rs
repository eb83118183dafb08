//! HTTP routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use storager_domain::{
    CellEdit, DomainError, InventoryRecord, Invoice, InvoiceId, RecordDraft, RecordId, RecordKind,
    Shop, ShopId, Transaction, TransactionDraft, TransactionKind,
};

use crate::app::App;
use crate::use_cases::inventory::{
    InventoryError, RemovalOutcome, ShopInventory, StockInput, StockTarget,
};
use crate::use_cases::invoices::{InvoiceError, InvoiceLineRequest};
use crate::use_cases::shops::ShopError;
use crate::use_cases::transactions::TransactionError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/shops", get(list_shops).post(create_shop))
        .route("/api/shops/{shop_id}", get(get_shop))
        .route(
            "/api/shops/{shop_id}/transactions",
            get(list_transactions).post(record_transaction),
        )
        .route(
            "/api/shops/{shop_id}/invoices",
            get(list_invoices).post(issue_invoice),
        )
        .route(
            "/api/shops/{shop_id}/{kind}",
            get(list_inventory)
                .post(add_record)
                .patch(edit_row),
        )
        .route(
            "/api/shops/{shop_id}/{kind}/{record_id}",
            delete(remove_from_shop).patch(edit_record),
        )
        .route("/api/invoices/{invoice_id}", get(get_invoice))
        .route("/api/{kind}/{record_id}", delete(delete_record))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Shops
// =============================================================================

#[derive(Debug, Deserialize)]
struct CreateShopRequest {
    name: String,
    #[serde(default)]
    address: Option<String>,
}

async fn list_shops(State(app): State<Arc<App>>) -> Result<Json<Vec<Shop>>, ApiError> {
    let shops = app.use_cases.shops.ops.list().await?;
    Ok(Json(shops))
}

async fn get_shop(
    State(app): State<Arc<App>>,
    Path(shop_id): Path<String>,
) -> Result<Json<Shop>, ApiError> {
    let shop_id = parse_shop_id(&shop_id)?;
    let shop = app.use_cases.shops.ops.get(&shop_id).await?;
    Ok(Json(shop))
}

async fn create_shop(
    State(app): State<Arc<App>>,
    Json(body): Json<CreateShopRequest>,
) -> Result<(StatusCode, Json<Shop>), ApiError> {
    let shop = app
        .use_cases
        .shops
        .ops
        .create(&body.name, body.address.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(shop)))
}

// =============================================================================
// Inventory
// =============================================================================

/// Either `record_id` of an existing record or a `record` draft.
#[derive(Debug, Deserialize)]
struct AddRecordRequest {
    #[serde(default)]
    record_id: Option<RecordId>,
    #[serde(default)]
    record: Option<RecordDraft>,
    #[serde(flatten)]
    stock: StockInput,
}

#[derive(Debug, Deserialize)]
struct FieldEditRequest {
    field: String,
    #[serde(default)]
    value: String,
}

async fn list_inventory(
    State(app): State<Arc<App>>,
    Path((shop_id, kind)): Path<(String, String)>,
) -> Result<Json<ShopInventory>, ApiError> {
    let shop_id = parse_shop_id(&shop_id)?;
    let kind = parse_kind(&kind)?;
    let inventory = app.use_cases.inventory.list.execute(kind, shop_id).await?;
    Ok(Json(inventory))
}

async fn add_record(
    State(app): State<Arc<App>>,
    Path((shop_id, kind)): Path<(String, String)>,
    Json(body): Json<AddRecordRequest>,
) -> Result<(StatusCode, Json<InventoryRecord>), ApiError> {
    let shop_id = parse_shop_id(&shop_id)?;
    let kind = parse_kind(&kind)?;
    let target = match (body.record_id, body.record) {
        (Some(record_id), None) => StockTarget::Existing(record_id),
        (None, Some(draft)) => StockTarget::New(draft),
        _ => {
            return Err(ApiError::BadRequest(
                "Provide either record_id or record".to_string(),
            ))
        }
    };

    let record = app
        .use_cases
        .inventory
        .add
        .execute(kind, shop_id, target, body.stock)
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn edit_record(
    State(app): State<Arc<App>>,
    Path((shop_id, kind, record_id)): Path<(String, String, String)>,
    Json(body): Json<FieldEditRequest>,
) -> Result<Json<InventoryRecord>, ApiError> {
    let shop_id = parse_shop_id(&shop_id)?;
    let kind = parse_kind(&kind)?;
    let record_id = parse_record_id(&record_id)?;
    let record = app
        .use_cases
        .inventory
        .edit
        .execute(kind, record_id, Some(shop_id), &body.field, &body.value)
        .await?;
    Ok(Json(record))
}

async fn edit_row(
    State(app): State<Arc<App>>,
    Path((shop_id, kind)): Path<(String, String)>,
    Json(edit): Json<CellEdit>,
) -> Result<Json<InventoryRecord>, ApiError> {
    let shop_id = parse_shop_id(&shop_id)?;
    let kind = parse_kind(&kind)?;
    let record = app
        .use_cases
        .inventory
        .edit
        .execute_row(kind, shop_id, edit)
        .await?;
    Ok(Json(record))
}

async fn remove_from_shop(
    State(app): State<Arc<App>>,
    Path((shop_id, kind, record_id)): Path<(String, String, String)>,
) -> Result<Json<RemovalOutcome>, ApiError> {
    let shop_id = parse_shop_id(&shop_id)?;
    let kind = parse_kind(&kind)?;
    let record_id = parse_record_id(&record_id)?;
    let outcome = app
        .use_cases
        .inventory
        .remove_from_shop
        .execute(kind, record_id, shop_id)
        .await?;
    Ok(Json(outcome))
}

async fn delete_record(
    State(app): State<Arc<App>>,
    Path((kind, record_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let kind = parse_kind(&kind)?;
    let record_id = parse_record_id(&record_id)?;
    app.use_cases
        .inventory
        .delete
        .execute(kind, record_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Transactions
// =============================================================================

#[derive(Debug, Deserialize)]
struct TransactionRequest {
    record_id: RecordId,
    #[serde(default)]
    record_kind: RecordKind,
    kind: TransactionKind,
    quantity: i64,
    #[serde(default)]
    note: Option<String>,
}

async fn record_transaction(
    State(app): State<Arc<App>>,
    Path(shop_id): Path<String>,
    Json(body): Json<TransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let draft = TransactionDraft {
        shop_id: parse_shop_id(&shop_id)?,
        record_id: body.record_id,
        record_kind: body.record_kind,
        kind: body.kind,
        quantity: body.quantity,
        note: body.note,
    };
    let transaction = app.use_cases.transactions.record.execute(draft).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

async fn list_transactions(
    State(app): State<Arc<App>>,
    Path(shop_id): Path<String>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let shop_id = parse_shop_id(&shop_id)?;
    let transactions = app.use_cases.transactions.history.execute(shop_id).await?;
    Ok(Json(transactions))
}

// =============================================================================
// Invoices
// =============================================================================

#[derive(Debug, Deserialize)]
struct InvoiceRequest {
    #[serde(default)]
    customer: Option<String>,
    lines: Vec<InvoiceLineRequest>,
}

async fn issue_invoice(
    State(app): State<Arc<App>>,
    Path(shop_id): Path<String>,
    Json(body): Json<InvoiceRequest>,
) -> Result<(StatusCode, Json<Invoice>), ApiError> {
    let shop_id = parse_shop_id(&shop_id)?;
    let invoice = app
        .use_cases
        .invoices
        .ops
        .issue(shop_id, body.customer, body.lines)
        .await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

async fn list_invoices(
    State(app): State<Arc<App>>,
    Path(shop_id): Path<String>,
) -> Result<Json<Vec<Invoice>>, ApiError> {
    let shop_id = parse_shop_id(&shop_id)?;
    let invoices = app.use_cases.invoices.ops.list_for_shop(shop_id).await?;
    Ok(Json(invoices))
}

async fn get_invoice(
    State(app): State<Arc<App>>,
    Path(invoice_id): Path<String>,
) -> Result<Json<Invoice>, ApiError> {
    let invoice_id = InvoiceId::parse(&invoice_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let invoice = app.use_cases.invoices.ops.get(&invoice_id).await?;
    Ok(Json(invoice))
}

// =============================================================================
// Path parsing
// =============================================================================

fn parse_kind(value: &str) -> Result<RecordKind, ApiError> {
    value
        .parse::<RecordKind>()
        .map_err(|_| ApiError::BadRequest(format!("Unknown collection: {}", value)))
}

fn parse_shop_id(value: &str) -> Result<ShopId, ApiError> {
    ShopId::parse(value).map_err(|e| ApiError::BadRequest(e.to_string()))
}

fn parse_record_id(value: &str) -> Result<RecordId, ApiError> {
    RecordId::parse(value).map_err(|e| ApiError::BadRequest(e.to_string()))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

impl From<crate::infrastructure::ports::RepoError> for ApiError {
    fn from(e: crate::infrastructure::ports::RepoError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<InventoryError> for ApiError {
    fn from(e: InventoryError) -> Self {
        match e {
            InventoryError::RecordNotFound(..)
            | InventoryError::ShopNotFound(_)
            | InventoryError::RowNotFound { .. } => ApiError::NotFound,
            InventoryError::NotStockedAtShop { .. } => ApiError::BadRequest(e.to_string()),
            InventoryError::Validation(e) => e.into(),
            InventoryError::Repo(e) => e.into(),
        }
    }
}

impl From<ShopError> for ApiError {
    fn from(e: ShopError) -> Self {
        match e {
            ShopError::NotFound(_) => ApiError::NotFound,
            ShopError::Validation(e) => e.into(),
            ShopError::Repo(e) => e.into(),
        }
    }
}

impl From<TransactionError> for ApiError {
    fn from(e: TransactionError) -> Self {
        match e {
            TransactionError::ShopNotFound(_) | TransactionError::RecordNotFound(..) => {
                ApiError::NotFound
            }
            TransactionError::Invalid(e) => e.into(),
            TransactionError::Repo(e) => e.into(),
        }
    }
}

impl From<InvoiceError> for ApiError {
    fn from(e: InvoiceError) -> Self {
        match e {
            InvoiceError::NotFound(_)
            | InvoiceError::ShopNotFound(_)
            | InvoiceError::RecordNotFound(..) => ApiError::NotFound,
            InvoiceError::Invalid(e) => e.into(),
            InvoiceError::Repo(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Repositories;
    use crate::infrastructure::clock::{SequentialIds, SystemClock};
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn router() -> Router {
        let repositories = Repositories::in_memory(
            Arc::new(SystemClock::new()),
            Arc::new(SequentialIds::new("doc")),
        );
        routes().with_state(Arc::new(App::new(repositories)))
    }

    async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .expect("request");

        let response = router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn new_shop(router: &Router, name: &str) -> String {
        let (status, shop) = send(router, "POST", "/api/shops", Some(json!({ "name": name }))).await;
        assert_eq!(status, StatusCode::CREATED);
        shop["id"].as_str().expect("shop id").to_string()
    }

    async fn add_item(router: &Router, shop: &str, name: &str, storage: i64) -> String {
        let (status, record) = send(
            router,
            "POST",
            &format!("/api/shops/{shop}/items"),
            Some(json!({ "record": { "name": name }, "storage": storage, "price": 2.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        record["id"].as_str().expect("record id").to_string()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let router = router();
        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .expect("request");
        let response = router.oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn shop_table_lists_warnings_first() {
        let router = router();
        let shop = new_shop(&router, "North").await;
        let full = add_item(&router, &shop, "Full", 20).await;
        let empty = add_item(&router, &shop, "Empty", 0).await;

        let (status, table) = send(&router, "GET", &format!("/api/shops/{shop}/items"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(table["warnings"], json!([empty]));
        assert_eq!(table["rows"][0]["record"]["id"], json!(empty));
        assert_eq!(table["rows"][1]["record"]["id"], json!(full));
        assert_eq!(table["rows"][1]["storage"]["low_storage_alert"], json!(false));

        let (status, parts) = send(&router, "GET", &format!("/api/shops/{shop}/parts"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(parts["rows"], json!([]));
    }

    #[tokio::test]
    async fn cell_edit_updates_storage_at_the_shop() {
        let router = router();
        let north = new_shop(&router, "North").await;
        let south = new_shop(&router, "South").await;
        let id = add_item(&router, &north, "Hose", 3).await;
        let (status, _) = send(
            &router,
            "POST",
            &format!("/api/shops/{south}/items"),
            Some(json!({ "record_id": id, "storage": 7 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, record) = send(
            &router,
            "PATCH",
            &format!("/api/shops/{south}/items/{id}"),
            Some(json!({ "field": "storage", "value": "11" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(record["storage"], json!([3, 11]));

        let (status, _) = send(
            &router,
            "PATCH",
            &format!("/api/shops/{south}/items/{id}"),
            Some(json!({ "field": "price", "value": "cheap" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, record) = send(
            &router,
            "PATCH",
            &format!("/api/shops/{south}/items/{id}"),
            Some(json!({ "field": "storage", "value": "9.5" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(record["storage"], json!([3, 9]));

        let (status, _) = send(
            &router,
            "PATCH",
            &format!("/api/shops/{south}/items/{id}"),
            Some(json!({ "field": "id", "value": "other" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn removing_last_shop_deletes_the_record() {
        let router = router();
        let shop = new_shop(&router, "North").await;
        let id = add_item(&router, &shop, "Clamp", 1).await;

        let (status, outcome) =
            send(&router, "DELETE", &format!("/api/shops/{shop}/items/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(outcome["outcome"], json!("deleted"));

        let (status, _) =
            send(&router, "DELETE", &format!("/api/shops/{shop}/items/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&router, "DELETE", &format!("/api/items/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn sale_moves_stock_and_invoice_bills_it() {
        let router = router();
        let shop = new_shop(&router, "North").await;
        let id = add_item(&router, &shop, "Valve", 5).await;

        let (status, transaction) = send(
            &router,
            "POST",
            &format!("/api/shops/{shop}/transactions"),
            Some(json!({ "record_id": id, "kind": "sale", "quantity": 2 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(transaction["new_storage"], json!(3));

        let (status, _) = send(
            &router,
            "POST",
            &format!("/api/shops/{shop}/transactions"),
            Some(json!({ "record_id": id, "kind": "sale", "quantity": 9 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, invoice) = send(
            &router,
            "POST",
            &format!("/api/shops/{shop}/invoices"),
            Some(json!({ "customer": "Dana", "lines": [{ "record_id": id, "quantity": 2 }] })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(invoice["total"], json!(4.0));

        let invoice_id = invoice["id"].as_str().expect("invoice id").to_string();
        let (status, fetched) = send(&router, "GET", &format!("/api/invoices/{invoice_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, invoice);

        let (status, history) =
            send(&router, "GET", &format!("/api/shops/{shop}/transactions"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(history.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn bad_input_is_rejected() {
        let router = router();
        let shop = new_shop(&router, "North").await;

        let (status, _) = send(&router, "GET", &format!("/api/shops/{shop}/widgets"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&router, "POST", "/api/shops", Some(json!({ "name": "  " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&router, "GET", "/api/shops/missing/items", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &router,
            "POST",
            &format!("/api/shops/{shop}/items"),
            Some(json!({ "storage": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
