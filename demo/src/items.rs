//! In-memory item catalogue

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use coded_error::{ResultExt, StatusCode, error_codef, error_messagef, error_payload};
use coded_error_axum::ErrorResponse;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::RwLock;

const MAX_NAME_LEN: usize = 64;

#[derive(Debug, Clone, Serialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct NewItem {
    pub name: String,
}

#[derive(Debug, Default)]
struct Catalogue {
    next_id: u64,
    items: BTreeMap<u64, Item>,
}

/// Shared item storage
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    inner: Arc<RwLock<Catalogue>>,
}

impl ItemStore {
    pub async fn get(&self, id: u64) -> Option<Item> {
        self.inner.read().await.items.get(&id).cloned()
    }

    pub async fn insert(&self, name: String) -> Item {
        let mut catalogue = self.inner.write().await;
        catalogue.next_id += 1;

        let item = Item {
            id: catalogue.next_id,
            name,
        };
        catalogue.items.insert(item.id, item.clone());
        item
    }
}

/// Item routes with their store attached
pub fn router(store: ItemStore) -> Router {
    Router::new()
        .route("/items", post(create_item))
        .route("/items/{id}", get(get_item))
        .route("/fail", get(fail))
        .with_state(store)
}

async fn get_item(State(store): State<ItemStore>, Path(id): Path<String>) -> Result<Json<Item>, ErrorResponse> {
    let id = id
        .parse::<u64>()
        .with_code(StatusCode::InvalidArgument, "item id must be a number")?;

    match store.get(id).await {
        Some(item) => Ok(Json(item)),
        None => Err(error_messagef!(StatusCode::NotFound, "item {id} not found").into()),
    }
}

async fn create_item(
    State(store): State<ItemStore>,
    Json(new): Json<NewItem>,
) -> Result<(http::StatusCode, Json<Item>), ErrorResponse> {
    let name = new.name.trim();

    let reason = if name.is_empty() {
        Some("must not be empty")
    } else if name.chars().count() > MAX_NAME_LEN {
        Some("must be at most 64 characters")
    } else {
        None
    };

    if let Some(reason) = reason {
        return Err(error_payload(StatusCode::InvalidArgument, json!({ "field": "name", "reason": reason })).into());
    }

    let item = store.insert(name.to_owned()).await;
    tracing::debug!(id = item.id, "item created");

    Ok((http::StatusCode::CREATED, Json(item)))
}

async fn fail() -> Result<Json<Item>, ErrorResponse> {
    Err(error_codef!(StatusCode::Internal, "report backend at {} refused the connection", "10.0.0.7:5432").into())
}
