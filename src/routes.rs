//! Route handlers for the items API

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::db::Database;
use crate::error::{ServerError, ServerResult};
use crate::extract::ValidatedJson;
use crate::models::{Item, ItemCreate, ItemUpdate};

/// GET / - Welcome message
pub async fn read_root() -> Json<Value> {
    Json(json!({ "message": "Welcome to DevOps Items API" }))
}

/// GET /hello - Hello world message
pub async fn hello_world() -> Json<&'static str> {
    Json("Hello, World!")
}

/// GET /items - List all items
pub async fn list_items(State(db): State<Database>) -> ServerResult<Json<Vec<Item>>> {
    let items = db.list_items()?;
    Ok(Json(items))
}

/// POST /items - Create a new item
pub async fn create_item(
    State(db): State<Database>,
    ValidatedJson(req): ValidatedJson<ItemCreate>,
) -> ServerResult<(StatusCode, Json<Item>)> {
    let item = db.insert_item(&req.text)?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /items/{id} - Update an item's text
pub async fn update_item(
    State(db): State<Database>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<ItemUpdate>,
) -> ServerResult<Json<Item>> {
    let item = db
        .get_item(id)?
        .ok_or_else(|| ServerError::NotFound("Item not found".into()))?;

    let updated = db.update_item(item.id, &req.text)?;
    Ok(Json(updated))
}

/// DELETE /items/{id} - Delete an item
pub async fn delete_item(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> ServerResult<StatusCode> {
    let item = db
        .get_item(id)?
        .ok_or_else(|| ServerError::NotFound("Item not found".into()))?;

    db.delete_item(item.id)?;
    Ok(StatusCode::NO_CONTENT)
}
