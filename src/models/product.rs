// src/models/product.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// O mesmo nome de produto pode aparecer em vários estoques (um registro por
// estoque). `total_quantity` é derivado: soma de `quantity_in_stock` de todos
// os registros com o mesmo nome, recalculada a cada mutação do grupo.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub product_type: Option<String>,
    pub purchase_price: Decimal,
    pub quantity_in_stock: i32,
    pub total_quantity: i32,
    pub min_quantity: i32,
    pub category_id: Uuid,
    pub supplier_id: Option<Uuid>,
    pub unit_id: Uuid,
    pub stock_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
