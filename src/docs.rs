// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Produtos ---
        handlers::products::get_all_products,
        handlers::products::get_product,
        handlers::products::get_products_by_name,
        handlers::products::get_product_movements,
        handlers::products::refresh_total_quantity,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,

        // --- Categorias ---
        handlers::categories::get_all_categories,
        handlers::categories::get_category,
        handlers::categories::get_category_products,
        handlers::categories::create_category,
        handlers::categories::update_category,
        handlers::categories::delete_category,

        // --- Unidades de Medida ---
        handlers::units::get_all_units,
        handlers::units::get_unit,
        handlers::units::get_unit_products,
        handlers::units::create_unit,
        handlers::units::update_unit,
        handlers::units::delete_unit,

        // --- Fornecedores ---
        handlers::suppliers::get_all_suppliers,
        handlers::suppliers::get_supplier,
        handlers::suppliers::create_supplier,
        handlers::suppliers::update_supplier,
        handlers::suppliers::delete_supplier,

        // --- Estoques ---
        handlers::stocks::get_all_stocks,
        handlers::stocks::get_stock,
        handlers::stocks::get_stock_products,
        handlers::stocks::get_stock_movements,
        handlers::stocks::get_stock_inventories,
        handlers::stocks::create_stock_inventory,
        handlers::stocks::create_stock,
        handlers::stocks::update_stock,
        handlers::stocks::delete_stock,

        // --- Movimentações ---
        handlers::movements::record_entry,
        handlers::movements::record_exit,
        handlers::movements::transfer,
    ),
    components(
        schemas(
            // --- Entidades ---
            models::product::Product,
            models::catalog::Category,
            models::catalog::UnitOfMeasure,
            models::catalog::Supplier,
            models::stock::Stock,
            models::stock::Inventory,
            models::movement::MovementType,
            models::movement::StockMovement,

            // --- Payloads ---
            handlers::products::CreateProductPayload,
            handlers::products::UpdateProductPayload,
            handlers::categories::CreateCategoryPayload,
            handlers::categories::UpdateCategoryPayload,
            handlers::units::CreateUnitPayload,
            handlers::units::UpdateUnitPayload,
            handlers::suppliers::CreateSupplierPayload,
            handlers::suppliers::UpdateSupplierPayload,
            handlers::stocks::CreateStockPayload,
            handlers::stocks::UpdateStockPayload,
            handlers::stocks::CreateInventoryPayload,
            handlers::movements::MovementPayload,
            handlers::movements::TransferPayload,
        )
    ),
    tags(
        (name = "Produtos", description = "Gestão de Produtos e Quantidades Totais"),
        (name = "Categorias", description = "Gestão de Categorias"),
        (name = "Unidades de Medida", description = "Gestão de Unidades de Medida"),
        (name = "Fornecedores", description = "Gestão de Fornecedores"),
        (name = "Estoques", description = "Gestão de Estoques e Inventários"),
        (name = "Movimentações", description = "Entradas, Saídas e Transferências")
    )
)]
pub struct ApiDoc;
