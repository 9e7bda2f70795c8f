pub mod category_service;
pub mod movement_service;
pub mod product_service;
pub mod stock_service;
pub mod supplier_service;
pub mod unit_service;

pub use category_service::CategoryService;
pub use movement_service::MovementService;
pub use product_service::ProductService;
pub use stock_service::StockService;
pub use supplier_service::SupplierService;
pub use unit_service::UnitService;
