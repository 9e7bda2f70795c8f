pub mod category_repo;
pub use category_repo::CategoryRepository;
pub mod unit_repo;
pub use unit_repo::UnitRepository;
pub mod supplier_repo;
pub use supplier_repo::SupplierRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod stock_repo;
pub use stock_repo::StockRepository;
pub mod movement_repo;
pub use movement_repo::MovementRepository;
