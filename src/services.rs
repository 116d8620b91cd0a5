pub mod lote;

pub mod compra_service;
pub use compra_service::CompraService;
pub mod kairos_service;
pub use kairos_service::KairosService;
pub mod licitacion_service;
pub use licitacion_service::LicitacionService;
pub mod real_service;
pub use real_service::RealService;
pub mod renglon_service;
pub use renglon_service::RenglonService;
