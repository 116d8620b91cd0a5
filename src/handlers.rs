pub mod compras;
pub mod kairos;
pub mod licitaciones;
pub mod reales;
pub mod renglones;
