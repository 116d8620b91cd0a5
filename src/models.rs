pub mod compra;
pub mod kairos;
pub mod licitacion;
pub mod real;
pub mod renglon;
pub mod usuario;
