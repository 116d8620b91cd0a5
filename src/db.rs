pub mod compra_repo;
pub use compra_repo::CompraRepository;
pub mod kairos_repo;
pub use kairos_repo::KairosRepository;
pub mod licitacion_repo;
pub use licitacion_repo::LicitacionRepository;
pub mod real_repo;
pub use real_repo::RealRepository;
pub mod renglon_repo;
pub use renglon_repo::RenglonRepository;
pub mod usuario_repo;
pub use usuario_repo::UsuarioRepository;

use rust_decimal::Decimal;
use sqlx::Postgres;
use sqlx::query_builder::Separated;

use crate::common::parche::Parche;

// Helpers compartidos para armar el SET de las actualizaciones parciales:
// SinCambio no agrega nada, Borrar escribe NULL y Valor bindea el dato.

pub(crate) fn set_texto<'args>(
    set: &mut Separated<'_, 'args, Postgres, &'static str>,
    columna: &str,
    parche: &'args Parche<String>,
) {
    match parche {
        Parche::SinCambio => {}
        Parche::Borrar => {
            set.push(format!("{columna} = NULL"));
        }
        Parche::Valor(v) => {
            set.push(format!("{columna} = "))
                .push_bind_unseparated(v.as_str());
        }
    }
}

pub(crate) fn set_decimal(
    set: &mut Separated<'_, '_, Postgres, &'static str>,
    columna: &str,
    parche: &Parche<Decimal>,
) {
    match parche {
        Parche::SinCambio => {}
        Parche::Borrar => {
            set.push(format!("{columna} = NULL"));
        }
        Parche::Valor(v) => {
            set.push(format!("{columna} = ")).push_bind_unseparated(*v);
        }
    }
}
