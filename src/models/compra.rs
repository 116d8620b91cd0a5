// src/models/compra.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::common::parche::Parche;
use crate::models::licitacion::EstadoLicitacion;

/// Una cotización de compra contra el catálogo. `cod_tarot` es una copia del
/// código al momento de cotizar: el historial se consulta por ese texto y
/// sobrevive a cambios posteriores del renglón.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Compra {
    pub id: Uuid,
    pub id_renglon: Uuid,
    pub id_licitacion: Uuid,
    pub id_kairos: Uuid,
    pub costo_final: Decimal,
    pub mantenimiento: Option<String>,
    pub observaciones: Option<String>,
    pub cod_tarot: String,
    pub id_usuario: Uuid,
    pub fechora: DateTime<Utc>,
    pub creado_en: DateTime<Utc>,
}

/// Alta individual de una compra: el producto no viene por id, se resuelve
/// por código contra el catálogo al momento de crear.
#[derive(Debug, Clone)]
pub struct CompraAlta {
    pub id_renglon: Uuid,
    pub id_licitacion: Uuid,
    pub cod_tarot: String,
    pub costo_final: Decimal,
    pub mantenimiento: Option<String>,
    pub observaciones: Option<String>,
    pub id_usuario: Uuid,
    pub fechora: DateTime<Utc>,
}

/// Datos ya validados para insertar una compra.
#[derive(Debug, Clone)]
pub struct CompraDatos {
    pub id_renglon: Uuid,
    pub id_licitacion: Uuid,
    pub id_kairos: Uuid,
    pub costo_final: Decimal,
    pub mantenimiento: Option<String>,
    pub observaciones: Option<String>,
    pub cod_tarot: String,
    pub id_usuario: Uuid,
    pub fechora: DateTime<Utc>,
}

/// Registro de un lote de altas de compras. Obligatorios como `Option` para
/// que el clasificador derive los incompletos.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompraNueva {
    pub id_renglon: Option<Uuid>,
    pub id_licitacion: Option<Uuid>,
    pub id_kairos: Option<Uuid>,
    pub costo_final: Option<Decimal>,
    pub mantenimiento: Option<String>,
    pub observaciones: Option<String>,
    pub cod_tarot: Option<String>,
    pub id_usuario: Option<Uuid>,
    pub fechora: Option<DateTime<Utc>>,
}

impl CompraNueva {
    pub fn como_datos(&self) -> Option<CompraDatos> {
        Some(CompraDatos {
            id_renglon: self.id_renglon?,
            id_licitacion: self.id_licitacion?,
            id_kairos: self.id_kairos?,
            costo_final: self.costo_final?,
            mantenimiento: self.mantenimiento.clone(),
            observaciones: self.observaciones.clone(),
            cod_tarot: self.cod_tarot.clone()?,
            id_usuario: self.id_usuario?,
            fechora: self.fechora?,
        })
    }
}

/// Actualización parcial de una compra.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompraParche {
    pub id_renglon: Option<Uuid>,
    pub id_kairos: Option<Uuid>,
    pub costo_final: Option<Decimal>,
    pub cod_tarot: Option<String>,
    pub fechora: Option<DateTime<Utc>>,
    pub mantenimiento: Parche<String>,
    pub observaciones: Parche<String>,
}

impl CompraParche {
    pub fn es_vacio(&self) -> bool {
        self.id_renglon.is_none()
            && self.id_kairos.is_none()
            && self.costo_final.is_none()
            && self.cod_tarot.is_none()
            && self.fechora.is_none()
            && !self.mantenimiento.es_cambio()
            && !self.observaciones.es_cambio()
    }
}

/// Compra con su renglón, producto del catálogo y usuario, tal como la
/// consumen las pantallas de cotización.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CompraVista {
    pub id_compra: Uuid,
    pub id_licitacion: Option<Uuid>,
    pub id_renglon: Option<Uuid>,
    pub renglon: Option<String>,
    pub cantidad: Option<Decimal>,
    pub descripcion: Option<String>,
    pub costo_final: Decimal,
    pub mantenimiento: Option<String>,
    pub observaciones: Option<String>,
    pub fechora: DateTime<Utc>,
    pub anmat: Option<String>,
    pub nombre_comercial: Option<String>,
    pub droga_presentacion: Option<String>,
    pub laboratorio: String,
    pub id_kairos: Uuid,
    pub modificado_por: String,
}

/// Fila del circuito de cotización: cada renglón de una licitación activa
/// cruzado con el catálogo por código y, si ya fue cotizado contra ese
/// producto, con su compra y el usuario que la cargó.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ListaKairosFila {
    pub id_licitacion: Uuid,
    pub cliente: String,
    pub fecha: NaiveDate,
    pub nro_lic: String,
    #[sqlx(try_from = "String")]
    pub estado: EstadoLicitacion,
    pub id_renglon: Uuid,
    pub renglon: String,
    pub cantidad: Decimal,
    pub descripcion: String,
    pub codigo_tarot: String,
    pub id_kairos: Uuid,
    pub laboratorio: String,
    pub nombre_comercial: Option<String>,
    pub droga_presentacion: Option<String>,
    pub anmat: Option<String>,
    pub costo_final: Option<Decimal>,
    pub mantenimiento: Option<String>,
    pub observaciones: Option<String>,
    pub id_usuario: Option<Uuid>,
    pub id_compra: Option<Uuid>,
    pub fechora: Option<DateTime<Utc>>,
    pub nombre_usuario: Option<String>,
}

/// Filtros admitidos sobre el circuito de cotización. Es un conjunto cerrado:
/// cada filtro se bindea como parámetro, nunca se interpola texto del cliente
/// en la consulta.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FiltroListaKairos {
    pub id_licitacion: Option<Uuid>,
    pub nro_lic: Option<String>,
    pub cod_tarot: Option<String>,
    pub laboratorio: Option<String>,
}

/// Renglón de una licitación activa cuyo código no existe en el catálogo.
/// Se listan para que carga de datos los corrija.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RenglonNoAsociado {
    pub id_licitacion: Uuid,
    pub cliente: String,
    pub fecha: NaiveDate,
    pub nro_lic: String,
    #[sqlx(try_from = "String")]
    pub estado: EstadoLicitacion,
    pub id_renglon: Uuid,
    pub renglon: String,
    pub cantidad: Decimal,
    pub descripcion: String,
    pub codigo_tarot: String,
    pub descripcion_tarot: Option<String>,
}

/// Fila del historial de cotizaciones. Las consultas por código devuelven
/// las columnas de renglón en NULL.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HistorialFila {
    pub id_compra: Uuid,
    pub id_renglon: Option<Uuid>,
    pub renglon: Option<String>,
    pub descripcion: Option<String>,
    pub droga_presentacion: Option<String>,
    pub laboratorio: Option<String>,
    pub costo_final: Decimal,
    pub mantenimiento: Option<String>,
    pub observaciones: Option<String>,
    pub nombre_usuario: String,
    pub fechora: DateTime<Utc>,
}
