// src/models/renglon.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::common::parche::Parche;

/// Un renglón de licitación. `alternativo` = 0 es el renglón principal;
/// un valor mayor identifica una alternativa que compite por el mismo
/// número de renglón. La tupla (id_licitacion, renglon, alternativo) es
/// única.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Renglon {
    pub id: Uuid,
    pub id_licitacion: Uuid,
    pub renglon: String,
    pub cantidad: Decimal,
    pub descripcion: String,
    pub codigo_tarot: String,
    pub descripcion_tarot: Option<String>,
    pub laboratorio_elegido: Option<String>,
    pub costo_elegido: Option<Decimal>,
    pub anmat: Option<String>,
    pub precio_vta: Option<Decimal>,
    pub preganado: bool,
    pub mes_estimado_entrega: Option<String>,
    pub margen: Option<Decimal>,
    pub observaciones: Option<String>,
    pub observaciones_internas: Option<String>,
    pub nombre_comercial: Option<String>,
    pub alternativo: i32,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: DateTime<Utc>,
}

/// Datos ya validados para insertar un renglón.
#[derive(Debug, Clone)]
pub struct RenglonDatos {
    pub renglon: String,
    pub cantidad: Decimal,
    pub descripcion: String,
    pub codigo_tarot: String,
    pub descripcion_tarot: Option<String>,
    pub alternativo: i32,
    pub laboratorio_elegido: Option<String>,
    pub costo_elegido: Option<Decimal>,
    pub anmat: Option<String>,
    pub precio_vta: Option<Decimal>,
    pub observaciones: Option<String>,
    pub margen: Option<Decimal>,
    pub nombre_comercial: Option<String>,
    pub observaciones_internas: Option<String>,
}

/// Registro de un lote de altas de renglones. Todos los campos obligatorios
/// vienen como `Option` para que el clasificador pueda derivar los registros
/// incompletos en lugar de rebotar el JSON entero.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenglonNuevo {
    pub renglon: Option<String>,
    pub cantidad: Option<Decimal>,
    pub descripcion: Option<String>,
    pub codigo_tarot: Option<String>,
    pub descripcion_tarot: Option<String>,
    #[serde(default)]
    pub alternativo: i32,
    pub laboratorio_elegido: Option<String>,
    pub costo_elegido: Option<Decimal>,
    pub anmat: Option<String>,
    pub precio_vta: Option<Decimal>,
    pub observaciones: Option<String>,
    pub margen: Option<Decimal>,
    pub nombre_comercial: Option<String>,
    pub observaciones_internas: Option<String>,
}

impl RenglonNuevo {
    /// Conversión al registro de inserción; `None` si falta algún campo
    /// obligatorio (el clasificador ya debería haberlo descartado).
    pub fn como_datos(&self) -> Option<RenglonDatos> {
        Some(RenglonDatos {
            renglon: self.renglon.clone()?,
            cantidad: self.cantidad?,
            descripcion: self.descripcion.clone()?,
            codigo_tarot: self.codigo_tarot.clone()?,
            descripcion_tarot: self.descripcion_tarot.clone(),
            alternativo: self.alternativo,
            laboratorio_elegido: self.laboratorio_elegido.clone(),
            costo_elegido: self.costo_elegido,
            anmat: self.anmat.clone(),
            precio_vta: self.precio_vta,
            observaciones: self.observaciones.clone(),
            margen: self.margen,
            nombre_comercial: self.nombre_comercial.clone(),
            observaciones_internas: self.observaciones_internas.clone(),
        })
    }
}

/// Actualización parcial de un renglón. Los campos que en la base son
/// NOT NULL solo admiten reemplazo (`Option`); los anulables usan `Parche`
/// para distinguir borrar de no tocar.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenglonParche {
    pub renglon: Option<String>,
    pub cantidad: Option<Decimal>,
    pub descripcion: Option<String>,
    pub codigo_tarot: Option<String>,
    pub alternativo: Option<i32>,
    pub preganado: Option<bool>,
    pub descripcion_tarot: Parche<String>,
    pub laboratorio_elegido: Parche<String>,
    pub costo_elegido: Parche<Decimal>,
    pub anmat: Parche<String>,
    pub precio_vta: Parche<Decimal>,
    pub mes_estimado_entrega: Parche<String>,
    pub margen: Parche<Decimal>,
    pub observaciones: Parche<String>,
    pub observaciones_internas: Parche<String>,
    pub nombre_comercial: Parche<String>,
}

impl RenglonParche {
    pub fn es_vacio(&self) -> bool {
        self.renglon.is_none()
            && self.cantidad.is_none()
            && self.descripcion.is_none()
            && self.codigo_tarot.is_none()
            && self.alternativo.is_none()
            && self.preganado.is_none()
            && !self.descripcion_tarot.es_cambio()
            && !self.laboratorio_elegido.es_cambio()
            && !self.costo_elegido.es_cambio()
            && !self.anmat.es_cambio()
            && !self.precio_vta.es_cambio()
            && !self.mes_estimado_entrega.es_cambio()
            && !self.margen.es_cambio()
            && !self.observaciones.es_cambio()
            && !self.observaciones_internas.es_cambio()
            && !self.nombre_comercial.es_cambio()
    }
}

/// Registro de un lote de modificaciones: la identidad del renglón más los
/// cambios a aplicar.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenglonEdicion {
    pub id_renglon: Option<Uuid>,
    #[serde(flatten)]
    pub cambios: RenglonParche,
}

/// Registro del circuito de preganados: marca el renglón como pre-adjudicado
/// y deja asentado el mes estimado de entrega.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreganadoRegistro {
    pub id_renglon: Uuid,
    #[serde(default)]
    pub preganado: bool,
    pub mes_estimado_entrega: Option<String>,
}
