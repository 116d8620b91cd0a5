// src/models/real.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::common::parche::Parche;

/// Valores realizados de un renglón: lo que efectivamente se entregó y a qué
/// costo/precio. Puede haber cero o varios por renglón; son datos de análisis
/// posterior, no intervienen en la cotización.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Real {
    pub id: Uuid,
    pub id_renglon: Uuid,
    pub cantidad_real: Option<Decimal>,
    pub costo_real: Option<Decimal>,
    pub precio_real: Option<Decimal>,
    pub laboratorio_real: Option<String>,
    pub creado_en: DateTime<Utc>,
}

/// Real junto con su renglón, como lo consumen los comparativos.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RealVista {
    pub id_renglon: Uuid,
    pub id_licitacion: Uuid,
    pub renglon: String,
    pub cantidad: Decimal,
    pub descripcion: String,
    pub codigo_tarot: String,
    pub laboratorio_elegido: Option<String>,
    pub costo_elegido: Option<Decimal>,
    pub precio_vta: Option<Decimal>,
    pub preganado: bool,
    pub alternativo: i32,
    pub id_real: Option<Uuid>,
    pub cantidad_real: Option<Decimal>,
    pub costo_real: Option<Decimal>,
    pub precio_real: Option<Decimal>,
    pub laboratorio_real: Option<String>,
}

/// Datos para dar de alta un real.
#[derive(Debug, Clone)]
pub struct RealDatos {
    pub id_renglon: Uuid,
    pub cantidad_real: Option<Decimal>,
    pub costo_real: Option<Decimal>,
    pub precio_real: Option<Decimal>,
    pub laboratorio_real: Option<String>,
}

/// Actualización parcial de un real.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RealParche {
    pub id_renglon: Option<Uuid>,
    pub cantidad_real: Parche<Decimal>,
    pub costo_real: Parche<Decimal>,
    pub precio_real: Parche<Decimal>,
    pub laboratorio_real: Parche<String>,
}

impl RealParche {
    pub fn es_vacio(&self) -> bool {
        self.id_renglon.is_none()
            && !self.cantidad_real.es_cambio()
            && !self.costo_real.es_cambio()
            && !self.precio_real.es_cambio()
            && !self.laboratorio_real.es_cambio()
    }
}
