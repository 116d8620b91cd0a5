// src/models/kairos.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::common::parche::Parche;

/// Entrada del catálogo Kairos. Los códigos externos (`cod_tarot`,
/// `cod_kairos`, `cod_tango`) son texto: pueden traer ceros a la izquierda
/// y se comparan siempre como cadenas.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BaseKairos {
    pub id: Uuid,
    pub laboratorio: String,
    pub nombre_comercial: Option<String>,
    pub droga_presentacion: Option<String>,
    pub anmat: Option<String>,
    pub cod_tarot: Option<String>,
    pub cod_kairos: Option<String>,
    pub cod_tango: Option<String>,
    pub creado_en: DateTime<Utc>,
}

/// Datos ya validados para dar de alta un producto del catálogo.
#[derive(Debug, Clone)]
pub struct KairosDatos {
    pub laboratorio: String,
    pub nombre_comercial: Option<String>,
    pub droga_presentacion: Option<String>,
    pub anmat: Option<String>,
    pub cod_tarot: Option<String>,
    pub cod_kairos: Option<String>,
    pub cod_tango: Option<String>,
}

/// Registro de un lote de altas de catálogo (importación desde planilla).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KairosNuevo {
    pub laboratorio: Option<String>,
    pub nombre_comercial: Option<String>,
    pub droga_presentacion: Option<String>,
    pub anmat: Option<String>,
    pub cod_tarot: Option<String>,
    pub cod_kairos: Option<String>,
    pub cod_tango: Option<String>,
}

impl KairosNuevo {
    pub fn como_datos(&self) -> Option<KairosDatos> {
        Some(KairosDatos {
            laboratorio: self.laboratorio.clone()?,
            nombre_comercial: self.nombre_comercial.clone(),
            droga_presentacion: self.droga_presentacion.clone(),
            anmat: self.anmat.clone(),
            cod_tarot: self.cod_tarot.clone(),
            cod_kairos: self.cod_kairos.clone(),
            cod_tango: self.cod_tango.clone(),
        })
    }
}

/// Actualización parcial de un producto del catálogo.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KairosParche {
    pub laboratorio: Option<String>,
    pub nombre_comercial: Parche<String>,
    pub droga_presentacion: Parche<String>,
    pub anmat: Parche<String>,
    pub cod_tarot: Parche<String>,
    pub cod_kairos: Parche<String>,
    pub cod_tango: Parche<String>,
}

impl KairosParche {
    pub fn es_vacio(&self) -> bool {
        self.laboratorio.is_none()
            && !self.nombre_comercial.es_cambio()
            && !self.droga_presentacion.es_cambio()
            && !self.anmat.es_cambio()
            && !self.cod_tarot.es_cambio()
            && !self.cod_kairos.es_cambio()
            && !self.cod_tango.es_cambio()
    }
}

/// Registro de un lote de modificaciones de catálogo.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KairosEdicion {
    pub id_kairos: Option<Uuid>,
    #[serde(flatten)]
    pub cambios: KairosParche,
}
