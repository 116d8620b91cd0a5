// src/models/licitacion.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::common::parche::Parche;
use crate::models::{compra::CompraVista, renglon::Renglon};

/// Estado de una licitación. En la base es una etiqueta de texto libre;
/// acá la cerramos en un enum: solo "EN CURSO" y "COTIZADO" habilitan los
/// circuitos de compra, cualquier otra etiqueta (ANULADA, DESIERTA, etc.)
/// se conserva tal cual en `Otro`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EstadoLicitacion {
    EnCurso,
    Cotizado,
    Otro(String),
}

/// Etiquetas que habilitan los circuitos de compra, en el orden en que se
/// bindean en las consultas.
pub const ESTADOS_ACTIVOS: [&str; 2] = ["EN CURSO", "COTIZADO"];

impl EstadoLicitacion {
    pub fn es_activa(&self) -> bool {
        matches!(self, EstadoLicitacion::EnCurso | EstadoLicitacion::Cotizado)
    }

    pub fn como_texto(&self) -> &str {
        match self {
            EstadoLicitacion::EnCurso => "EN CURSO",
            EstadoLicitacion::Cotizado => "COTIZADO",
            EstadoLicitacion::Otro(etiqueta) => etiqueta,
        }
    }
}

impl From<String> for EstadoLicitacion {
    fn from(etiqueta: String) -> Self {
        match etiqueta.as_str() {
            "EN CURSO" => EstadoLicitacion::EnCurso,
            "COTIZADO" => EstadoLicitacion::Cotizado,
            _ => EstadoLicitacion::Otro(etiqueta),
        }
    }
}

impl std::fmt::Display for EstadoLicitacion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.como_texto())
    }
}

impl Serialize for EstadoLicitacion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.como_texto())
    }
}

impl<'de> Deserialize<'de> for EstadoLicitacion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(EstadoLicitacion::from(String::deserialize(deserializer)?))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Licitacion {
    pub id: Uuid,
    pub cod_cliente: String,
    pub cliente: String,
    pub fecha: NaiveDate,
    pub nro_lic: String,
    pub tipo: Option<String>,
    pub hora: Option<String>,
    pub objeto: Option<String>,
    #[sqlx(try_from = "String")]
    pub estado: EstadoLicitacion,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: DateTime<Utc>,
}

/// Licitación con sus renglones y cotizaciones, tal como la consume la
/// pantalla de detalle.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicitacionDetalle {
    #[serde(flatten)]
    pub licitacion: Licitacion,
    pub renglones: Vec<Renglon>,
    pub cotizaciones: Vec<CompraVista>,
}

/// Datos ya validados para dar de alta una licitación.
#[derive(Debug, Clone)]
pub struct LicitacionDatos {
    pub cod_cliente: String,
    pub cliente: String,
    pub fecha: NaiveDate,
    pub nro_lic: String,
    pub tipo: Option<String>,
    pub hora: Option<String>,
    pub objeto: Option<String>,
    pub estado: EstadoLicitacion,
}

/// Actualización parcial de una licitación. Los campos obligatorios solo
/// admiten reemplazo; los opcionales distinguen borrar de no tocar.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LicitacionParche {
    pub cod_cliente: Option<String>,
    pub cliente: Option<String>,
    pub fecha: Option<NaiveDate>,
    pub nro_lic: Option<String>,
    pub tipo: Parche<String>,
    pub hora: Parche<String>,
    pub objeto: Parche<String>,
    pub estado: Option<EstadoLicitacion>,
}

impl LicitacionParche {
    pub fn es_vacio(&self) -> bool {
        self.cod_cliente.is_none()
            && self.cliente.is_none()
            && self.fecha.is_none()
            && self.nro_lic.is_none()
            && !self.tipo.es_cambio()
            && !self.hora.es_cambio()
            && !self.objeto.es_cambio()
            && self.estado.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estados_reconocidos() {
        assert_eq!(
            EstadoLicitacion::from("EN CURSO".to_string()),
            EstadoLicitacion::EnCurso
        );
        assert_eq!(
            EstadoLicitacion::from("COTIZADO".to_string()),
            EstadoLicitacion::Cotizado
        );
    }

    #[test]
    fn etiqueta_desconocida_se_conserva() {
        let estado = EstadoLicitacion::from("ANULADA".to_string());
        assert_eq!(estado, EstadoLicitacion::Otro("ANULADA".to_string()));
        assert_eq!(estado.como_texto(), "ANULADA");
    }

    #[test]
    fn solo_en_curso_y_cotizado_son_activas() {
        assert!(EstadoLicitacion::EnCurso.es_activa());
        assert!(EstadoLicitacion::Cotizado.es_activa());
        assert!(!EstadoLicitacion::Otro("ANULADA".to_string()).es_activa());
        // "en curso" en minúsculas no es la etiqueta reconocida
        assert!(!EstadoLicitacion::from("en curso".to_string()).es_activa());
    }

    #[test]
    fn serializa_como_etiqueta_plana() {
        let json = serde_json::to_string(&EstadoLicitacion::EnCurso).unwrap();
        assert_eq!(json, r#""EN CURSO""#);
        let vuelta: EstadoLicitacion = serde_json::from_str(&json).unwrap();
        assert_eq!(vuelta, EstadoLicitacion::EnCurso);
    }
}
