// src/services/lote.rs
//
// Clasificación pura de lotes: antes de escribir nada, cada lote de
// renglones o compras se parte en {aceptados, incompletos, duplicados}.
// La política es todo-o-nada: con un solo registro incompleto o repetido
// se rechaza el lote entero y no se persiste ninguno.

use std::collections::HashSet;

use serde::Serialize;

use crate::common::error::AppError;
use crate::common::orden::cmp_renglon;
use crate::models::compra::CompraNueva;
use crate::models::kairos::{KairosEdicion, KairosNuevo};
use crate::models::renglon::{RenglonEdicion, RenglonNuevo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModoLote {
    Alta,
    Edicion,
}

/// Un registro que puede viajar dentro de un lote.
pub trait RegistroDeLote {
    /// ¿Están presentes todos los campos obligatorios para este modo?
    fn esta_completo(&self, modo: ModoLote) -> bool;

    /// Clave con la que se detectan repetidos dentro del lote. `None` si no
    /// puede calcularse (el registro se trata como incompleto).
    fn clave(&self, modo: ModoLote) -> Option<String>;

    /// Etiqueta con la que se informa el registro al rechazar el lote.
    fn etiqueta(&self) -> String;
}

#[derive(Debug)]
pub struct Clasificacion<T> {
    pub aceptados: Vec<T>,
    pub incompletos: Vec<T>,
    pub duplicados: Vec<T>,
}

impl<T: RegistroDeLote> Clasificacion<T> {
    pub fn tiene_rechazos(&self) -> bool {
        !self.incompletos.is_empty() || !self.duplicados.is_empty()
    }

    /// Aplica la política todo-o-nada: si hay rechazos devuelve el error de
    /// lote con las etiquetas de los ofensores, en orden numérico de renglón
    /// para que el cliente las corrija de corrido; si no, los aceptados.
    pub fn exigir_valida(self) -> Result<Vec<T>, AppError> {
        if self.tiene_rechazos() {
            let mut incompletos: Vec<String> =
                self.incompletos.iter().map(|r| r.etiqueta()).collect();
            let mut duplicados: Vec<String> =
                self.duplicados.iter().map(|r| r.etiqueta()).collect();
            incompletos.sort_by(|a, b| cmp_renglon(a, b));
            duplicados.sort_by(|a, b| cmp_renglon(a, b));
            return Err(AppError::LoteRechazado {
                incompletos,
                duplicados,
            });
        }
        Ok(self.aceptados)
    }
}

/// Clasifica un lote. La incompletitud se evalúa antes que la repetición:
/// un registro al que le faltan campos va a `incompletos` aunque además
/// repita clave. Ante claves repetidas gana la primera aparición.
pub fn clasificar<T: RegistroDeLote>(registros: Vec<T>, modo: ModoLote) -> Clasificacion<T> {
    let mut clasificacion = Clasificacion {
        aceptados: Vec::new(),
        incompletos: Vec::new(),
        duplicados: Vec::new(),
    };
    let mut vistas: HashSet<String> = HashSet::new();

    for registro in registros {
        if !registro.esta_completo(modo) {
            clasificacion.incompletos.push(registro);
            continue;
        }
        match registro.clave(modo) {
            Some(clave) => {
                if vistas.insert(clave) {
                    clasificacion.aceptados.push(registro);
                } else {
                    clasificacion.duplicados.push(registro);
                }
            }
            None => clasificacion.incompletos.push(registro),
        }
    }

    clasificacion
}

fn texto_presente(campo: &Option<String>) -> bool {
    campo.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl RegistroDeLote for RenglonNuevo {
    fn esta_completo(&self, _modo: ModoLote) -> bool {
        texto_presente(&self.renglon)
            && self.cantidad.is_some_and(|c| !c.is_zero())
            && texto_presente(&self.descripcion)
            && texto_presente(&self.codigo_tarot)
    }

    // En un alta la clave es el número de renglón: un principal y una
    // alternativa del mismo número no pueden venir en el mismo lote.
    fn clave(&self, _modo: ModoLote) -> Option<String> {
        self.renglon.clone()
    }

    fn etiqueta(&self) -> String {
        self.renglon
            .clone()
            .unwrap_or_else(|| "(sin renglón)".to_string())
    }
}

impl RegistroDeLote for RenglonEdicion {
    fn esta_completo(&self, _modo: ModoLote) -> bool {
        self.id_renglon.is_some()
            && texto_presente(&self.cambios.renglon)
            && self.cambios.cantidad.is_some_and(|c| !c.is_zero())
            && texto_presente(&self.cambios.descripcion)
            && texto_presente(&self.cambios.codigo_tarot)
    }

    // En una edición cada registro se identifica por el id del renglón.
    fn clave(&self, _modo: ModoLote) -> Option<String> {
        self.id_renglon.map(|id| id.to_string())
    }

    fn etiqueta(&self) -> String {
        match (&self.cambios.renglon, self.id_renglon) {
            (Some(renglon), _) => renglon.clone(),
            (None, Some(id)) => id.to_string(),
            (None, None) => "(sin renglón)".to_string(),
        }
    }
}

impl RegistroDeLote for CompraNueva {
    fn esta_completo(&self, _modo: ModoLote) -> bool {
        self.id_renglon.is_some()
            && self.id_licitacion.is_some()
            && self.id_kairos.is_some()
            && self.costo_final.is_some()
            && texto_presente(&self.cod_tarot)
            && self.id_usuario.is_some()
            && self.fechora.is_some()
    }

    // Una sola compra por renglón por lote.
    fn clave(&self, _modo: ModoLote) -> Option<String> {
        self.id_renglon.map(|id| id.to_string())
    }

    fn etiqueta(&self) -> String {
        self.id_renglon
            .map(|id| id.to_string())
            .unwrap_or_else(|| "(sin renglón)".to_string())
    }
}

impl RegistroDeLote for KairosNuevo {
    fn esta_completo(&self, _modo: ModoLote) -> bool {
        texto_presente(&self.laboratorio)
    }

    // El catálogo no tiene clave natural dentro del lote: se dedup-ea por
    // código Tarot solo cuando viene informado.
    fn clave(&self, _modo: ModoLote) -> Option<String> {
        match &self.cod_tarot {
            Some(cod) if !cod.trim().is_empty() => Some(cod.clone()),
            _ => self.laboratorio.as_ref().map(|lab| {
                format!(
                    "{lab}|{}",
                    self.droga_presentacion.clone().unwrap_or_default()
                )
            }),
        }
    }

    fn etiqueta(&self) -> String {
        self.cod_tarot
            .clone()
            .or_else(|| self.laboratorio.clone())
            .unwrap_or_else(|| "(sin laboratorio)".to_string())
    }
}

impl RegistroDeLote for KairosEdicion {
    fn esta_completo(&self, _modo: ModoLote) -> bool {
        self.id_kairos.is_some() && !self.cambios.es_vacio()
    }

    fn clave(&self, _modo: ModoLote) -> Option<String> {
        self.id_kairos.map(|id| id.to_string())
    }

    fn etiqueta(&self) -> String {
        self.id_kairos
            .map(|id| id.to_string())
            .unwrap_or_else(|| "(sin id)".to_string())
    }
}

/// Resultado por registro de un alta masiva. El fan-out no es transaccional:
/// los registros que fallan después de la clasificación quedan asentados acá
/// y no revierten a los ya escritos.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FalloRegistro {
    pub etiqueta: String,
    pub motivo: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultadoAlta<T> {
    pub creados: Vec<T>,
    pub fallidos: Vec<FalloRegistro>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultadoEdicion<T> {
    pub actualizados: Vec<T>,
    pub fallidos: Vec<FalloRegistro>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn renglon_nuevo(renglon: &str) -> RenglonNuevo {
        serde_json::from_value(serde_json::json!({
            "renglon": renglon,
            "cantidad": 5,
            "descripcion": "X",
            "codigoTarot": "A1",
        }))
        .unwrap()
    }

    #[test]
    fn lote_limpio_se_acepta_entero() {
        let lote = vec![renglon_nuevo("1"), renglon_nuevo("2")];
        let c = clasificar(lote, ModoLote::Alta);
        assert_eq!(c.aceptados.len(), 2);
        assert!(c.incompletos.is_empty());
        assert!(c.duplicados.is_empty());
        assert!(!c.tiene_rechazos());
    }

    #[test]
    fn renglon_repetido_va_a_duplicados_y_gana_la_primera_aparicion() {
        let mut segundo = renglon_nuevo("1");
        segundo.descripcion = Some("otra".to_string());
        let c = clasificar(vec![renglon_nuevo("1"), segundo], ModoLote::Alta);
        assert_eq!(c.aceptados.len(), 1);
        assert_eq!(c.aceptados[0].descripcion.as_deref(), Some("X"));
        assert_eq!(c.duplicados.len(), 1);
        assert_eq!(c.duplicados[0].descripcion.as_deref(), Some("otra"));
    }

    #[test]
    fn lote_con_duplicados_se_rechaza_entero() {
        let c = clasificar(vec![renglon_nuevo("1"), renglon_nuevo("1")], ModoLote::Alta);
        let err = c.exigir_valida().unwrap_err();
        match err {
            AppError::LoteRechazado {
                incompletos,
                duplicados,
            } => {
                assert!(incompletos.is_empty());
                assert_eq!(duplicados, vec!["1".to_string()]);
            }
            otro => panic!("se esperaba LoteRechazado, vino {otro:?}"),
        }
    }

    #[test]
    fn incompleto_antes_que_duplicado() {
        // El tercero repite el renglón "1" pero además no trae cantidad:
        // debe clasificarse como incompleto, no como duplicado.
        let mut tercero = renglon_nuevo("1");
        tercero.cantidad = None;
        let lote = vec![renglon_nuevo("1"), renglon_nuevo("2"), tercero];
        let c = clasificar(lote, ModoLote::Alta);
        assert_eq!(c.aceptados.len(), 2);
        assert_eq!(c.incompletos.len(), 1);
        assert!(c.duplicados.is_empty());
    }

    #[test]
    fn cantidad_cero_es_incompleto() {
        let mut r = renglon_nuevo("1");
        r.cantidad = Some(Decimal::ZERO);
        let c = clasificar(vec![r], ModoLote::Alta);
        assert_eq!(c.incompletos.len(), 1);
    }

    #[test]
    fn edicion_dedup_por_id_no_por_numero() {
        // Dos ediciones con el mismo número de renglón pero distinto id son
        // válidas (p. ej. principal y alternativa del mismo número).
        let base = serde_json::json!({
            "renglon": "1",
            "cantidad": 5,
            "descripcion": "X",
            "codigoTarot": "A1",
        });
        let mut a: RenglonEdicion = serde_json::from_value(base.clone()).unwrap();
        let mut b: RenglonEdicion = serde_json::from_value(base).unwrap();
        a.id_renglon = Some(Uuid::new_v4());
        b.id_renglon = Some(Uuid::new_v4());
        let c = clasificar(vec![a, b], ModoLote::Edicion);
        assert_eq!(c.aceptados.len(), 2);

        // Y el mismo id dos veces sí es repetido.
        let id = Uuid::new_v4();
        let base = serde_json::json!({
            "renglon": "1",
            "cantidad": 5,
            "descripcion": "X",
            "codigoTarot": "A1",
        });
        let mut a: RenglonEdicion = serde_json::from_value(base.clone()).unwrap();
        let mut b: RenglonEdicion = serde_json::from_value(base).unwrap();
        a.id_renglon = Some(id);
        b.id_renglon = Some(id);
        let c = clasificar(vec![a, b], ModoLote::Edicion);
        assert_eq!(c.aceptados.len(), 1);
        assert_eq!(c.duplicados.len(), 1);
    }

    #[test]
    fn edicion_sin_id_es_incompleta() {
        let sin_id: RenglonEdicion = serde_json::from_value(serde_json::json!({
            "renglon": "1",
            "cantidad": 5,
            "descripcion": "X",
            "codigoTarot": "A1",
        }))
        .unwrap();
        let c = clasificar(vec![sin_id], ModoLote::Edicion);
        assert_eq!(c.incompletos.len(), 1);
    }

    fn compra_nueva(id_renglon: Uuid) -> CompraNueva {
        CompraNueva {
            id_renglon: Some(id_renglon),
            id_licitacion: Some(Uuid::new_v4()),
            id_kairos: Some(Uuid::new_v4()),
            costo_final: Some(Decimal::new(12345, 2)),
            mantenimiento: Some("30 días".to_string()),
            observaciones: None,
            cod_tarot: Some("00042".to_string()),
            id_usuario: Some(Uuid::new_v4()),
            fechora: Some(chrono::Utc::now()),
        }
    }

    #[test]
    fn compras_dedup_por_renglon() {
        let id = Uuid::new_v4();
        let c = clasificar(vec![compra_nueva(id), compra_nueva(id)], ModoLote::Alta);
        assert_eq!(c.aceptados.len(), 1);
        assert_eq!(c.duplicados.len(), 1);
    }

    #[test]
    fn compra_sin_fechora_es_incompleta() {
        let mut compra = compra_nueva(Uuid::new_v4());
        compra.fechora = None;
        let c = clasificar(vec![compra], ModoLote::Alta);
        assert_eq!(c.incompletos.len(), 1);
        assert!(c.exigir_valida().is_err());
    }
}
