// src/handlers/renglones.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    models::renglon::{PreganadoRegistro, RenglonDatos, RenglonEdicion, RenglonNuevo, RenglonParche},
};

fn validate_cantidad(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_zero() || val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("La cantidad debe ser mayor a cero.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: alta de un renglón principal
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CrearRenglonPayload {
    #[validate(length(min = 1, message = "El número de renglón es obligatorio."))]
    pub renglon: String,

    #[validate(custom(function = "validate_cantidad"))]
    pub cantidad: Decimal,

    #[validate(length(min = 1, message = "La descripción es obligatoria."))]
    pub descripcion: String,

    #[validate(length(min = 1, message = "El código Tarot es obligatorio."))]
    pub codigo_tarot: String,

    pub descripcion_tarot: Option<String>,
}

impl CrearRenglonPayload {
    fn en_datos(self) -> RenglonDatos {
        RenglonDatos {
            renglon: self.renglon,
            cantidad: self.cantidad,
            descripcion: self.descripcion,
            codigo_tarot: self.codigo_tarot,
            descripcion_tarot: self.descripcion_tarot,
            alternativo: 0,
            laboratorio_elegido: None,
            costo_elegido: None,
            anmat: None,
            precio_vta: None,
            observaciones: None,
            margen: None,
            nombre_comercial: None,
            observaciones_internas: None,
        }
    }
}

// ---
// Payload: alta de una alternativa. Además de los campos del principal
// admite la selección de costos, que el licitador suele cargar junto con
// la alternativa.
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CrearAlternativoPayload {
    #[validate(length(min = 1, message = "El número de renglón es obligatorio."))]
    pub renglon: String,

    #[validate(custom(function = "validate_cantidad"))]
    pub cantidad: Decimal,

    #[validate(length(min = 1, message = "La descripción es obligatoria."))]
    pub descripcion: String,

    #[validate(length(min = 1, message = "El código Tarot es obligatorio."))]
    pub codigo_tarot: String,

    pub descripcion_tarot: Option<String>,

    #[validate(range(min = 1, message = "El alternativo debe ser mayor a cero."))]
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

impl CrearAlternativoPayload {
    fn en_datos(self) -> RenglonDatos {
        RenglonDatos {
            renglon: self.renglon,
            cantidad: self.cantidad,
            descripcion: self.descripcion,
            codigo_tarot: self.codigo_tarot,
            descripcion_tarot: self.descripcion_tarot,
            alternativo: self.alternativo,
            laboratorio_elegido: self.laboratorio_elegido,
            costo_elegido: self.costo_elegido,
            anmat: self.anmat,
            precio_vta: self.precio_vta,
            observaciones: self.observaciones,
            margen: self.margen,
            nombre_comercial: self.nombre_comercial,
            observaciones_internas: self.observaciones_internas,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoteRenglonesPayload {
    pub renglones: Vec<RenglonNuevo>,
}

#[derive(Debug, Deserialize)]
pub struct LoteEdicionPayload {
    pub renglones: Vec<RenglonEdicion>,
}

#[derive(Debug, Deserialize)]
pub struct PreganadosPayload {
    pub renglones: Vec<PreganadoRegistro>,
}

// ---
// Handlers
// ---

pub async fn listar(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let renglones = app_state.renglon_service.listar().await?;
    Ok((StatusCode::OK, Json(renglones)))
}

pub async fn obtener(
    State(app_state): State<AppState>,
    Path(id_renglon): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let renglon = app_state.renglon_service.buscar_por_id(id_renglon).await?;
    Ok((StatusCode::OK, Json(renglon)))
}

pub async fn listar_por_licitacion(
    State(app_state): State<AppState>,
    Path(id_licitacion): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let renglones = app_state
        .renglon_service
        .listar_por_licitacion(id_licitacion)
        .await?;
    Ok((StatusCode::OK, Json(renglones)))
}

// Búsqueda puntual por la tupla (licitación, renglón, alternativo).
pub async fn obtener_tupla(
    State(app_state): State<AppState>,
    Path((id_licitacion, nro_renglon, alternativo)): Path<(Uuid, String, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let renglon = app_state
        .renglon_service
        .buscar_tupla(id_licitacion, &nro_renglon, alternativo)
        .await?;
    Ok((StatusCode::OK, Json(renglon)))
}

pub async fn crear(
    State(app_state): State<AppState>,
    Path(id_licitacion): Path<Uuid>,
    Json(payload): Json<CrearRenglonPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let nuevo = app_state
        .renglon_service
        .crear_primario(id_licitacion, payload.en_datos())
        .await?;
    Ok((StatusCode::CREATED, Json(nuevo)))
}

pub async fn crear_alternativo(
    State(app_state): State<AppState>,
    Path(id_licitacion): Path<Uuid>,
    Json(payload): Json<CrearAlternativoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let nuevo = app_state
        .renglon_service
        .crear_alternativo(id_licitacion, payload.en_datos())
        .await?;
    Ok((StatusCode::CREATED, Json(nuevo)))
}

// Alta masiva: o entra todo el lote o no entra nada (ver services::lote).
pub async fn crear_lote(
    State(app_state): State<AppState>,
    Path(id_licitacion): Path<Uuid>,
    Json(payload): Json<LoteRenglonesPayload>,
) -> Result<impl IntoResponse, AppError> {
    let resultado = app_state
        .renglon_service
        .crear_lote(id_licitacion, payload.renglones)
        .await?;
    Ok((StatusCode::CREATED, Json(resultado)))
}

pub async fn modificar_lote(
    State(app_state): State<AppState>,
    Path(id_licitacion): Path<Uuid>,
    Json(payload): Json<LoteEdicionPayload>,
) -> Result<impl IntoResponse, AppError> {
    let resultado = app_state
        .renglon_service
        .modificar_lote(id_licitacion, payload.renglones)
        .await?;
    Ok((StatusCode::OK, Json(resultado)))
}

pub async fn marcar_preganados(
    State(app_state): State<AppState>,
    Path(id_licitacion): Path<Uuid>,
    Json(payload): Json<PreganadosPayload>,
) -> Result<impl IntoResponse, AppError> {
    let resultado = app_state
        .renglon_service
        .marcar_preganados(id_licitacion, payload.renglones)
        .await?;
    Ok((StatusCode::OK, Json(resultado)))
}

pub async fn modificar(
    State(app_state): State<AppState>,
    Path(id_renglon): Path<Uuid>,
    Json(parche): Json<RenglonParche>,
) -> Result<impl IntoResponse, AppError> {
    let actualizado = app_state
        .renglon_service
        .modificar(id_renglon, &parche)
        .await?;
    Ok((StatusCode::OK, Json(actualizado)))
}

pub async fn eliminar(
    State(app_state): State<AppState>,
    Path(id_renglon): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.renglon_service.eliminar(id_renglon).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn eliminar_por_licitacion(
    State(app_state): State<AppState>,
    Path(id_licitacion): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .renglon_service
        .eliminar_por_licitacion(id_licitacion)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
