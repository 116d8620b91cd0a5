// src/handlers/licitaciones.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::licitacion::{EstadoLicitacion, LicitacionDatos, LicitacionParche},
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CrearLicitacionPayload {
    #[validate(length(min = 1, message = "El código de cliente es obligatorio."))]
    pub cod_cliente: String,

    #[validate(length(min = 1, message = "El cliente es obligatorio."))]
    pub cliente: String,

    pub fecha: NaiveDate,

    #[validate(length(min = 1, message = "El número de licitación es obligatorio."))]
    pub nro_lic: String,

    pub tipo: Option<String>,
    pub hora: Option<String>,
    pub objeto: Option<String>,

    pub estado: EstadoLicitacion,
}

pub async fn listar(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let licitaciones = app_state.licitacion_service.listar().await?;
    Ok((StatusCode::OK, Json(licitaciones)))
}

// Solo las licitaciones en estado activo, para las pantallas de compra.
pub async fn listar_activas(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let licitaciones = app_state.licitacion_service.listar_activas().await?;
    Ok((StatusCode::OK, Json(licitaciones)))
}

pub async fn obtener(
    State(app_state): State<AppState>,
    Path(id_licitacion): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detalle = app_state.licitacion_service.detalle(id_licitacion).await?;
    Ok((StatusCode::OK, Json(detalle)))
}

pub async fn crear(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearLicitacionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let nueva = app_state
        .licitacion_service
        .crear(LicitacionDatos {
            cod_cliente: payload.cod_cliente,
            cliente: payload.cliente,
            fecha: payload.fecha,
            nro_lic: payload.nro_lic,
            tipo: payload.tipo,
            hora: payload.hora,
            objeto: payload.objeto,
            estado: payload.estado,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(nueva)))
}

pub async fn modificar(
    State(app_state): State<AppState>,
    Path(id_licitacion): Path<Uuid>,
    Json(parche): Json<LicitacionParche>,
) -> Result<impl IntoResponse, AppError> {
    let actualizada = app_state
        .licitacion_service
        .modificar(id_licitacion, &parche)
        .await?;
    Ok((StatusCode::OK, Json(actualizada)))
}

pub async fn eliminar(
    State(app_state): State<AppState>,
    Path(id_licitacion): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.licitacion_service.eliminar(id_licitacion).await?;
    Ok(StatusCode::NO_CONTENT)
}
