// src/handlers/reales.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::real::{RealDatos, RealParche},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrearRealPayload {
    pub id_renglon: Uuid,
    pub cantidad_real: Option<Decimal>,
    pub costo_real: Option<Decimal>,
    pub precio_real: Option<Decimal>,
    pub laboratorio_real: Option<String>,
}

pub async fn listar(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let reales = app_state.real_service.listar().await?;
    Ok((StatusCode::OK, Json(reales)))
}

pub async fn listar_por_licitacion(
    State(app_state): State<AppState>,
    Path(id_licitacion): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let reales = app_state
        .real_service
        .listar_por_licitacion(id_licitacion)
        .await?;
    Ok((StatusCode::OK, Json(reales)))
}

pub async fn listar_por_renglon(
    State(app_state): State<AppState>,
    Path(id_renglon): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let reales = app_state.real_service.listar_por_renglon(id_renglon).await?;
    Ok((StatusCode::OK, Json(reales)))
}

pub async fn agregar(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearRealPayload>,
) -> Result<impl IntoResponse, AppError> {
    let nuevo = app_state
        .real_service
        .agregar(RealDatos {
            id_renglon: payload.id_renglon,
            cantidad_real: payload.cantidad_real,
            costo_real: payload.costo_real,
            precio_real: payload.precio_real,
            laboratorio_real: payload.laboratorio_real,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(nuevo)))
}

pub async fn modificar(
    State(app_state): State<AppState>,
    Path(id_real): Path<Uuid>,
    Json(parche): Json<RealParche>,
) -> Result<impl IntoResponse, AppError> {
    let actualizado = app_state.real_service.modificar(id_real, &parche).await?;
    Ok((StatusCode::OK, Json(actualizado)))
}

pub async fn eliminar(
    State(app_state): State<AppState>,
    Path(id_real): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.real_service.eliminar(id_real).await?;
    Ok(StatusCode::NO_CONTENT)
}
