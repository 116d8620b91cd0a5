// src/handlers/compras.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::compra::{CompraAlta, CompraNueva, CompraParche, FiltroListaKairos},
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CrearCompraPayload {
    pub id_renglon: Uuid,
    pub id_licitacion: Uuid,

    // El producto se referencia por código, no por id: la resolución contra
    // el catálogo la hace el servicio.
    #[validate(length(min = 1, message = "El código Tarot es obligatorio."))]
    pub cod_tarot: String,

    pub costo_final: Decimal,
    pub mantenimiento: Option<String>,
    pub observaciones: Option<String>,
    pub id_usuario: Uuid,
    pub fechora: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoteComprasPayload {
    pub id_usuario: Uuid,
    pub compras: Vec<CompraNueva>,
}

#[derive(Debug, Deserialize)]
pub struct FiltrosPayload {
    pub filtros: Option<FiltroListaKairos>,
}

pub async fn listar(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let compras = app_state.compra_service.listar().await?;
    Ok((StatusCode::OK, Json(compras)))
}

pub async fn obtener(
    State(app_state): State<AppState>,
    Path(id_compra): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let compra = app_state.compra_service.buscar_por_id(id_compra).await?;
    Ok((StatusCode::OK, Json(compra)))
}

pub async fn listar_por_licitacion(
    State(app_state): State<AppState>,
    Path(id_licitacion): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let compras = app_state
        .compra_service
        .listar_por_licitacion(id_licitacion)
        .await?;
    Ok((StatusCode::OK, Json(compras)))
}

// Circuito de cotización completo, sin filtros.
pub async fn lista_kairos(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let filas = app_state
        .compra_service
        .lista_kairos(&FiltroListaKairos::default())
        .await?;
    Ok((StatusCode::OK, Json(filas)))
}

// Misma vista con filtros en el cuerpo.
pub async fn lista_kairos_filtrada(
    State(app_state): State<AppState>,
    Json(payload): Json<FiltrosPayload>,
) -> Result<impl IntoResponse, AppError> {
    let filtro = payload.filtros.unwrap_or_default();
    let filas = app_state.compra_service.lista_kairos(&filtro).await?;
    Ok((StatusCode::OK, Json(filas)))
}

pub async fn renglones_no_asociados(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let filas = app_state.compra_service.renglones_no_asociados().await?;
    Ok((StatusCode::OK, Json(filas)))
}

pub async fn historial_completo(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let filas = app_state.compra_service.historial_completo().await?;
    Ok((StatusCode::OK, Json(filas)))
}

pub async fn historial_por_licitacion(
    State(app_state): State<AppState>,
    Path(id_licitacion): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let filas = app_state
        .compra_service
        .historial_por_licitacion(id_licitacion)
        .await?;
    Ok((StatusCode::OK, Json(filas)))
}

pub async fn historial_por_cod_tarot(
    State(app_state): State<AppState>,
    Path(cod_tarot): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let filas = app_state
        .compra_service
        .historial_por_cod_tarot(&cod_tarot)
        .await?;
    Ok((StatusCode::OK, Json(filas)))
}

pub async fn crear(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearCompraPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let nueva = app_state
        .compra_service
        .crear(CompraAlta {
            id_renglon: payload.id_renglon,
            id_licitacion: payload.id_licitacion,
            cod_tarot: payload.cod_tarot,
            costo_final: payload.costo_final,
            mantenimiento: payload.mantenimiento,
            observaciones: payload.observaciones,
            id_usuario: payload.id_usuario,
            fechora: payload.fechora,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(nueva)))
}

pub async fn crear_lote(
    State(app_state): State<AppState>,
    Path(id_licitacion): Path<Uuid>,
    Json(payload): Json<LoteComprasPayload>,
) -> Result<impl IntoResponse, AppError> {
    let resultado = app_state
        .compra_service
        .crear_lote(id_licitacion, payload.id_usuario, payload.compras)
        .await?;
    Ok((StatusCode::CREATED, Json(resultado)))
}

pub async fn modificar(
    State(app_state): State<AppState>,
    Path(id_compra): Path<Uuid>,
    Json(parche): Json<CompraParche>,
) -> Result<impl IntoResponse, AppError> {
    let actualizada = app_state
        .compra_service
        .modificar(id_compra, &parche)
        .await?;
    Ok((StatusCode::OK, Json(actualizada)))
}

pub async fn eliminar(
    State(app_state): State<AppState>,
    Path(id_compra): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.compra_service.eliminar(id_compra).await?;
    Ok(StatusCode::NO_CONTENT)
}
