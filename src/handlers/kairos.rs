// src/handlers/kairos.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::kairos::{KairosDatos, KairosEdicion, KairosNuevo, KairosParche},
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CrearKairosPayload {
    #[validate(length(min = 1, message = "El laboratorio es obligatorio."))]
    pub laboratorio: String,

    pub nombre_comercial: Option<String>,
    pub droga_presentacion: Option<String>,
    pub anmat: Option<String>,
    pub cod_tarot: Option<String>,
    pub cod_kairos: Option<String>,
    pub cod_tango: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListaAgregarPayload {
    pub productos: Vec<KairosNuevo>,
}

#[derive(Debug, Deserialize)]
pub struct ListaModificarPayload {
    pub productos: Vec<KairosEdicion>,
}

pub async fn listar(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let productos = app_state.kairos_service.listar().await?;
    Ok((StatusCode::OK, Json(productos)))
}

pub async fn obtener(
    State(app_state): State<AppState>,
    Path(id_kairos): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let producto = app_state.kairos_service.buscar_por_id(id_kairos).await?;
    Ok((StatusCode::OK, Json(producto)))
}

pub async fn por_cod_tarot(
    State(app_state): State<AppState>,
    Path(cod_tarot): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let productos = app_state
        .kairos_service
        .listar_por_cod_tarot(&cod_tarot)
        .await?;
    Ok((StatusCode::OK, Json(productos)))
}

pub async fn por_cod_kairos(
    State(app_state): State<AppState>,
    Path(cod_kairos): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let productos = app_state
        .kairos_service
        .listar_por_cod_kairos(&cod_kairos)
        .await?;
    Ok((StatusCode::OK, Json(productos)))
}

pub async fn por_anmat(
    State(app_state): State<AppState>,
    Path(cod_anmat): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let productos = app_state.kairos_service.listar_por_anmat(&cod_anmat).await?;
    Ok((StatusCode::OK, Json(productos)))
}

pub async fn por_cod_tango(
    State(app_state): State<AppState>,
    Path(cod_tango): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let productos = app_state
        .kairos_service
        .listar_por_cod_tango(&cod_tango)
        .await?;
    Ok((StatusCode::OK, Json(productos)))
}

pub async fn por_laboratorio(
    State(app_state): State<AppState>,
    Path(laboratorio): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let productos = app_state
        .kairos_service
        .listar_por_laboratorio(&laboratorio)
        .await?;
    Ok((StatusCode::OK, Json(productos)))
}

pub async fn por_droga(
    State(app_state): State<AppState>,
    Path(droga): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let productos = app_state.kairos_service.listar_por_droga(&droga).await?;
    Ok((StatusCode::OK, Json(productos)))
}

pub async fn agregar(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearKairosPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let nuevo = app_state
        .kairos_service
        .agregar(KairosDatos {
            laboratorio: payload.laboratorio,
            nombre_comercial: payload.nombre_comercial,
            droga_presentacion: payload.droga_presentacion,
            anmat: payload.anmat,
            cod_tarot: payload.cod_tarot,
            cod_kairos: payload.cod_kairos,
            cod_tango: payload.cod_tango,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(nuevo)))
}

pub async fn agregar_lista(
    State(app_state): State<AppState>,
    Json(payload): Json<ListaAgregarPayload>,
) -> Result<impl IntoResponse, AppError> {
    let resultado = app_state.kairos_service.agregar_lista(payload.productos).await?;
    Ok((StatusCode::CREATED, Json(resultado)))
}

pub async fn modificar_lista(
    State(app_state): State<AppState>,
    Json(payload): Json<ListaModificarPayload>,
) -> Result<impl IntoResponse, AppError> {
    let resultado = app_state
        .kairos_service
        .modificar_lista(payload.productos)
        .await?;
    Ok((StatusCode::OK, Json(resultado)))
}

pub async fn modificar(
    State(app_state): State<AppState>,
    Path(id_kairos): Path<Uuid>,
    Json(parche): Json<KairosParche>,
) -> Result<impl IntoResponse, AppError> {
    let actualizado = app_state
        .kairos_service
        .modificar(id_kairos, &parche)
        .await?;
    Ok((StatusCode::OK, Json(actualizado)))
}

pub async fn eliminar(
    State(app_state): State<AppState>,
    Path(id_kairos): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.kairos_service.eliminar(id_kairos).await?;
    Ok(StatusCode::NO_CONTENT)
}
