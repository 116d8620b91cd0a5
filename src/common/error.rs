use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// El tipo de error de toda la aplicación, con `thiserror` para mejor ergonomía.
// Cada variante se traduce a una respuesta `{kind, detail}` en IntoResponse.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("faltan campos obligatorios: {0}")]
    CamposFaltantes(String),

    #[error("error de validación")]
    Validacion(#[from] validator::ValidationErrors),

    // Rechazo de un lote completo: ningún registro se persiste si hay
    // incompletos o repetidos. Las listas llevan las etiquetas de los
    // registros ofensores para que el cliente pueda corregirlos.
    #[error("el lote contiene registros incompletos o repetidos")]
    LoteRechazado {
        incompletos: Vec<String>,
        duplicados: Vec<String>,
    },

    #[error("{0} no encontrado")]
    ReferenciaInexistente(&'static str),

    #[error("el código {0} no existe en el catálogo")]
    CatalogoNoResuelto(String),

    #[error("ya existe un registro con esa clave: {0}")]
    Conflicto(String),

    // Variante para errores de base de datos
    #[error("error de base de datos")]
    BaseDatos(#[from] sqlx::Error),

    // Variante genérica para cualquier otro error inesperado
    #[error("error interno del servidor")]
    Interno(#[from] anyhow::Error),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::CamposFaltantes(_) => "campos_faltantes",
            AppError::Validacion(_) => "validacion",
            AppError::LoteRechazado { .. } => "lote_rechazado",
            AppError::ReferenciaInexistente(_) => "referencia_inexistente",
            AppError::CatalogoNoResuelto(_) => "catalogo_no_resuelto",
            AppError::Conflicto(_) => "conflicto",
            AppError::BaseDatos(_) => "base_datos",
            AppError::Interno(_) => "interno",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::CamposFaltantes(_)
            | AppError::Validacion(_)
            | AppError::LoteRechazado { .. } => StatusCode::BAD_REQUEST,
            AppError::ReferenciaInexistente(_) | AppError::CatalogoNoResuelto(_) => {
                StatusCode::NOT_FOUND
            }
            AppError::Conflicto(_) => StatusCode::CONFLICT,
            AppError::BaseDatos(_) | AppError::Interno(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            // Devolvemos todos los detalles de la validación, campo por campo.
            AppError::Validacion(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                json!({
                    "kind": self.kind(),
                    "detail": "uno o más campos son inválidos",
                    "campos": details,
                })
            }
            AppError::LoteRechazado {
                incompletos,
                duplicados,
            } => json!({
                "kind": self.kind(),
                "detail": self.to_string(),
                "incompletos": incompletos,
                "duplicados": duplicados,
            }),
            // Los errores de infraestructura van al log, nunca al cliente.
            AppError::BaseDatos(_) | AppError::Interno(_) => {
                tracing::error!("error interno: {:?}", self);
                json!({
                    "kind": self.kind(),
                    "detail": "ocurrió un error inesperado",
                })
            }
            _ => json!({
                "kind": self.kind(),
                "detail": self.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}
