// src/models/usuario.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Referencia de identidad: la autenticación vive afuera, acá solo se exige
/// que el id exista para estampar las compras y mostrar quién cotizó.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: Uuid,
    pub user_name: String,
    pub nombre: String,
    pub creado_en: DateTime<Utc>,
}
