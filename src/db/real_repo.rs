// src/db/real_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{set_decimal, set_texto},
    models::real::{Real, RealDatos, RealParche, RealVista},
};

const SELECT_VISTA: &str = r#"
SELECT
    ren.id AS id_renglon, ren.id_licitacion, ren.renglon, ren.cantidad, ren.descripcion,
    ren.codigo_tarot, ren.laboratorio_elegido, ren.costo_elegido, ren.precio_vta,
    ren.preganado, ren.alternativo,
    rea.id AS id_real, rea.cantidad_real, rea.costo_real, rea.precio_real, rea.laboratorio_real
FROM renglones ren
"#;

#[derive(Clone)]
pub struct RealRepository {
    pool: PgPool,
}

impl RealRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Listado para los comparativos: todos los renglones, con sus reales si
    // los tienen (LEFT JOIN, puede haber renglones sin real).
    pub async fn listar(&self) -> Result<Vec<RealVista>, AppError> {
        let consulta = format!(
            "{SELECT_VISTA} LEFT JOIN reales rea ON ren.id = rea.id_renglon \
             ORDER BY CAST(ren.renglon AS INTEGER) ASC, rea.id"
        );
        let filas = sqlx::query_as::<_, RealVista>(&consulta)
            .fetch_all(&self.pool)
            .await?;
        Ok(filas)
    }

    pub async fn listar_por_licitacion(
        &self,
        id_licitacion: Uuid,
    ) -> Result<Vec<RealVista>, AppError> {
        let consulta = format!(
            "{SELECT_VISTA} LEFT JOIN reales rea ON ren.id = rea.id_renglon \
             WHERE ren.id_licitacion = $1 \
             ORDER BY CAST(ren.renglon AS INTEGER) ASC, rea.id"
        );
        let filas = sqlx::query_as::<_, RealVista>(&consulta)
            .bind(id_licitacion)
            .fetch_all(&self.pool)
            .await?;
        Ok(filas)
    }

    pub async fn listar_por_renglon(&self, id_renglon: Uuid) -> Result<Vec<RealVista>, AppError> {
        let consulta = format!(
            "{SELECT_VISTA} JOIN reales rea ON ren.id = rea.id_renglon \
             WHERE ren.id = $1 ORDER BY rea.id"
        );
        let filas = sqlx::query_as::<_, RealVista>(&consulta)
            .bind(id_renglon)
            .fetch_all(&self.pool)
            .await?;
        Ok(filas)
    }

    pub async fn buscar_por_id(&self, id_real: Uuid) -> Result<Option<Real>, AppError> {
        let real = sqlx::query_as::<_, Real>("SELECT * FROM reales WHERE id = $1")
            .bind(id_real)
            .fetch_optional(&self.pool)
            .await?;
        Ok(real)
    }

    pub async fn insertar(&self, datos: &RealDatos) -> Result<Real, AppError> {
        let real = sqlx::query_as::<_, Real>(
            r#"
            INSERT INTO reales
                (id_renglon, cantidad_real, costo_real, precio_real, laboratorio_real)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(datos.id_renglon)
        .bind(datos.cantidad_real)
        .bind(datos.costo_real)
        .bind(datos.precio_real)
        .bind(&datos.laboratorio_real)
        .fetch_one(&self.pool)
        .await?;
        Ok(real)
    }

    pub async fn modificar(&self, id_real: Uuid, parche: &RealParche) -> Result<Real, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE reales SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(v) = parche.id_renglon {
                set.push("id_renglon = ").push_bind_unseparated(v);
            }
            set_decimal(&mut set, "cantidad_real", &parche.cantidad_real);
            set_decimal(&mut set, "costo_real", &parche.costo_real);
            set_decimal(&mut set, "precio_real", &parche.precio_real);
            set_texto(&mut set, "laboratorio_real", &parche.laboratorio_real);
        }
        qb.push(" WHERE id = ").push_bind(id_real);
        qb.push(" RETURNING *");

        let real = qb.build_query_as::<Real>().fetch_one(&self.pool).await?;
        Ok(real)
    }

    pub async fn eliminar(&self, id_real: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM reales WHERE id = $1")
            .bind(id_real)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
