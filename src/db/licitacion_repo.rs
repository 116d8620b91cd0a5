// src/db/licitacion_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::set_texto,
    models::licitacion::{ESTADOS_ACTIVOS, Licitacion, LicitacionDatos, LicitacionParche},
};

#[derive(Clone)]
pub struct LicitacionRepository {
    pool: PgPool,
}

impl LicitacionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self) -> Result<Vec<Licitacion>, AppError> {
        let licitaciones =
            sqlx::query_as::<_, Licitacion>("SELECT * FROM licitaciones ORDER BY fecha DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(licitaciones)
    }

    // Solo las licitaciones en estado activo, que son las que alimentan las
    // pantallas de compra.
    pub async fn listar_activas(&self) -> Result<Vec<Licitacion>, AppError> {
        let licitaciones = sqlx::query_as::<_, Licitacion>(
            "SELECT * FROM licitaciones WHERE estado = $1 OR estado = $2 ORDER BY fecha DESC",
        )
        .bind(ESTADOS_ACTIVOS[0])
        .bind(ESTADOS_ACTIVOS[1])
        .fetch_all(&self.pool)
        .await?;
        Ok(licitaciones)
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<Licitacion>, AppError> {
        let licitacion = sqlx::query_as::<_, Licitacion>("SELECT * FROM licitaciones WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(licitacion)
    }

    pub async fn insertar(&self, datos: &LicitacionDatos) -> Result<Licitacion, AppError> {
        let licitacion = sqlx::query_as::<_, Licitacion>(
            r#"
            INSERT INTO licitaciones
                (cod_cliente, cliente, fecha, nro_lic, tipo, hora, objeto, estado)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&datos.cod_cliente)
        .bind(&datos.cliente)
        .bind(datos.fecha)
        .bind(&datos.nro_lic)
        .bind(&datos.tipo)
        .bind(&datos.hora)
        .bind(&datos.objeto)
        .bind(datos.estado.como_texto())
        .fetch_one(&self.pool)
        .await?;
        Ok(licitacion)
    }

    pub async fn modificar(
        &self,
        id: Uuid,
        parche: &LicitacionParche,
    ) -> Result<Licitacion, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE licitaciones SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(v) = &parche.cod_cliente {
                set.push("cod_cliente = ").push_bind_unseparated(v.as_str());
            }
            if let Some(v) = &parche.cliente {
                set.push("cliente = ").push_bind_unseparated(v.as_str());
            }
            if let Some(v) = parche.fecha {
                set.push("fecha = ").push_bind_unseparated(v);
            }
            if let Some(v) = &parche.nro_lic {
                set.push("nro_lic = ").push_bind_unseparated(v.as_str());
            }
            set_texto(&mut set, "tipo", &parche.tipo);
            set_texto(&mut set, "hora", &parche.hora);
            set_texto(&mut set, "objeto", &parche.objeto);
            if let Some(v) = &parche.estado {
                set.push("estado = ").push_bind_unseparated(v.como_texto());
            }
            set.push("actualizado_en = now()");
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        let licitacion = qb
            .build_query_as::<Licitacion>()
            .fetch_one(&self.pool)
            .await?;
        Ok(licitacion)
    }

    // Baja de la licitación con todo lo que cuelga de ella, en una sola
    // transacción: compras y reales de sus renglones, los renglones y por
    // último la licitación.
    pub async fn eliminar(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM compras WHERE id_licitacion = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            "DELETE FROM reales WHERE id_renglon IN (SELECT id FROM renglones WHERE id_licitacion = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM renglones WHERE id_licitacion = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM licitaciones WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
