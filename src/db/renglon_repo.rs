// src/db/renglon_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{set_decimal, set_texto},
    models::renglon::{Renglon, RenglonDatos, RenglonParche},
};

#[derive(Clone)]
pub struct RenglonRepository {
    pool: PgPool,
}

impl RenglonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Los listados van siempre en orden numérico de renglón: "10" después
    // de "9", no entre "1" y "2".
    pub async fn listar(&self) -> Result<Vec<Renglon>, AppError> {
        let renglones = sqlx::query_as::<_, Renglon>(
            "SELECT * FROM renglones ORDER BY CAST(renglon AS INTEGER) ASC, alternativo ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(renglones)
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<Renglon>, AppError> {
        let renglon = sqlx::query_as::<_, Renglon>("SELECT * FROM renglones WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(renglon)
    }

    pub async fn listar_por_licitacion(
        &self,
        id_licitacion: Uuid,
    ) -> Result<Vec<Renglon>, AppError> {
        let renglones = sqlx::query_as::<_, Renglon>(
            r#"
            SELECT * FROM renglones
            WHERE id_licitacion = $1
            ORDER BY CAST(renglon AS INTEGER) ASC, alternativo ASC
            "#,
        )
        .bind(id_licitacion)
        .fetch_all(&self.pool)
        .await?;
        Ok(renglones)
    }

    pub async fn buscar_tupla(
        &self,
        id_licitacion: Uuid,
        renglon: &str,
        alternativo: i32,
    ) -> Result<Option<Renglon>, AppError> {
        let fila = sqlx::query_as::<_, Renglon>(
            "SELECT * FROM renglones WHERE id_licitacion = $1 AND renglon = $2 AND alternativo = $3",
        )
        .bind(id_licitacion)
        .bind(renglon)
        .bind(alternativo)
        .fetch_optional(&self.pool)
        .await?;
        Ok(fila)
    }

    pub async fn insertar(
        &self,
        id_licitacion: Uuid,
        datos: &RenglonDatos,
    ) -> Result<Renglon, AppError> {
        sqlx::query_as::<_, Renglon>(
            r#"
            INSERT INTO renglones
                (id_licitacion, renglon, cantidad, descripcion, codigo_tarot, descripcion_tarot,
                 alternativo, laboratorio_elegido, costo_elegido, anmat, precio_vta,
                 observaciones, margen, nombre_comercial, observaciones_internas)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(id_licitacion)
        .bind(&datos.renglon)
        .bind(datos.cantidad)
        .bind(&datos.descripcion)
        .bind(&datos.codigo_tarot)
        .bind(&datos.descripcion_tarot)
        .bind(datos.alternativo)
        .bind(&datos.laboratorio_elegido)
        .bind(datos.costo_elegido)
        .bind(&datos.anmat)
        .bind(datos.precio_vta)
        .bind(&datos.observaciones)
        .bind(datos.margen)
        .bind(&datos.nombre_comercial)
        .bind(&datos.observaciones_internas)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // La restricción única respalda la verificación previa ante
            // escrituras concurrentes.
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflicto(format!(
                        "renglón {} alternativo {}",
                        datos.renglon, datos.alternativo
                    ));
                }
            }
            e.into()
        })
    }

    pub async fn modificar(
        &self,
        id_renglon: Uuid,
        parche: &RenglonParche,
    ) -> Result<Renglon, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE renglones SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(v) = &parche.renglon {
                set.push("renglon = ").push_bind_unseparated(v.as_str());
            }
            if let Some(v) = parche.cantidad {
                set.push("cantidad = ").push_bind_unseparated(v);
            }
            if let Some(v) = &parche.descripcion {
                set.push("descripcion = ").push_bind_unseparated(v.as_str());
            }
            if let Some(v) = &parche.codigo_tarot {
                set.push("codigo_tarot = ").push_bind_unseparated(v.as_str());
            }
            if let Some(v) = parche.alternativo {
                set.push("alternativo = ").push_bind_unseparated(v);
            }
            if let Some(v) = parche.preganado {
                set.push("preganado = ").push_bind_unseparated(v);
            }
            set_texto(&mut set, "descripcion_tarot", &parche.descripcion_tarot);
            set_texto(&mut set, "laboratorio_elegido", &parche.laboratorio_elegido);
            set_decimal(&mut set, "costo_elegido", &parche.costo_elegido);
            set_texto(&mut set, "anmat", &parche.anmat);
            set_decimal(&mut set, "precio_vta", &parche.precio_vta);
            set_texto(
                &mut set,
                "mes_estimado_entrega",
                &parche.mes_estimado_entrega,
            );
            set_decimal(&mut set, "margen", &parche.margen);
            set_texto(&mut set, "observaciones", &parche.observaciones);
            set_texto(
                &mut set,
                "observaciones_internas",
                &parche.observaciones_internas,
            );
            set_texto(&mut set, "nombre_comercial", &parche.nombre_comercial);
            set.push("actualizado_en = now()");
        }
        qb.push(" WHERE id = ").push_bind(id_renglon);
        qb.push(" RETURNING *");

        qb.build_query_as::<Renglon>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return AppError::Conflicto("renglón ya existe en la licitación".into());
                    }
                }
                e.into()
            })
    }

    pub async fn marcar_preganado(
        &self,
        id_renglon: Uuid,
        preganado: bool,
        mes_estimado_entrega: Option<&str>,
    ) -> Result<Renglon, AppError> {
        let renglon = sqlx::query_as::<_, Renglon>(
            r#"
            UPDATE renglones
            SET preganado = $2, mes_estimado_entrega = $3, actualizado_en = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id_renglon)
        .bind(preganado)
        .bind(mes_estimado_entrega)
        .fetch_one(&self.pool)
        .await?;
        Ok(renglon)
    }

    // La baja arrastra compras y reales del renglón en la misma transacción.
    pub async fn eliminar(&self, id_renglon: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM compras WHERE id_renglon = $1")
            .bind(id_renglon)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM reales WHERE id_renglon = $1")
            .bind(id_renglon)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM renglones WHERE id = $1")
            .bind(id_renglon)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn eliminar_por_licitacion(&self, id_licitacion: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM compras WHERE id_licitacion = $1")
            .bind(id_licitacion)
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            "DELETE FROM reales WHERE id_renglon IN (SELECT id FROM renglones WHERE id_licitacion = $1)",
        )
        .bind(id_licitacion)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM renglones WHERE id_licitacion = $1")
            .bind(id_licitacion)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
