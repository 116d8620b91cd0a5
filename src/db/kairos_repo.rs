// src/db/kairos_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::set_texto,
    models::kairos::{BaseKairos, KairosDatos, KairosParche},
};

#[derive(Clone)]
pub struct KairosRepository {
    pool: PgPool,
}

impl KairosRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self) -> Result<Vec<BaseKairos>, AppError> {
        let productos =
            sqlx::query_as::<_, BaseKairos>("SELECT * FROM base_kairos ORDER BY laboratorio ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(productos)
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<BaseKairos>, AppError> {
        let producto = sqlx::query_as::<_, BaseKairos>("SELECT * FROM base_kairos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(producto)
    }

    // El código Tarot se compara como texto exacto: "0042" y "42" son
    // códigos distintos.
    pub async fn resolver_cod_tarot(&self, cod_tarot: &str) -> Result<Option<BaseKairos>, AppError> {
        let producto = sqlx::query_as::<_, BaseKairos>(
            "SELECT * FROM base_kairos WHERE cod_tarot = $1 LIMIT 1",
        )
        .bind(cod_tarot)
        .fetch_optional(&self.pool)
        .await?;
        Ok(producto)
    }

    pub async fn listar_por_cod_tarot(&self, cod_tarot: &str) -> Result<Vec<BaseKairos>, AppError> {
        let productos =
            sqlx::query_as::<_, BaseKairos>("SELECT * FROM base_kairos WHERE cod_tarot = $1")
                .bind(cod_tarot)
                .fetch_all(&self.pool)
                .await?;
        Ok(productos)
    }

    pub async fn listar_por_cod_kairos(
        &self,
        cod_kairos: &str,
    ) -> Result<Vec<BaseKairos>, AppError> {
        let productos =
            sqlx::query_as::<_, BaseKairos>("SELECT * FROM base_kairos WHERE cod_kairos = $1")
                .bind(cod_kairos)
                .fetch_all(&self.pool)
                .await?;
        Ok(productos)
    }

    pub async fn listar_por_anmat(&self, anmat: &str) -> Result<Vec<BaseKairos>, AppError> {
        let productos = sqlx::query_as::<_, BaseKairos>("SELECT * FROM base_kairos WHERE anmat = $1")
            .bind(anmat)
            .fetch_all(&self.pool)
            .await?;
        Ok(productos)
    }

    pub async fn listar_por_cod_tango(&self, cod_tango: &str) -> Result<Vec<BaseKairos>, AppError> {
        let productos =
            sqlx::query_as::<_, BaseKairos>("SELECT * FROM base_kairos WHERE cod_tango LIKE $1")
                .bind(format!("%{cod_tango}%"))
                .fetch_all(&self.pool)
                .await?;
        Ok(productos)
    }

    pub async fn listar_por_laboratorio(
        &self,
        laboratorio: &str,
    ) -> Result<Vec<BaseKairos>, AppError> {
        let productos =
            sqlx::query_as::<_, BaseKairos>("SELECT * FROM base_kairos WHERE laboratorio ILIKE $1")
                .bind(format!("%{laboratorio}%"))
                .fetch_all(&self.pool)
                .await?;
        Ok(productos)
    }

    pub async fn listar_por_droga(&self, droga: &str) -> Result<Vec<BaseKairos>, AppError> {
        let productos = sqlx::query_as::<_, BaseKairos>(
            "SELECT * FROM base_kairos WHERE droga_presentacion ILIKE $1",
        )
        .bind(format!("%{droga}%"))
        .fetch_all(&self.pool)
        .await?;
        Ok(productos)
    }

    pub async fn insertar(&self, datos: &KairosDatos) -> Result<BaseKairos, AppError> {
        let producto = sqlx::query_as::<_, BaseKairos>(
            r#"
            INSERT INTO base_kairos
                (laboratorio, nombre_comercial, droga_presentacion, anmat, cod_tarot, cod_kairos, cod_tango)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&datos.laboratorio)
        .bind(&datos.nombre_comercial)
        .bind(&datos.droga_presentacion)
        .bind(&datos.anmat)
        .bind(&datos.cod_tarot)
        .bind(&datos.cod_kairos)
        .bind(&datos.cod_tango)
        .fetch_one(&self.pool)
        .await?;
        Ok(producto)
    }

    pub async fn modificar(
        &self,
        id: Uuid,
        parche: &KairosParche,
    ) -> Result<BaseKairos, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE base_kairos SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(v) = &parche.laboratorio {
                set.push("laboratorio = ").push_bind_unseparated(v.as_str());
            }
            set_texto(&mut set, "nombre_comercial", &parche.nombre_comercial);
            set_texto(&mut set, "droga_presentacion", &parche.droga_presentacion);
            set_texto(&mut set, "anmat", &parche.anmat);
            set_texto(&mut set, "cod_tarot", &parche.cod_tarot);
            set_texto(&mut set, "cod_kairos", &parche.cod_kairos);
            set_texto(&mut set, "cod_tango", &parche.cod_tango);
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        let producto = qb
            .build_query_as::<BaseKairos>()
            .fetch_one(&self.pool)
            .await?;
        Ok(producto)
    }

    pub async fn eliminar(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM base_kairos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
