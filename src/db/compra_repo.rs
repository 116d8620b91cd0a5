// src/db/compra_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::set_texto,
    models::compra::{
        Compra, CompraDatos, CompraParche, CompraVista, FiltroListaKairos, HistorialFila,
        ListaKairosFila, RenglonNoAsociado,
    },
    models::licitacion::ESTADOS_ACTIVOS,
};

// Vista base de una compra con renglón, producto y usuario. El join al
// renglón es LEFT y pide alternativo = 0: una compra sobre una alternativa
// vuelve con las columnas de renglón en NULL, como siempre lo mostró la
// pantalla.
const SELECT_VISTA: &str = r#"
SELECT
    comp.id AS id_compra, reng.id_licitacion, reng.id AS id_renglon, reng.renglon,
    reng.cantidad, reng.descripcion,
    comp.costo_final, comp.mantenimiento, comp.observaciones, comp.fechora,
    ktc.anmat, ktc.nombre_comercial, ktc.droga_presentacion, ktc.laboratorio,
    ktc.id AS id_kairos,
    us.nombre AS modificado_por
FROM compras comp
LEFT JOIN renglones reng ON reng.id = comp.id_renglon AND reng.alternativo = 0
JOIN base_kairos ktc ON ktc.id = comp.id_kairos
JOIN usuarios us ON us.id = comp.id_usuario
"#;

#[derive(Clone)]
pub struct CompraRepository {
    pool: PgPool,
}

impl CompraRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self) -> Result<Vec<CompraVista>, AppError> {
        let consulta = format!("{SELECT_VISTA} ORDER BY CAST(reng.renglon AS INTEGER) ASC");
        let compras = sqlx::query_as::<_, CompraVista>(&consulta)
            .fetch_all(&self.pool)
            .await?;
        Ok(compras)
    }

    pub async fn buscar_por_id(&self, id_compra: Uuid) -> Result<Option<CompraVista>, AppError> {
        let consulta = format!("{SELECT_VISTA} WHERE comp.id = $1");
        let compra = sqlx::query_as::<_, CompraVista>(&consulta)
            .bind(id_compra)
            .fetch_optional(&self.pool)
            .await?;
        Ok(compra)
    }

    pub async fn listar_por_licitacion(
        &self,
        id_licitacion: Uuid,
    ) -> Result<Vec<CompraVista>, AppError> {
        let consulta = format!(
            "{SELECT_VISTA} WHERE comp.id_licitacion = $1 ORDER BY CAST(reng.renglon AS INTEGER) ASC"
        );
        let compras = sqlx::query_as::<_, CompraVista>(&consulta)
            .bind(id_licitacion)
            .fetch_all(&self.pool)
            .await?;
        Ok(compras)
    }

    // Fila cruda de la compra, sin joins; la usan los parches y las bajas.
    pub async fn buscar_fila(&self, id_compra: Uuid) -> Result<Option<Compra>, AppError> {
        let compra = sqlx::query_as::<_, Compra>("SELECT * FROM compras WHERE id = $1")
            .bind(id_compra)
            .fetch_optional(&self.pool)
            .await?;
        Ok(compra)
    }

    /// Circuito de cotización: renglones principales de licitaciones activas
    /// cruzados con el catálogo por código, con su compra si ya fue cotizado
    /// contra ese producto. Los filtros son un conjunto cerrado y se bindean.
    pub async fn lista_kairos(
        &self,
        filtro: &FiltroListaKairos,
    ) -> Result<Vec<ListaKairosFila>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
SELECT
    l.id AS id_licitacion, l.cliente, l.fecha, l.nro_lic, l.estado,
    r.id AS id_renglon, r.renglon, r.cantidad, r.descripcion, r.codigo_tarot,
    b.id AS id_kairos, b.laboratorio, b.nombre_comercial, b.droga_presentacion, b.anmat,
    tc.costo_final, tc.mantenimiento, tc.observaciones, tc.id_usuario,
    tc.id AS id_compra, tc.fechora,
    us.nombre AS nombre_usuario
FROM renglones r
JOIN licitaciones l ON r.id_licitacion = l.id AND r.alternativo = 0
JOIN base_kairos b ON r.codigo_tarot = b.cod_tarot
LEFT JOIN compras tc ON tc.id_renglon = r.id AND tc.id_kairos = b.id
LEFT JOIN usuarios us ON us.id = tc.id_usuario
WHERE (l.estado = "#,
        );
        qb.push_bind(ESTADOS_ACTIVOS[0]);
        qb.push(" OR l.estado = ");
        qb.push_bind(ESTADOS_ACTIVOS[1]);
        qb.push(")");

        if let Some(id_licitacion) = filtro.id_licitacion {
            qb.push(" AND l.id = ").push_bind(id_licitacion);
        }
        if let Some(nro_lic) = &filtro.nro_lic {
            qb.push(" AND l.nro_lic LIKE ")
                .push_bind(format!("%{nro_lic}%"));
        }
        if let Some(cod_tarot) = &filtro.cod_tarot {
            qb.push(" AND r.codigo_tarot = ").push_bind(cod_tarot.as_str());
        }
        if let Some(laboratorio) = &filtro.laboratorio {
            qb.push(" AND b.laboratorio ILIKE ")
                .push_bind(format!("%{laboratorio}%"));
        }

        qb.push(" ORDER BY l.nro_lic, CAST(r.renglon AS INTEGER)");

        let filas = qb
            .build_query_as::<ListaKairosFila>()
            .fetch_all(&self.pool)
            .await?;
        Ok(filas)
    }

    /// Renglones de licitaciones activas cuyo código no resuelve a ningún
    /// producto del catálogo.
    pub async fn renglones_no_asociados(&self) -> Result<Vec<RenglonNoAsociado>, AppError> {
        let filas = sqlx::query_as::<_, RenglonNoAsociado>(
            r#"
SELECT
    l.id AS id_licitacion, l.cliente, l.fecha, l.nro_lic, l.estado,
    r.id AS id_renglon, r.renglon, r.cantidad, r.descripcion,
    r.codigo_tarot, r.descripcion_tarot
FROM renglones r
JOIN licitaciones l ON r.id_licitacion = l.id AND r.alternativo = 0
LEFT JOIN base_kairos b ON b.cod_tarot = r.codigo_tarot
WHERE (l.estado = $1 OR l.estado = $2) AND b.id IS NULL
ORDER BY l.nro_lic, CAST(r.renglon AS INTEGER)
            "#,
        )
        .bind(ESTADOS_ACTIVOS[0])
        .bind(ESTADOS_ACTIVOS[1])
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }

    // El historial se cuelga del código guardado en la compra, no del id del
    // renglón: así sobrevive a ediciones posteriores del renglón.
    pub async fn historial_por_licitacion(
        &self,
        id_licitacion: Uuid,
    ) -> Result<Vec<HistorialFila>, AppError> {
        let filas = sqlx::query_as::<_, HistorialFila>(
            r#"
SELECT
    comp.id AS id_compra, ren.id AS id_renglon, ren.renglon, ren.descripcion,
    ktc.droga_presentacion, ktc.laboratorio,
    comp.costo_final, comp.mantenimiento, comp.observaciones,
    us.nombre AS nombre_usuario, comp.fechora
FROM compras comp
JOIN usuarios us ON us.id = comp.id_usuario
LEFT JOIN base_kairos ktc ON ktc.id = comp.id_kairos
LEFT JOIN renglones ren ON ren.codigo_tarot = comp.cod_tarot
WHERE ren.id_licitacion = $1
ORDER BY CAST(ren.renglon AS INTEGER) ASC, comp.fechora DESC
            "#,
        )
        .bind(id_licitacion)
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }

    pub async fn historial_por_cod_tarot(
        &self,
        cod_tarot: &str,
    ) -> Result<Vec<HistorialFila>, AppError> {
        let filas = sqlx::query_as::<_, HistorialFila>(
            r#"
SELECT
    comp.id AS id_compra, NULL::uuid AS id_renglon, NULL::text AS renglon,
    NULL::text AS descripcion,
    ktc.droga_presentacion, ktc.laboratorio,
    comp.costo_final, comp.mantenimiento, comp.observaciones,
    us.nombre AS nombre_usuario, comp.fechora
FROM compras comp
JOIN usuarios us ON us.id = comp.id_usuario
LEFT JOIN base_kairos ktc ON ktc.id = comp.id_kairos
WHERE comp.cod_tarot = $1
ORDER BY comp.fechora DESC
            "#,
        )
        .bind(cod_tarot)
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }

    pub async fn historial_completo(&self) -> Result<Vec<HistorialFila>, AppError> {
        let filas = sqlx::query_as::<_, HistorialFila>(
            r#"
SELECT
    comp.id AS id_compra, NULL::uuid AS id_renglon, NULL::text AS renglon,
    NULL::text AS descripcion,
    ktc.droga_presentacion, ktc.laboratorio,
    comp.costo_final, comp.mantenimiento, comp.observaciones,
    us.nombre AS nombre_usuario, comp.fechora
FROM compras comp
JOIN usuarios us ON us.id = comp.id_usuario
LEFT JOIN base_kairos ktc ON ktc.id = comp.id_kairos
ORDER BY comp.fechora DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }

    pub async fn insertar(&self, datos: &CompraDatos) -> Result<Compra, AppError> {
        let compra = sqlx::query_as::<_, Compra>(
            r#"
            INSERT INTO compras
                (id_renglon, id_licitacion, id_kairos, costo_final, mantenimiento,
                 observaciones, cod_tarot, id_usuario, fechora)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(datos.id_renglon)
        .bind(datos.id_licitacion)
        .bind(datos.id_kairos)
        .bind(datos.costo_final)
        .bind(&datos.mantenimiento)
        .bind(&datos.observaciones)
        .bind(&datos.cod_tarot)
        .bind(datos.id_usuario)
        .bind(datos.fechora)
        .fetch_one(&self.pool)
        .await?;
        Ok(compra)
    }

    pub async fn modificar(
        &self,
        id_compra: Uuid,
        parche: &CompraParche,
    ) -> Result<Compra, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE compras SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(v) = parche.id_renglon {
                set.push("id_renglon = ").push_bind_unseparated(v);
            }
            if let Some(v) = parche.id_kairos {
                set.push("id_kairos = ").push_bind_unseparated(v);
            }
            if let Some(v) = parche.costo_final {
                set.push("costo_final = ").push_bind_unseparated(v);
            }
            if let Some(v) = &parche.cod_tarot {
                set.push("cod_tarot = ").push_bind_unseparated(v.as_str());
            }
            if let Some(v) = parche.fechora {
                set.push("fechora = ").push_bind_unseparated(v);
            }
            set_texto(&mut set, "mantenimiento", &parche.mantenimiento);
            set_texto(&mut set, "observaciones", &parche.observaciones);
        }
        qb.push(" WHERE id = ").push_bind(id_compra);
        qb.push(" RETURNING *");

        qb.build_query_as::<Compra>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                // Reapuntar la compra a un renglón o producto inexistente
                // rebota contra la clave foránea.
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return AppError::ReferenciaInexistente("referencia");
                    }
                }
                e.into()
            })
    }

    pub async fn eliminar(&self, id_compra: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM compras WHERE id = $1")
            .bind(id_compra)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
