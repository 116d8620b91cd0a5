// src/services/licitacion_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CompraRepository, LicitacionRepository, RenglonRepository},
    models::licitacion::{Licitacion, LicitacionDatos, LicitacionDetalle, LicitacionParche},
};

#[derive(Clone)]
pub struct LicitacionService {
    licitacion_repo: LicitacionRepository,
    renglon_repo: RenglonRepository,
    compra_repo: CompraRepository,
}

impl LicitacionService {
    pub fn new(
        licitacion_repo: LicitacionRepository,
        renglon_repo: RenglonRepository,
        compra_repo: CompraRepository,
    ) -> Self {
        Self {
            licitacion_repo,
            renglon_repo,
            compra_repo,
        }
    }

    pub async fn listar(&self) -> Result<Vec<Licitacion>, AppError> {
        self.licitacion_repo.listar().await
    }

    pub async fn listar_activas(&self) -> Result<Vec<Licitacion>, AppError> {
        self.licitacion_repo.listar_activas().await
    }

    /// Licitación con sus renglones (orden numérico) y sus cotizaciones,
    /// como la consume la pantalla de detalle.
    pub async fn detalle(&self, id_licitacion: Uuid) -> Result<LicitacionDetalle, AppError> {
        let licitacion = self
            .licitacion_repo
            .buscar_por_id(id_licitacion)
            .await?
            .ok_or(AppError::ReferenciaInexistente("licitación"))?;
        let renglones = self.renglon_repo.listar_por_licitacion(id_licitacion).await?;
        let cotizaciones = self.compra_repo.listar_por_licitacion(id_licitacion).await?;
        Ok(LicitacionDetalle {
            licitacion,
            renglones,
            cotizaciones,
        })
    }

    pub async fn crear(&self, datos: LicitacionDatos) -> Result<Licitacion, AppError> {
        self.licitacion_repo.insertar(&datos).await
    }

    pub async fn modificar(
        &self,
        id_licitacion: Uuid,
        parche: &LicitacionParche,
    ) -> Result<Licitacion, AppError> {
        if parche.es_vacio() {
            return Err(AppError::CamposFaltantes(
                "no se proporcionaron campos para actualizar".to_string(),
            ));
        }
        if self
            .licitacion_repo
            .buscar_por_id(id_licitacion)
            .await?
            .is_none()
        {
            return Err(AppError::ReferenciaInexistente("licitación"));
        }
        // Salir del conjunto activo saca la licitación de todos los circuitos
        // de compra; queda asentado en el log.
        if let Some(estado) = &parche.estado {
            if !estado.es_activa() {
                tracing::info!("licitación {id_licitacion} pasa a estado inactivo: {estado}");
            }
        }
        self.licitacion_repo.modificar(id_licitacion, parche).await
    }

    // La baja arrastra renglones, compras y reales en una sola transacción.
    pub async fn eliminar(&self, id_licitacion: Uuid) -> Result<(), AppError> {
        if self
            .licitacion_repo
            .buscar_por_id(id_licitacion)
            .await?
            .is_none()
        {
            return Err(AppError::ReferenciaInexistente("licitación"));
        }
        self.licitacion_repo.eliminar(id_licitacion).await
    }
}
