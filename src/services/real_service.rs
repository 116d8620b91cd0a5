// src/services/real_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{LicitacionRepository, RealRepository, RenglonRepository},
    models::real::{Real, RealDatos, RealParche, RealVista},
};

#[derive(Clone)]
pub struct RealService {
    real_repo: RealRepository,
    renglon_repo: RenglonRepository,
    licitacion_repo: LicitacionRepository,
}

impl RealService {
    pub fn new(
        real_repo: RealRepository,
        renglon_repo: RenglonRepository,
        licitacion_repo: LicitacionRepository,
    ) -> Self {
        Self {
            real_repo,
            renglon_repo,
            licitacion_repo,
        }
    }

    pub async fn listar(&self) -> Result<Vec<RealVista>, AppError> {
        self.real_repo.listar().await
    }

    pub async fn listar_por_licitacion(
        &self,
        id_licitacion: Uuid,
    ) -> Result<Vec<RealVista>, AppError> {
        if self
            .licitacion_repo
            .buscar_por_id(id_licitacion)
            .await?
            .is_none()
        {
            return Err(AppError::ReferenciaInexistente("licitación"));
        }
        self.real_repo.listar_por_licitacion(id_licitacion).await
    }

    pub async fn listar_por_renglon(&self, id_renglon: Uuid) -> Result<Vec<RealVista>, AppError> {
        if self
            .renglon_repo
            .buscar_por_id(id_renglon)
            .await?
            .is_none()
        {
            return Err(AppError::ReferenciaInexistente("renglón"));
        }
        self.real_repo.listar_por_renglon(id_renglon).await
    }

    pub async fn agregar(&self, datos: RealDatos) -> Result<Real, AppError> {
        if self
            .renglon_repo
            .buscar_por_id(datos.id_renglon)
            .await?
            .is_none()
        {
            return Err(AppError::ReferenciaInexistente("renglón"));
        }
        self.real_repo.insertar(&datos).await
    }

    pub async fn modificar(&self, id_real: Uuid, parche: &RealParche) -> Result<Real, AppError> {
        if parche.es_vacio() {
            return Err(AppError::CamposFaltantes(
                "no se proporcionaron campos para actualizar".to_string(),
            ));
        }
        if self.real_repo.buscar_por_id(id_real).await?.is_none() {
            return Err(AppError::ReferenciaInexistente("real"));
        }
        // Si el parche reapunta el real a otro renglón, ese renglón tiene
        // que existir.
        if let Some(id_renglon) = parche.id_renglon {
            if self
                .renglon_repo
                .buscar_por_id(id_renglon)
                .await?
                .is_none()
            {
                return Err(AppError::ReferenciaInexistente("renglón"));
            }
        }
        self.real_repo.modificar(id_real, parche).await
    }

    pub async fn eliminar(&self, id_real: Uuid) -> Result<(), AppError> {
        if self.real_repo.buscar_por_id(id_real).await?.is_none() {
            return Err(AppError::ReferenciaInexistente("real"));
        }
        self.real_repo.eliminar(id_real).await
    }
}
