// src/services/kairos_service.rs

use futures::future::join_all;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::KairosRepository,
    models::kairos::{BaseKairos, KairosDatos, KairosEdicion, KairosNuevo, KairosParche},
    services::lote::{
        self, FalloRegistro, ModoLote, RegistroDeLote, ResultadoAlta, ResultadoEdicion,
    },
};

#[derive(Clone)]
pub struct KairosService {
    kairos_repo: KairosRepository,
}

impl KairosService {
    pub fn new(kairos_repo: KairosRepository) -> Self {
        Self { kairos_repo }
    }

    /// Resolución de un código Tarot a su entrada de catálogo. Un código que
    /// no existe es un rechazo explícito, nunca una entrada vacía.
    pub async fn resolver(&self, cod_tarot: &str) -> Result<BaseKairos, AppError> {
        self.kairos_repo
            .resolver_cod_tarot(cod_tarot)
            .await?
            .ok_or_else(|| AppError::CatalogoNoResuelto(cod_tarot.to_string()))
    }

    pub async fn listar(&self) -> Result<Vec<BaseKairos>, AppError> {
        self.kairos_repo.listar().await
    }

    pub async fn buscar_por_id(&self, id_kairos: Uuid) -> Result<BaseKairos, AppError> {
        self.kairos_repo
            .buscar_por_id(id_kairos)
            .await?
            .ok_or(AppError::ReferenciaInexistente("producto"))
    }

    pub async fn listar_por_cod_tarot(&self, cod_tarot: &str) -> Result<Vec<BaseKairos>, AppError> {
        self.kairos_repo.listar_por_cod_tarot(cod_tarot).await
    }

    pub async fn listar_por_cod_kairos(
        &self,
        cod_kairos: &str,
    ) -> Result<Vec<BaseKairos>, AppError> {
        self.kairos_repo.listar_por_cod_kairos(cod_kairos).await
    }

    pub async fn listar_por_anmat(&self, anmat: &str) -> Result<Vec<BaseKairos>, AppError> {
        self.kairos_repo.listar_por_anmat(anmat).await
    }

    pub async fn listar_por_cod_tango(&self, cod_tango: &str) -> Result<Vec<BaseKairos>, AppError> {
        self.kairos_repo.listar_por_cod_tango(cod_tango).await
    }

    pub async fn listar_por_laboratorio(
        &self,
        laboratorio: &str,
    ) -> Result<Vec<BaseKairos>, AppError> {
        self.kairos_repo.listar_por_laboratorio(laboratorio).await
    }

    pub async fn listar_por_droga(&self, droga: &str) -> Result<Vec<BaseKairos>, AppError> {
        self.kairos_repo.listar_por_droga(droga).await
    }

    pub async fn agregar(&self, datos: KairosDatos) -> Result<BaseKairos, AppError> {
        self.kairos_repo.insertar(&datos).await
    }

    /// Importación de una lista de productos (carga desde planilla). Mismo
    /// esquema que los lotes de renglones: clasificación previa y fan-out
    /// con resultado por registro.
    pub async fn agregar_lista(
        &self,
        productos: Vec<KairosNuevo>,
    ) -> Result<ResultadoAlta<BaseKairos>, AppError> {
        if productos.is_empty() {
            return Err(AppError::CamposFaltantes(
                "no hay productos para agregar".to_string(),
            ));
        }
        let aceptados = lote::clasificar(productos, ModoLote::Alta).exigir_valida()?;

        let intentos = join_all(aceptados.into_iter().map(|registro| async move {
            let etiqueta = registro.etiqueta();
            match registro.como_datos() {
                Some(datos) => self
                    .kairos_repo
                    .insertar(&datos)
                    .await
                    .map_err(|e| FalloRegistro {
                        etiqueta,
                        motivo: e.to_string(),
                    }),
                None => Err(FalloRegistro {
                    etiqueta,
                    motivo: "faltan campos obligatorios".to_string(),
                }),
            }
        }))
        .await;

        let mut resultado = ResultadoAlta {
            creados: Vec::new(),
            fallidos: Vec::new(),
        };
        for intento in intentos {
            match intento {
                Ok(producto) => resultado.creados.push(producto),
                Err(fallo) => resultado.fallidos.push(fallo),
            }
        }
        Ok(resultado)
    }

    pub async fn modificar(
        &self,
        id_kairos: Uuid,
        parche: &KairosParche,
    ) -> Result<BaseKairos, AppError> {
        if parche.es_vacio() {
            return Err(AppError::CamposFaltantes(
                "no se proporcionaron campos para actualizar".to_string(),
            ));
        }
        if self.kairos_repo.buscar_por_id(id_kairos).await?.is_none() {
            return Err(AppError::ReferenciaInexistente("producto"));
        }
        self.kairos_repo.modificar(id_kairos, parche).await
    }

    pub async fn modificar_lista(
        &self,
        productos: Vec<KairosEdicion>,
    ) -> Result<ResultadoEdicion<BaseKairos>, AppError> {
        if productos.is_empty() {
            return Err(AppError::CamposFaltantes(
                "no hay productos para modificar".to_string(),
            ));
        }
        let aceptados = lote::clasificar(productos, ModoLote::Edicion).exigir_valida()?;

        let intentos = join_all(aceptados.into_iter().map(|registro| async move {
            let etiqueta = registro.etiqueta();
            match registro.id_kairos {
                Some(id_kairos) => self
                    .modificar(id_kairos, &registro.cambios)
                    .await
                    .map_err(|e| FalloRegistro {
                        etiqueta,
                        motivo: e.to_string(),
                    }),
                None => Err(FalloRegistro {
                    etiqueta,
                    motivo: "faltan campos obligatorios".to_string(),
                }),
            }
        }))
        .await;

        let mut resultado = ResultadoEdicion {
            actualizados: Vec::new(),
            fallidos: Vec::new(),
        };
        for intento in intentos {
            match intento {
                Ok(producto) => resultado.actualizados.push(producto),
                Err(fallo) => resultado.fallidos.push(fallo),
            }
        }
        Ok(resultado)
    }

    pub async fn eliminar(&self, id_kairos: Uuid) -> Result<(), AppError> {
        if self.kairos_repo.buscar_por_id(id_kairos).await?.is_none() {
            return Err(AppError::ReferenciaInexistente("producto"));
        }
        self.kairos_repo.eliminar(id_kairos).await
    }
}
