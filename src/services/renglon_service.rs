// src/services/renglon_service.rs

use futures::future::join_all;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{LicitacionRepository, RenglonRepository},
    models::renglon::{
        PreganadoRegistro, Renglon, RenglonDatos, RenglonEdicion, RenglonNuevo, RenglonParche,
    },
    services::lote::{
        self, FalloRegistro, ModoLote, RegistroDeLote, ResultadoAlta, ResultadoEdicion,
    },
};

#[derive(Clone)]
pub struct RenglonService {
    renglon_repo: RenglonRepository,
    licitacion_repo: LicitacionRepository,
}

impl RenglonService {
    pub fn new(renglon_repo: RenglonRepository, licitacion_repo: LicitacionRepository) -> Self {
        Self {
            renglon_repo,
            licitacion_repo,
        }
    }

    async fn exigir_licitacion(&self, id_licitacion: Uuid) -> Result<(), AppError> {
        if self
            .licitacion_repo
            .buscar_por_id(id_licitacion)
            .await?
            .is_none()
        {
            return Err(AppError::ReferenciaInexistente("licitación"));
        }
        Ok(())
    }

    async fn exigir_tupla_libre(
        &self,
        id_licitacion: Uuid,
        renglon: &str,
        alternativo: i32,
    ) -> Result<(), AppError> {
        if self
            .renglon_repo
            .buscar_tupla(id_licitacion, renglon, alternativo)
            .await?
            .is_some()
        {
            return Err(AppError::Conflicto(format!(
                "renglón {renglon} alternativo {alternativo}"
            )));
        }
        Ok(())
    }

    pub async fn listar(&self) -> Result<Vec<Renglon>, AppError> {
        self.renglon_repo.listar().await
    }

    pub async fn buscar_por_id(&self, id_renglon: Uuid) -> Result<Renglon, AppError> {
        self.renglon_repo
            .buscar_por_id(id_renglon)
            .await?
            .ok_or(AppError::ReferenciaInexistente("renglón"))
    }

    pub async fn listar_por_licitacion(
        &self,
        id_licitacion: Uuid,
    ) -> Result<Vec<Renglon>, AppError> {
        self.exigir_licitacion(id_licitacion).await?;
        self.renglon_repo.listar_por_licitacion(id_licitacion).await
    }

    pub async fn buscar_tupla(
        &self,
        id_licitacion: Uuid,
        renglon: &str,
        alternativo: i32,
    ) -> Result<Renglon, AppError> {
        self.renglon_repo
            .buscar_tupla(id_licitacion, renglon, alternativo)
            .await?
            .ok_or(AppError::ReferenciaInexistente("renglón"))
    }

    pub async fn crear_primario(
        &self,
        id_licitacion: Uuid,
        mut datos: RenglonDatos,
    ) -> Result<Renglon, AppError> {
        datos.alternativo = 0;
        self.exigir_licitacion(id_licitacion).await?;
        self.crear_verificado(id_licitacion, &datos).await
    }

    pub async fn crear_alternativo(
        &self,
        id_licitacion: Uuid,
        datos: RenglonDatos,
    ) -> Result<Renglon, AppError> {
        if datos.alternativo <= 0 {
            return Err(AppError::CamposFaltantes(
                "alternativo debe ser mayor a cero".to_string(),
            ));
        }
        self.exigir_licitacion(id_licitacion).await?;
        self.crear_verificado(id_licitacion, &datos).await
    }

    // Alta con la licitación ya verificada; la usa el fan-out de los lotes.
    async fn crear_verificado(
        &self,
        id_licitacion: Uuid,
        datos: &RenglonDatos,
    ) -> Result<Renglon, AppError> {
        self.exigir_tupla_libre(id_licitacion, &datos.renglon, datos.alternativo)
            .await?;
        self.renglon_repo.insertar(id_licitacion, datos).await
    }

    pub async fn modificar(
        &self,
        id_renglon: Uuid,
        parche: &RenglonParche,
    ) -> Result<Renglon, AppError> {
        if parche.es_vacio() {
            return Err(AppError::CamposFaltantes(
                "no se proporcionaron campos para actualizar".to_string(),
            ));
        }
        let actual = self
            .renglon_repo
            .buscar_por_id(id_renglon)
            .await?
            .ok_or(AppError::ReferenciaInexistente("renglón"))?;

        // Tupla destino después del parche: si cambia, no puede pisar otro
        // renglón de la misma licitación.
        let renglon_destino = parche.renglon.as_deref().unwrap_or(&actual.renglon);
        let alternativo_destino = parche.alternativo.unwrap_or(actual.alternativo);
        if renglon_destino != actual.renglon || alternativo_destino != actual.alternativo {
            if let Some(existente) = self
                .renglon_repo
                .buscar_tupla(actual.id_licitacion, renglon_destino, alternativo_destino)
                .await?
            {
                if existente.id != id_renglon {
                    return Err(AppError::Conflicto(format!(
                        "renglón {renglon_destino} alternativo {alternativo_destino}"
                    )));
                }
            }
        }

        self.renglon_repo.modificar(id_renglon, parche).await
    }

    /// Alta masiva: clasifica el lote y, solo si quedó limpio, dispara las
    /// altas en paralelo. Los fallos posteriores a la clasificación (p. ej.
    /// un renglón que ya existía en la base) se informan por registro.
    pub async fn crear_lote(
        &self,
        id_licitacion: Uuid,
        renglones: Vec<RenglonNuevo>,
    ) -> Result<ResultadoAlta<Renglon>, AppError> {
        if renglones.is_empty() {
            return Err(AppError::CamposFaltantes(
                "no hay renglones para agregar".to_string(),
            ));
        }
        self.exigir_licitacion(id_licitacion).await?;

        let aceptados = lote::clasificar(renglones, ModoLote::Alta).exigir_valida()?;

        let intentos = join_all(aceptados.into_iter().map(|registro| async move {
            let etiqueta = registro.etiqueta();
            match registro.como_datos() {
                Some(datos) => self
                    .crear_verificado(id_licitacion, &datos)
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
                Ok(renglon) => resultado.creados.push(renglon),
                Err(fallo) => resultado.fallidos.push(fallo),
            }
        }
        Ok(resultado)
    }

    /// Modificación masiva, mismo esquema que el alta: clasificación previa
    /// en modo edición (clave = id del renglón) y fan-out por registro.
    pub async fn modificar_lote(
        &self,
        id_licitacion: Uuid,
        renglones: Vec<RenglonEdicion>,
    ) -> Result<ResultadoEdicion<Renglon>, AppError> {
        if renglones.is_empty() {
            return Err(AppError::CamposFaltantes(
                "no hay renglones para modificar".to_string(),
            ));
        }
        self.exigir_licitacion(id_licitacion).await?;

        let aceptados = lote::clasificar(renglones, ModoLote::Edicion).exigir_valida()?;

        let intentos = join_all(aceptados.into_iter().map(|registro| async move {
            let etiqueta = registro.etiqueta();
            match registro.id_renglon {
                Some(id_renglon) => self
                    .modificar(id_renglon, &registro.cambios)
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
                Ok(renglon) => resultado.actualizados.push(renglon),
                Err(fallo) => resultado.fallidos.push(fallo),
            }
        }
        Ok(resultado)
    }

    /// Circuito de preganados: marca en masa el flag de pre-adjudicado y el
    /// mes estimado de entrega.
    pub async fn marcar_preganados(
        &self,
        id_licitacion: Uuid,
        registros: Vec<PreganadoRegistro>,
    ) -> Result<ResultadoEdicion<Renglon>, AppError> {
        if registros.is_empty() {
            return Err(AppError::CamposFaltantes(
                "no hay renglones para modificar".to_string(),
            ));
        }
        self.exigir_licitacion(id_licitacion).await?;

        let intentos = join_all(registros.into_iter().map(|registro| async move {
            let etiqueta = registro.id_renglon.to_string();
            match self.renglon_repo.buscar_por_id(registro.id_renglon).await {
                Ok(Some(_)) => self
                    .renglon_repo
                    .marcar_preganado(
                        registro.id_renglon,
                        registro.preganado,
                        registro.mes_estimado_entrega.as_deref(),
                    )
                    .await
                    .map_err(|e| FalloRegistro {
                        etiqueta,
                        motivo: e.to_string(),
                    }),
                Ok(None) => Err(FalloRegistro {
                    etiqueta,
                    motivo: "renglón no encontrado".to_string(),
                }),
                Err(e) => Err(FalloRegistro {
                    etiqueta,
                    motivo: e.to_string(),
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
                Ok(renglon) => resultado.actualizados.push(renglon),
                Err(fallo) => resultado.fallidos.push(fallo),
            }
        }
        Ok(resultado)
    }

    pub async fn eliminar(&self, id_renglon: Uuid) -> Result<(), AppError> {
        if self
            .renglon_repo
            .buscar_por_id(id_renglon)
            .await?
            .is_none()
        {
            return Err(AppError::ReferenciaInexistente("renglón"));
        }
        self.renglon_repo.eliminar(id_renglon).await
    }

    pub async fn eliminar_por_licitacion(&self, id_licitacion: Uuid) -> Result<(), AppError> {
        self.exigir_licitacion(id_licitacion).await?;
        self.renglon_repo.eliminar_por_licitacion(id_licitacion).await
    }
}
