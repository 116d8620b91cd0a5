// src/services/compra_service.rs

use futures::future::join_all;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CompraRepository, LicitacionRepository, RenglonRepository, UsuarioRepository},
    models::compra::{
        Compra, CompraAlta, CompraDatos, CompraNueva, CompraParche, CompraVista,
        FiltroListaKairos, HistorialFila, ListaKairosFila, RenglonNoAsociado,
    },
    services::KairosService,
    services::lote::{self, FalloRegistro, ModoLote, RegistroDeLote, ResultadoAlta},
};

#[derive(Clone)]
pub struct CompraService {
    compra_repo: CompraRepository,
    renglon_repo: RenglonRepository,
    licitacion_repo: LicitacionRepository,
    kairos_service: KairosService,
    usuario_repo: UsuarioRepository,
}

impl CompraService {
    pub fn new(
        compra_repo: CompraRepository,
        renglon_repo: RenglonRepository,
        licitacion_repo: LicitacionRepository,
        kairos_service: KairosService,
        usuario_repo: UsuarioRepository,
    ) -> Self {
        Self {
            compra_repo,
            renglon_repo,
            licitacion_repo,
            kairos_service,
            usuario_repo,
        }
    }

    async fn exigir_usuario(&self, id_usuario: Uuid) -> Result<(), AppError> {
        if self.usuario_repo.buscar_por_id(id_usuario).await?.is_none() {
            return Err(AppError::ReferenciaInexistente("usuario"));
        }
        Ok(())
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

    pub async fn listar(&self) -> Result<Vec<CompraVista>, AppError> {
        self.compra_repo.listar().await
    }

    pub async fn buscar_por_id(&self, id_compra: Uuid) -> Result<CompraVista, AppError> {
        self.compra_repo
            .buscar_por_id(id_compra)
            .await?
            .ok_or(AppError::ReferenciaInexistente("compra"))
    }

    pub async fn listar_por_licitacion(
        &self,
        id_licitacion: Uuid,
    ) -> Result<Vec<CompraVista>, AppError> {
        self.exigir_licitacion(id_licitacion).await?;
        self.compra_repo.listar_por_licitacion(id_licitacion).await
    }

    /// Alta individual. Las referencias se verifican una por una para poder
    /// nombrar cuál falló, y el producto se resuelve por código: si el código
    /// no está en el catálogo la compra se rechaza, nunca se inventa una
    /// entrada por defecto.
    pub async fn crear(&self, alta: CompraAlta) -> Result<Compra, AppError> {
        self.exigir_usuario(alta.id_usuario).await?;
        if self
            .renglon_repo
            .buscar_por_id(alta.id_renglon)
            .await?
            .is_none()
        {
            return Err(AppError::ReferenciaInexistente("renglón"));
        }
        self.exigir_licitacion(alta.id_licitacion).await?;

        let producto = self.kairos_service.resolver(&alta.cod_tarot).await?;

        let datos = CompraDatos {
            id_renglon: alta.id_renglon,
            id_licitacion: alta.id_licitacion,
            id_kairos: producto.id,
            costo_final: alta.costo_final,
            mantenimiento: alta.mantenimiento,
            observaciones: alta.observaciones,
            cod_tarot: alta.cod_tarot,
            id_usuario: alta.id_usuario,
            fechora: alta.fechora,
        };
        self.compra_repo.insertar(&datos).await
    }

    /// Alta masiva: el usuario se verifica una sola vez, el lote se clasifica
    /// (clave = id del renglón) y con un solo incompleto o repetido se
    /// rechaza entero. El fan-out posterior no es transaccional; una
    /// referencia que desapareció entre la verificación y la escritura cae
    /// como fallo del registro, nunca se ignora.
    pub async fn crear_lote(
        &self,
        id_licitacion: Uuid,
        id_usuario: Uuid,
        compras: Vec<CompraNueva>,
    ) -> Result<ResultadoAlta<Compra>, AppError> {
        if compras.is_empty() {
            return Err(AppError::CamposFaltantes(
                "no hay compras para agregar".to_string(),
            ));
        }
        self.exigir_licitacion(id_licitacion).await?;
        self.exigir_usuario(id_usuario).await?;

        let aceptadas = lote::clasificar(compras, ModoLote::Alta).exigir_valida()?;

        let intentos = join_all(aceptadas.into_iter().map(|registro| async move {
            let etiqueta = registro.etiqueta();
            match registro.como_datos() {
                Some(datos) => {
                    self.compra_repo
                        .insertar(&datos)
                        .await
                        .map_err(|e| FalloRegistro {
                            etiqueta,
                            motivo: motivo_por_registro(&e),
                        })
                }
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
                Ok(compra) => resultado.creados.push(compra),
                Err(fallo) => resultado.fallidos.push(fallo),
            }
        }
        Ok(resultado)
    }

    pub async fn lista_kairos(
        &self,
        filtro: &FiltroListaKairos,
    ) -> Result<Vec<ListaKairosFila>, AppError> {
        self.compra_repo.lista_kairos(filtro).await
    }

    pub async fn renglones_no_asociados(&self) -> Result<Vec<RenglonNoAsociado>, AppError> {
        self.compra_repo.renglones_no_asociados().await
    }

    pub async fn historial_por_licitacion(
        &self,
        id_licitacion: Uuid,
    ) -> Result<Vec<HistorialFila>, AppError> {
        self.exigir_licitacion(id_licitacion).await?;
        self.compra_repo.historial_por_licitacion(id_licitacion).await
    }

    pub async fn historial_por_cod_tarot(
        &self,
        cod_tarot: &str,
    ) -> Result<Vec<HistorialFila>, AppError> {
        self.compra_repo.historial_por_cod_tarot(cod_tarot).await
    }

    pub async fn historial_completo(&self) -> Result<Vec<HistorialFila>, AppError> {
        self.compra_repo.historial_completo().await
    }

    pub async fn modificar(
        &self,
        id_compra: Uuid,
        parche: &CompraParche,
    ) -> Result<Compra, AppError> {
        if parche.es_vacio() {
            return Err(AppError::CamposFaltantes(
                "no se proporcionaron campos para actualizar".to_string(),
            ));
        }
        if self.compra_repo.buscar_fila(id_compra).await?.is_none() {
            return Err(AppError::ReferenciaInexistente("compra"));
        }
        self.compra_repo.modificar(id_compra, parche).await
    }

    pub async fn eliminar(&self, id_compra: Uuid) -> Result<(), AppError> {
        if self.compra_repo.buscar_fila(id_compra).await?.is_none() {
            return Err(AppError::ReferenciaInexistente("compra"));
        }
        self.compra_repo.eliminar(id_compra).await
    }
}

// Un alta que pisa una clave foránea inexistente es un fallo del registro,
// no un 500 del lote.
fn motivo_por_registro(error: &AppError) -> String {
    if let AppError::BaseDatos(sqlx::Error::Database(db_err)) = error {
        if db_err.is_foreign_key_violation() {
            return "referencia inexistente".to_string();
        }
    }
    error.to_string()
}
