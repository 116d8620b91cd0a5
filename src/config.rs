// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::db::{
    CompraRepository, KairosRepository, LicitacionRepository, RealRepository, RenglonRepository,
    UsuarioRepository,
};
use crate::services::{
    CompraService, KairosService, LicitacionService, RealService, RenglonService,
};

// El estado compartido accesible en toda la aplicación.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub licitacion_service: LicitacionService,
    pub renglon_service: RenglonService,
    pub compra_service: CompraService,
    pub kairos_service: KairosService,
    pub real_service: RealService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL debe estar definida");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexión con la base de datos establecida");

        // --- Arma el grafo de dependencias ---
        let licitacion_repo = LicitacionRepository::new(db_pool.clone());
        let renglon_repo = RenglonRepository::new(db_pool.clone());
        let compra_repo = CompraRepository::new(db_pool.clone());
        let kairos_repo = KairosRepository::new(db_pool.clone());
        let real_repo = RealRepository::new(db_pool.clone());
        let usuario_repo = UsuarioRepository::new(db_pool.clone());

        let licitacion_service = LicitacionService::new(
            licitacion_repo.clone(),
            renglon_repo.clone(),
            compra_repo.clone(),
        );
        let renglon_service = RenglonService::new(renglon_repo.clone(), licitacion_repo.clone());
        let kairos_service = KairosService::new(kairos_repo);
        let compra_service = CompraService::new(
            compra_repo,
            renglon_repo.clone(),
            licitacion_repo.clone(),
            kairos_service.clone(),
            usuario_repo,
        );
        let real_service = RealService::new(real_repo, renglon_repo, licitacion_repo);

        Ok(Self {
            db_pool,
            licitacion_service,
            renglon_service,
            compra_service,
            kairos_service,
            real_service,
        })
    }
}
