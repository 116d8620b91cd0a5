// src/main.rs

use axum::{
    Router,
    routing::{get, patch, post},
};
use tokio::net::TcpListener;

mod common;
mod config;
mod db;
mod handlers;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // Si la configuración falla, la aplicación no debe arrancar.
    let app_state = AppState::new()
        .await
        .expect("Fallo al inicializar el estado de la aplicación");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Fallo al correr las migraciones de la base de datos");

    tracing::info!("✅ Migraciones de la base de datos ejecutadas");

    let licitaciones_routes = Router::new()
        .route(
            "/",
            get(handlers::licitaciones::listar).post(handlers::licitaciones::crear),
        )
        .route("/activas", get(handlers::licitaciones::listar_activas))
        .route(
            "/{id_licitacion}",
            get(handlers::licitaciones::obtener)
                .patch(handlers::licitaciones::modificar)
                .delete(handlers::licitaciones::eliminar),
        );

    let renglones_routes = Router::new()
        .route("/", get(handlers::renglones::listar))
        // Renglones por licitación
        .route(
            "/licitacion/{id_licitacion}",
            get(handlers::renglones::listar_por_licitacion)
                .post(handlers::renglones::crear_lote)
                .patch(handlers::renglones::modificar_lote)
                .delete(handlers::renglones::eliminar_por_licitacion),
        )
        .route(
            "/licitacion/preganados/{id_licitacion}",
            patch(handlers::renglones::marcar_preganados),
        )
        // Renglones alternativos
        .route(
            "/alternativo/{id_licitacion}",
            post(handlers::renglones::crear_alternativo),
        )
        // Renglones individuales
        .route(
            "/{id_renglon}",
            get(handlers::renglones::obtener)
                .patch(handlers::renglones::modificar)
                .delete(handlers::renglones::eliminar),
        )
        .route("/alta/{id_licitacion}", post(handlers::renglones::crear))
        .route(
            "/{id_licitacion}/{nro_renglon}/{alternativo}",
            get(handlers::renglones::obtener_tupla),
        );

    let compras_routes = Router::new()
        .route(
            "/",
            get(handlers::compras::listar).post(handlers::compras::crear),
        )
        .route(
            "/lista-kairos",
            get(handlers::compras::lista_kairos).post(handlers::compras::lista_kairos_filtrada),
        )
        .route(
            "/lista-kairos/no-asociados",
            get(handlers::compras::renglones_no_asociados),
        )
        // Por licitación
        .route(
            "/licitacion/{id_licitacion}",
            get(handlers::compras::listar_por_licitacion).post(handlers::compras::crear_lote),
        )
        // Cotizaciones históricas
        .route(
            "/cotizaciones-hist",
            get(handlers::compras::historial_completo),
        )
        .route(
            "/cotizaciones-hist/licitacion/{id_licitacion}",
            get(handlers::compras::historial_por_licitacion),
        )
        .route(
            "/cotizaciones-hist/cod-tarot/{cod_tarot}",
            get(handlers::compras::historial_por_cod_tarot),
        )
        // Por compra
        .route(
            "/{id_compra}",
            get(handlers::compras::obtener)
                .patch(handlers::compras::modificar)
                .delete(handlers::compras::eliminar),
        );

    let kairos_routes = Router::new()
        .route(
            "/",
            get(handlers::kairos::listar).post(handlers::kairos::agregar),
        )
        .route(
            "/lista",
            post(handlers::kairos::agregar_lista).patch(handlers::kairos::modificar_lista),
        )
        .route("/tarot/{cod_tarot}", get(handlers::kairos::por_cod_tarot))
        .route("/tango/{cod_tango}", get(handlers::kairos::por_cod_tango))
        .route("/anmat/{cod_anmat}", get(handlers::kairos::por_anmat))
        .route(
            "/cod-kairos/{cod_kairos}",
            get(handlers::kairos::por_cod_kairos),
        )
        .route(
            "/laboratorio/{laboratorio}",
            get(handlers::kairos::por_laboratorio),
        )
        .route("/droga/{droga_presentacion}", get(handlers::kairos::por_droga))
        .route(
            "/{id_kairos}",
            get(handlers::kairos::obtener)
                .patch(handlers::kairos::modificar)
                .delete(handlers::kairos::eliminar),
        );

    let reales_routes = Router::new()
        .route(
            "/",
            get(handlers::reales::listar).post(handlers::reales::agregar),
        )
        .route(
            "/licitacion/{id_licitacion}",
            get(handlers::reales::listar_por_licitacion),
        )
        .route(
            "/renglon/{id_renglon}",
            get(handlers::reales::listar_por_renglon),
        )
        .route(
            "/{id_real}",
            patch(handlers::reales::modificar).delete(handlers::reales::eliminar),
        );

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/licitaciones", licitaciones_routes)
        .nest("/api/renglones", renglones_routes)
        .nest("/api/compras", compras_routes)
        .nest("/api/kairos", kairos_routes)
        .nest("/api/reales", reales_routes)
        .with_state(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Fallo al iniciar el listener TCP");
    tracing::info!("🚀 Servidor escuchando en {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Error en el servidor Axum");
}
