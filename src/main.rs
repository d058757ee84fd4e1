use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use dotenvy::dotenv;

use fleet_admin::config::database::{init_schema, mask_database_url, DatabaseConfig};
use fleet_admin::config::environment::{EnvironmentConfig, StorageBackend};
use fleet_admin::seed::seed_demo_data;
use fleet_admin::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    info!("🚚 Fleet Admin - API de administración");
    info!("================================================");

    let config = EnvironmentConfig::from_env().context("invalid configuration")?;
    info!("⚙️ Entorno: {} | almacenamiento: {:?}", config.environment, config.storage);

    let state = match (config.storage, config.database_url.clone()) {
        (StorageBackend::Postgres, Some(url)) => {
            info!("🐘 Conectando a {}", mask_database_url(&url));
            let pool = match DatabaseConfig::new(url).create_pool().await {
                Ok(pool) => pool,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {}", e);
                    return Err(anyhow::anyhow!("Error de base de datos: {}", e));
                }
            };
            info!("✅ Base de datos conectada");
            init_schema(&pool).await.context("creating database schema")?;
            AppState::postgres(pool, config)
        }
        (StorageBackend::Postgres, None) => {
            return Err(anyhow::anyhow!("DATABASE_URL must be set for the postgres backend"));
        }
        (StorageBackend::Memory, _) => {
            warn!("🧠 Usando almacenamiento en memoria; los datos se pierden al reiniciar");
            AppState::in_memory(config)
        }
    };

    if state.config.seed_demo_data {
        seed_demo_data(&state).await.context("seeding demo data")?;
    }

    if state.config.cors_origins.is_empty() && !state.config.is_development() {
        warn!("⚠️ CORS_ORIGINS vacío: se aceptan requests de cualquier origen");
    }

    let addr: SocketAddr = state
        .config
        .server_url()
        .parse()
        .context("invalid HOST/PORT")?;
    let app = fleet_admin::create_app(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio");
    info!("👤 Usuarios:");
    info!("   GET  /api/users - Listar (search, filters, sort, per_page)");
    info!("   GET  /api/users/create - Opciones del formulario");
    info!("   POST /api/users - Crear usuario");
    info!("   GET  /api/users/:id - Obtener usuario");
    info!("   GET  /api/users/:id/edit - Usuario y opciones del formulario");
    info!("   PUT  /api/users/:id - Actualizar usuario");
    info!("   DELETE /api/users/:id - Eliminar usuario");
    info!("   GET  /api/drivers - Listar conductores");
    info!("🚗 Vehículos: /api/vehicles (mismas rutas)");
    info!("📦 Productos: /api/products (mismas rutas), GET /api/products/export (CSV)");
    info!("🔐 Catálogo: GET /api/roles, GET /api/permissions");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Servidor terminó con error: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
