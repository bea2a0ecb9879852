use analytics::AnalyticsEngine;
use auth::{AuthService, CredentialStore, InMemoryCredentialStore, SessionStore};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use configuration::Config;
use database::{DbRepository, EmployeeStore, InMemoryRepository};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod extract;
pub mod handlers;
pub mod params;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub employees: Arc<dyn EmployeeStore>,
    pub auth: AuthService<Arc<dyn CredentialStore>>,
    pub sessions: SessionStore,
    pub engine: AnalyticsEngine,
    pub salary_histogram_bins: usize,
}

/// Where employees and credentials are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    /// Nothing survives a restart. Handy for demos.
    InMemory,
}

impl AppState {
    pub fn new(
        employees: Arc<dyn EmployeeStore>,
        credentials: Arc<dyn CredentialStore>,
        config: &Config,
    ) -> Self {
        Self {
            employees,
            auth: AuthService::new(credentials),
            sessions: SessionStore::new(
                chrono::Duration::try_minutes(config.auth.session_ttl_minutes)
                    .unwrap_or(chrono::Duration::MAX),
            ),
            engine: AnalyticsEngine::new(),
            salary_histogram_bins: config.dashboard.salary_histogram_bins,
        }
    }

    /// Opens the chosen storage, creates the default admin and seeds demo data.
    pub async fn initialise(config: &Config, backend: StorageBackend) -> anyhow::Result<Self> {
        let (employees, credentials): (Arc<dyn EmployeeStore>, Arc<dyn CredentialStore>) =
            match backend {
                StorageBackend::Postgres => {
                    let db_pool = database::connect(
                        config.database.max_connections,
                        config.database.acquire_timeout(),
                    )
                    .await?;
                    database::run_migrations(&db_pool).await?;
                    let repo = Arc::new(DbRepository::new(db_pool));
                    let employees: Arc<dyn EmployeeStore> = repo.clone();
                    let credentials: Arc<dyn CredentialStore> = repo;
                    (employees, credentials)
                }
                StorageBackend::InMemory => {
                    tracing::warn!("Using in-memory storage; all data is lost on shutdown.");
                    let employees: Arc<dyn EmployeeStore> = Arc::new(InMemoryRepository::new());
                    let credentials: Arc<dyn CredentialStore> =
                        Arc::new(InMemoryCredentialStore::new());
                    (employees, credentials)
                }
            };

        let state = Self::new(employees, credentials, config);
        state
            .auth
            .ensure_default_admin(
                &config.auth.default_admin_username,
                &config.auth.default_admin_password,
            )
            .await?;
        if config.dashboard.seed_sample_data {
            database::seed_sample_employees(state.employees.as_ref()).await?;
        }
        Ok(state)
    }
}

/// Builds the router with every API route and the shared middleware.
pub fn build_router(state: Arc<AppState>, body_limit_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/logout", post(handlers::logout))
        .route(
            "/api/employees",
            get(handlers::list_employees).post(handlers::create_employee),
        )
        .route("/api/employees/export.csv", get(handlers::export_employees))
        .route(
            "/api/employees/:id",
            get(handlers::get_employee)
                .put(handlers::update_employee)
                .delete(handlers::delete_employee),
        )
        .route("/api/employees/:id/promote", post(handlers::promote_employee))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(body_limit_bytes))
}

/// The main function to configure and run the web server.
pub async fn run_server(config: Config, backend: StorageBackend) -> anyhow::Result<()> {
    // Note: Tracing is initialised by the binary before this is called.
    dotenvy::dotenv().ok();

    let state = Arc::new(AppState::initialise(&config, backend).await?);
    let app = build_router(state, config.server.body_limit_bytes);

    let addr = config.server.socket_addr();
    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
