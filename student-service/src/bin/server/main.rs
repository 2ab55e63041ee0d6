use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use sqlx::postgres::PgPoolOptions;
use student_service::config::Config;
use student_service::domain::student::ports::StudentRepository;
use student_service::domain::user::ports::UserServicePort;
use student_service::domain::user::service::UserService;
use student_service::inbound::http::router::create_router;
use student_service::outbound::repositories::InMemoryCredentialStore;
use student_service::outbound::repositories::InMemoryStudentRepository;
use student_service::outbound::repositories::PostgresCredentialStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "student_service=debug,auth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "student-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_hours = config.jwt.expiration_hours,
        argon2_memory_kib = config.password.memory_kib,
        argon2_iterations = config.password.iterations,
        "Configuration loaded"
    );

    let password_hasher = PasswordHasher::with_params(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        password_hasher,
    )?);
    let token_ttl = chrono::Duration::hours(config.jwt.expiration_hours);

    let user_service: Arc<dyn UserServicePort> = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                storage = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(storage = "postgresql", "Database migrations completed");

            let store = Arc::new(PostgresCredentialStore::new(pg_pool));
            Arc::new(UserService::new(store, authenticator, token_ttl))
        }
        None => {
            tracing::warn!(
                storage = "memory",
                "No database configured, accounts will not survive a restart"
            );
            let store = Arc::new(InMemoryCredentialStore::new());
            Arc::new(UserService::new(store, authenticator, token_ttl))
        }
    };

    let student_repository: Arc<dyn StudentRepository> =
        Arc::new(InMemoryStudentRepository::seeded());

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, student_repository);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
