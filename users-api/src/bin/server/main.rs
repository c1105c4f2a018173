use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use auth::SigningSecret;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use users_api::config::Config;
use users_api::domain::auth::service::LoginService;
use users_api::domain::user::ports::UserRepository;
use users_api::domain::user::service::UserService;
use users_api::inbound::http::router::create_router;
use users_api::inbound::http::router::AppState;
use users_api::outbound::repositories::InMemoryUserRepository;
use users_api::outbound::repositories::PostgresUserRepository;

fn app_state<UR: UserRepository>(
    repository: Arc<UR>,
    password_hasher: Arc<PasswordHasher>,
    authenticator: Arc<Authenticator>,
) -> AppState {
    AppState {
        user_service: Arc::new(UserService::new(Arc::clone(&repository), password_hasher)),
        login_service: Arc::new(LoginService::new(repository, Arc::clone(&authenticator))),
        authenticator,
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "users_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "users-api",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let database = match config.database.url {
        Some(_) => "postgresql",
        None => "memory",
    };

    tracing::info!(
        http_port = config.server.http_port,
        database,
        memory_cost = config.hashing.memory_cost,
        time_cost = config.hashing.time_cost,
        parallelism = config.hashing.parallelism,
        "Configuration loaded"
    );

    // Refuse to start rather than sign with a weak key
    let secret = SigningSecret::new(config.jwt.secret.as_bytes())?;
    let password_hasher = Arc::new(PasswordHasher::with_params(config.hashing)?);
    let authenticator = Arc::new(Authenticator::with_password_hasher(
        &secret,
        PasswordHasher::clone(&password_hasher),
    ));

    let state = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            app_state(
                Arc::new(PostgresUserRepository::new(pg_pool)),
                password_hasher,
                authenticator,
            )
        }
        None => {
            tracing::warn!("No database.url configured, users are kept in memory");
            app_state(
                Arc::new(InMemoryUserRepository::new()),
                password_hasher,
                authenticator,
            )
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(state);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
