use std::net::{IpAddr, SocketAddr};

use axum::{
    Router,
    routing::{get, post},
};
use lifedrop_backend::{
    AppState,
    config::Config,
    middleware::{auth_middleware, log_errors},
    routes,
};
use sqlx::Executor;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load configuration");

    #[cfg(debug_assertions)]
    tracing::info!("Running in debug mode with CORS enabled");

    #[cfg(not(debug_assertions))]
    tracing::info!("Running in production mode with CORS disabled");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                conn.execute("SET application_name = 'lifedrop_backend';")
                    .await?;
                Ok(())
            })
        })
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to Postgres");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let state = AppState {
        pool,
        config: config.clone(),
    };

    // Only the login page and the login action are reachable without a
    // session; everything else sits behind the gate.
    let public_routes = Router::new()
        .route("/login", get(routes::auth::login_page))
        .route("/login", post(routes::auth::login));

    let protected_routes = Router::new()
        .route("/logout", get(routes::auth::logout))
        .route("/", get(routes::dashboard::dashboard))
        // Donor registration
        .route("/donor-form/{campaign_id}", get(routes::donor::donor_form))
        .route("/submit-donor", post(routes::donor::submit_donor))
        // Campaigns, statistics and exports
        .route("/campaigns", get(routes::campaign::campaigns))
        .route("/campaign/new", post(routes::campaign::create_campaign))
        .route(
            "/api/campaign-stats/{campaign_id}",
            get(routes::campaign::campaign_stats),
        )
        .route("/export/csv/{campaign_id}", get(routes::campaign::export_csv))
        .route("/export/pdf/{campaign_id}", get(routes::campaign::export_pdf))
        // Settings placeholders
        .route("/settings", get(routes::settings::settings))
        .route("/update_profile", post(routes::settings::update_profile))
        .route("/change_password", post(routes::settings::change_password))
        .route(
            "/update_campaign_settings",
            post(routes::settings::update_campaign_settings),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(axum::middleware::from_fn(log_errors));

    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(CorsLayer::permissive())
    };

    let app = router.with_state(state.clone());

    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .await
    .expect("Failed to start server");
}
