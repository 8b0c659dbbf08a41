use axum::{
    Router,
    routing::{get, post, put, delete},
    middleware::from_fn_with_state,
    extract::DefaultBodyLimit,
};

use http::{Method, header};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_cookies::CookieManagerLayer;
use tower_governor::governor::GovernorConfigBuilder;
use tower_http::{
    services::ServeDir,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
    cors::CorsLayer,
};

use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod state;
mod db;
mod seed;
mod crypto {
    pub mod csrf;
}

mod models {
    pub mod admin;
    pub mod order;
    pub mod product;
    pub mod session;
    pub mod zone;
}

mod repositories {
    pub mod admin;
    pub mod order;
    pub mod product;
    pub mod zone;
}

mod services {
    pub mod auth;
    pub mod catalog;
    pub mod orders;
}

mod handlers {
    pub mod analytics;
    pub mod auth;
    pub mod categories;
    pub mod orders;
    pub mod products;
    pub mod zones;
}

mod middleware_layer {
    pub mod auth;
    pub mod csrf;
    pub mod rate_limit;
}

mod validation {
    pub mod auth;
    pub mod orders;
    pub mod products;
}

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    tracing::info!("✅ Configuration loaded successfully");

    let state = AppState::new(&config).await?;
    tracing::info!("✅ AppState initialized");

    db::init_schema(&state.db).await?;
    seed::seed_delivery_zones(&state.db).await?;
    services::auth::ensure_bootstrap_admin(&state).await?;
    tracing::info!("✅ Startup bootstrap completed");

    let cors = CorsLayer::new()
        .allow_origin([
            "http://localhost:3000".parse().unwrap(),
            "http://127.0.0.1:3000".parse().unwrap(),
            "http://localhost:5173".parse().unwrap(),
        ])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::COOKIE,
            "x-csrf-token".parse().unwrap(),
        ])
        .allow_credentials(true)
        .expose_headers(["x-csrf-token".parse().unwrap()])
        .max_age(Duration::from_secs(86400));

    let admin_governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(50)
            .burst_size(200)
            .use_headers()
            .finish()
            .unwrap(),
    );

    let public_routes = Router::new()
        .route("/api/products", get(handlers::products::list_products))
        .route("/api/products/{product_id}", get(handlers::products::get_product))
        .route("/api/zones", get(handlers::zones::list_zones))
        .route("/api/orders", post(handlers::orders::place_order))
        .with_state(state.clone());

    let login_routes = Router::new()
        .route("/api/admin/login", post(handlers::auth::login))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::rate_limit::rate_limit_login,
        ))
        .with_state(state.clone());

    let admin_routes = Router::new()
        .route("/api/admin/logout", post(handlers::auth::logout))
        .route("/api/admin/me", get(handlers::auth::current_admin))
        .route("/api/admin/analytics", get(handlers::analytics::summary))
        .route("/api/admin/products", post(handlers::products::create_product))
        .route(
            "/api/admin/products/{product_id}",
            put(handlers::products::update_product),
        )
        .route(
            "/api/admin/products/{product_id}",
            delete(handlers::products::delete_product),
        )
        .route("/api/admin/orders", get(handlers::orders::list_orders))
        .route("/api/admin/orders/{order_id}", get(handlers::orders::get_order))
        .route(
            "/api/admin/orders/{order_id}/status",
            put(handlers::orders::update_order_status),
        )
        .route(
            "/api/admin/zones/{zone_id}/fee",
            put(handlers::zones::update_zone_fee),
        )
        .route("/api/admin/categories", get(handlers::categories::list_categories))
        .route("/api/admin/categories", post(handlers::categories::create_category))
        .route(
            "/api/admin/categories/{name}",
            delete(handlers::categories::delete_category),
        )
        .layer(tower_governor::GovernorLayer::new(admin_governor_conf.clone()))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::csrf::verify_csrf,
        ))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::auth::require_auth,
        ))
        .with_state(state.clone());

    let app = Router::new()
        .merge(public_routes)
        .merge(login_routes)
        .merge(admin_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default())
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(CookieManagerLayer::new())
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
        .layer(cors)
        .fallback_service(ServeDir::new("public"));

    let addr: SocketAddr = state.config.bind_addr;
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
