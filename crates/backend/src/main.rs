pub mod domain;
pub mod handlers;
pub mod shared;
pub mod system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use axum::middleware::{self, Next};
    use axum::response::Response;
    use axum::{
        routing::{get, post},
        Router,
    };
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file_path = log_dir.join("backend.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    async fn request_logger(req: Request<Body>, next: Next) -> Response {
        let start = std::time::Instant::now();
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let response = next.run(req).await;

        tracing::info!(
            "{} {} -> {} in {}ms",
            method,
            path,
            response.status().as_u16(),
            start.elapsed().as_millis()
        );
        response
    }

    let config = shared::config::load_config()?;
    let port = config.server.port;

    system::auth::jwt::init_session_secret(&config)?;
    shared::store::initialize_store(&config).await?;
    shared::config::init_config(config)?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let protected = Router::new()
        .route("/dashboard", get(handlers::dashboard::view))
        // Product management
        .route("/product", get(handlers::a001_product::list))
        .route(
            "/add_product",
            get(handlers::a001_product::edit_prefill).post(handlers::a001_product::save),
        )
        // Customer management
        .route(
            "/customers",
            get(handlers::a002_customer::list).post(handlers::a002_customer::create),
        )
        .route("/add_customer", post(handlers::a002_customer::create))
        // Staff management
        .route("/staff", get(handlers::a003_staff::list))
        .route(
            "/add_staff",
            get(handlers::a003_staff::add_form).post(handlers::a003_staff::create),
        )
        .route(
            "/edit_staff/:id",
            get(handlers::a003_staff::edit_prefill).post(handlers::a003_staff::update),
        )
        // Inquiry pipeline
        .route(
            "/inquiries",
            get(handlers::a004_inquiry::list).post(handlers::a004_inquiry::update_from_list),
        )
        .route(
            "/add_inquiry",
            get(handlers::a004_inquiry::add_form).post(handlers::a004_inquiry::create_from_form),
        )
        .route("/inquiry/:id", get(handlers::a004_inquiry::detail))
        .route(
            "/update_status/:id",
            post(handlers::a004_inquiry::update_status),
        )
        .route("/suppliers", get(handlers::supplier_placeholder))
        .route(
            "/add_supplier",
            get(handlers::supplier_placeholder).post(handlers::supplier_submit),
        )
        // JSON API
        .route(
            "/api/inquiries",
            get(handlers::a004_inquiry::api_list).post(handlers::a004_inquiry::api_create),
        )
        .route(
            "/api/inquiries/:id",
            get(handlers::a004_inquiry::api_get).delete(handlers::a004_inquiry::api_delete),
        )
        .route(
            "/api/customer/:id/purchases",
            get(handlers::a004_inquiry::api_customer_purchases),
        )
        .layer(middleware::from_fn(
            system::auth::middleware::require_session,
        ));

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/",
            get(system::handlers::auth::login_page).post(system::handlers::auth::login),
        )
        .route("/logout", post(system::handlers::auth::logout))
        .merge(protected)
        .layer(middleware::from_fn(request_logger))
        .layer(cors);

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
