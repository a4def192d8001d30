//! Relic REST API Server
//!
//! Run with: cargo run --features server --bin relic-server
//!
//! Endpoints:
//!   GET    /v2/resources/types    - List resource types (optional ?resource_type=X)
//!   POST   /v2/resources/types    - Create resource type
//!   DELETE /v2/resources/types    - Soft-delete resource type (?resourcetype_id=N)
//!   POST   /v2/resources          - Create dependent resource
//!   PUT    /v2/admin/restore      - Restore a deleted item
//!   POST   /v2/user/login         - Login, returns bearer token
//!   POST   /v2/user/logout        - Revoke the presented token

use relic::{bootstrap, init, server};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();

    let mut db_path = std::env::var("RELIC_DB").unwrap_or_else(|_| "./data/relic.mdb".into());
    let mut port: u16 = 3000;

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db-path" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    port = args[i + 1].parse().unwrap_or(3000);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("relic-server - restorable soft-delete content store\n");
                println!("USAGE:");
                println!("    relic-server [OPTIONS]\n");
                println!("OPTIONS:");
                println!("    -d, --db-path <PATH>  Database path (default: ./data/relic.mdb)");
                println!("    -p, --port <PORT>     Listen on PORT (default: 3000)");
                println!("    -h, --help            Show this help message\n");
                println!("ENVIRONMENT:");
                println!("    RELIC_DB              Database path");
                println!("    RELIC_SUPER_USER      Super admin email");
                println!("    RELIC_SUPER_PASSWORD  Super admin password");
                return;
            }
            _ => {}
        }
        i += 1;
    }

    init(&db_path).expect("Failed to initialize database");
    tracing::info!("database initialized at {}", db_path);

    let super_email =
        std::env::var("RELIC_SUPER_USER").unwrap_or_else(|_| "admin@relic.dev".into());
    let super_password = match std::env::var("RELIC_SUPER_PASSWORD") {
        Ok(p) => p,
        Err(_) => {
            tracing::warn!("RELIC_SUPER_PASSWORD not set, using a development default");
            "relic-dev-password".into()
        }
    };
    bootstrap::seed(&super_email, &super_password).expect("Failed to seed store");

    let app = server::router();
    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("relic-server v{} listening on {}", env!("CARGO_PKG_VERSION"), addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
