use tracing_subscriber::EnvFilter;

fn is_json_mode_args() -> bool {
    std::env::args().any(|arg| arg == "--json")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!is_json_mode_args())
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env early; ignore if missing.
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(err) = catalog_search::run().await {
        if is_json_mode_args() {
            let payload = serde_json::json!({
                "error": { "message": format!("{err:#}") }
            });
            eprintln!("{payload}");
        } else {
            eprintln!("{err:#}");
        }
        std::process::exit(1);
    }
}
