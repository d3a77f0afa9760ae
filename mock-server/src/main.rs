use env_logger::Env;
use log::info;
use mock_server::NewCountry;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let seed: Vec<NewCountry> = match std::env::var("SEED_FILE") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)?;
            let seed: Vec<NewCountry> = serde_json::from_str(&raw)?;
            info!("seeding {} countries from {path}", seed.len());
            seed
        }
        Err(_) => Vec::new(),
    };

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!("listening on {addr}");
    mock_server::run_with_seed(listener, seed).await
}
