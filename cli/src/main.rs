use std::io;

use country_cli::{Session, UreqTransport, DEFAULT_API_URL};
use country_core::{CountryClient, CountryListClient};
use env_logger::Env;
use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let base_url = std::env::var("COUNTRY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    info!("using {base_url}");

    let transport = UreqTransport::new();
    let controller = CountryListClient::new(CountryClient::new(&base_url));
    let mut session = Session::new(controller, &transport);
    session.run(io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}
