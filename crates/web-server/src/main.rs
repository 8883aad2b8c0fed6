use configuration::ServerSettings;

// This main function is the entry point when running `cargo run -p web-server`.
// Its only job is to prepare settings and tracing, then call `run_server`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let settings = ServerSettings::from_env()?;
    let _guard = configuration::logging::init_tracing(settings.log_dir.as_deref());

    web_server::run_server(settings).await
}
