use clap::Parser;
use wordquest_api::Config;

mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()>
{
	if let Err(error) = dotenvy::dotenv() {
		eprintln!("WARNING: failed to load `.env` file: {error}");
	}

	let config = Config::parse();
	let _guard = logging::init(config.log_dir.as_deref())?;

	tracing::debug!(?config, "loaded configuration");

	wordquest_api::run(config).await
}
