use anyhow::{Context, Result};
use geoinfra::{Config, server::MapServer};
use std::path::PathBuf;
use tokio::time::{Duration, sleep};

#[derive(clap::Args, Debug)]
#[command(disable_version_flag = true, verbatim_doc_comment)]
pub struct Subcommand {
	/// Path to a configuration file (YAML) for server, CORS, data, store and layers.
	/// Command line arguments override configuration file settings.
	#[arg(short = 'c', long, value_name = "FILE", display_order = 0)]
	pub config: Option<PathBuf>,

	/// Serve via socket ip. Default: 0.0.0.0
	#[arg(short = 'i', long, display_order = 0)]
	pub ip: Option<String>,

	/// Serve via port. Default: 8080
	#[arg(short, long, display_order = 0)]
	pub port: Option<u16>,

	/// Folder served at "http:/.../", e.g. the dashboard with its "dados" folder.
	/// Layer files are read from here unless --data-base is given.
	#[arg(short = 'd', long, value_name = "DIR", verbatim_doc_comment, display_order = 1)]
	pub data_folder: Option<PathBuf>,

	/// Read layer files from this URL or folder instead.
	#[arg(short = 'b', long, value_name = "BASE", display_order = 1)]
	pub data_base: Option<String>,

	/// Shutdown server automatically after x milliseconds.
	#[arg(long, display_order = 4)]
	pub auto_shutdown: Option<u64>,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	let mut config = if let Some(config_path) = &arguments.config {
		Config::from_path(config_path)?
	} else {
		Config::default()
	};

	config.server.override_optional_ip(&arguments.ip);
	config.server.override_optional_port(&arguments.port);
	config.data.override_optional_folder(&arguments.data_folder);
	config.data.override_optional_base(&arguments.data_base);

	let mut server = MapServer::from_config(&config)?;
	server.start().await?;

	if let Some(milliseconds) = arguments.auto_shutdown {
		sleep(Duration::from_millis(milliseconds)).await;
	} else {
		tokio::signal::ctrl_c().await.context("waiting for ctrl-c")?;
	}

	server.stop().await;
	Ok(())
}
