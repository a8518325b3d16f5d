mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{ErrorLevel, Verbosity};

#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about,
	long_about = None,
	propagate_version = true,
	disable_help_subcommand = true,
)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[command(flatten)]
	verbose: Verbosity<ErrorLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
	#[clap(alias = "server")]
	/// Serve the record API, the map layers and static files via http
	Serve(tools::serve::Subcommand),

	/// Load all map layers once and print a summary
	Load(tools::load::Subcommand),

	/// Check a single GeoJSON file
	Check(tools::check::Subcommand),
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	env_logger::Builder::new()
		.filter_level(cli.verbose.log_level_filter())
		.format_timestamp(None)
		.init();

	run(cli)
}

fn run(cli: Cli) -> Result<()> {
	match &cli.command {
		Commands::Serve(arguments) => tools::serve::run(arguments),
		Commands::Load(arguments) => tools::load::run(arguments),
		Commands::Check(arguments) => tools::check::run(arguments),
	}
}

#[cfg(test)]
mod tests {
	use crate::{Cli, run};
	use anyhow::Result;
	use clap::Parser;

	pub fn run_command(arg_vec: Vec<&str>) -> Result<String> {
		let cli = Cli::try_parse_from(arg_vec)?;
		let msg = format!("{cli:?}");
		run(cli)?;
		Ok(msg)
	}

	#[test]
	fn help() {
		let err = run_command(vec!["geoinfra"]).unwrap_err().to_string();
		assert!(err.starts_with("Loads, cleans and serves transportation infrastructure layers and records for Brazil."));
		assert!(err.contains("\nUsage: geoinfra [OPTIONS] <COMMAND>"));
	}

	#[test]
	fn version() {
		let err = run_command(vec!["geoinfra", "-V"]).unwrap_err().to_string();
		assert!(err.starts_with("geoinfra "));
	}

	#[test]
	fn check_subcommand() {
		let output = run_command(vec!["geoinfra", "check"]).unwrap_err().to_string();
		assert!(output.contains("Usage: geoinfra check"));
	}
}
