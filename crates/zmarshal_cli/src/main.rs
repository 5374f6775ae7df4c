#![allow(missing_docs)]

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "zmarshal", about = "Type-tagged marshaling demonstrations")]
struct Cli {
	/// Raise log verbosity (-v info, -vv debug, -vvv trace).
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Run one of the numbered walkthrough examples.
	Example(cmd::example::Args),
	/// Marshal a garden thing to decorated text.
	Marshal(cmd::marshal::Args),
	/// Unmarshal decorated text into a garden thing.
	Unmarshal(cmd::unmarshal::Args),
	/// Parse text and show its value tree.
	Parse(cmd::parse::Args),
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run(command: Commands) -> zmarshal::zson::Result<()> {
	match command {
		Commands::Example(args) => cmd::example::run(args),
		Commands::Marshal(args) => cmd::marshal::run(args),
		Commands::Unmarshal(args) => cmd::unmarshal::run(args),
		Commands::Parse(args) => cmd::parse::run(args),
	}
}

fn init_tracing(verbose: u8) {
	let level = match verbose {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}
