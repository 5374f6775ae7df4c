use zmarshal::zson::{Result, WriteOptions, parse, write};

use crate::cmd::util::{emit_json, value_json};

#[derive(clap::Args)]
pub struct Args {
	pub payload: String,
	#[arg(long, default_value_t = 0)]
	pub indent: usize,
	#[arg(long)]
	pub json: bool,
}

/// Parse a payload and print it back in normalized form.
pub fn run(args: Args) -> Result<()> {
	let Args { payload, indent, json } = args;
	let tree = parse(&payload)?;

	if json {
		emit_json(&value_json(&tree));
		return Ok(());
	}

	println!("{}", write(&tree, &WriteOptions { indent }));
	Ok(())
}
