use serde::Serialize;
use zmarshal::zson::{MarshalOptions, Marshaler, Result, WriteOptions, write};
use zmarshal_testkit::{Animal, Plant, Thing};

use crate::cmd::util::{NamedKind, Scope, Style, emit_json, parse_named_kind, sample_garden};

/// What to marshal.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Subject {
	Rose,
	Ivy,
	Flamingo,
	Garden,
}

#[derive(clap::Args)]
pub struct Args {
	pub subject: Subject,
	#[arg(long, value_enum, default_value_t)]
	pub style: Style,
	#[arg(long, value_enum, default_value_t)]
	pub scope: Scope,
	#[arg(long, default_value_t = 0)]
	pub indent: usize,
	/// Explicit type name, as NAME=KIND; repeatable.
	#[arg(long = "bind", value_name = "NAME=KIND", value_parser = parse_named_kind)]
	pub bindings: Vec<NamedKind>,
	#[arg(long)]
	pub json: bool,
}

/// Marshal a sample value and print the text.
pub fn run(args: Args) -> Result<()> {
	let Args {
		subject,
		style,
		scope,
		indent,
		bindings,
		json,
	} = args;

	let mut marshaler = Marshaler::with_options(MarshalOptions {
		naming: style.into(),
		scope: scope.into(),
		indent,
		..MarshalOptions::default()
	});
	marshaler.named_bindings(bindings.iter().map(|binding| (binding.name.as_str(), binding.kind.descriptor())))?;

	let tree = match subject {
		Subject::Rose => marshaler.encode(&plant("red"))?,
		Subject::Ivy => marshaler.encode(&plant("green"))?,
		Subject::Flamingo => marshaler.encode(&animal("pink"))?,
		Subject::Garden => marshaler.encode(&sample_garden())?,
	};
	let text = write(&tree, &WriteOptions { indent });

	if json {
		emit_json(&MarshalJson {
			subject: label(subject),
			style: marshaler.options().naming.label(),
			decoration: tree.decoration().map(str::to_owned),
			text,
		});
		return Ok(());
	}

	println!("{text}");
	Ok(())
}

#[derive(Serialize)]
struct MarshalJson {
	subject: &'static str,
	style: &'static str,
	decoration: Option<String>,
	text: String,
}

fn plant(color: &str) -> Box<dyn Thing> {
	Box::new(Plant {
		my_color: color.to_owned(),
	})
}

fn animal(color: &str) -> Box<dyn Thing> {
	Box::new(Animal {
		my_color: color.to_owned(),
	})
}

fn label(subject: Subject) -> &'static str {
	match subject {
		Subject::Rose => "rose",
		Subject::Ivy => "ivy",
		Subject::Flamingo => "flamingo",
		Subject::Garden => "garden",
	}
}
