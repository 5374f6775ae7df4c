use serde::Serialize;
use tracing::info;
use zmarshal::zson::{RegistryOptions, Result, UnmarshalOptions, Unmarshaler};
use zmarshal_testkit::{Thing, thing_descriptors};

use crate::cmd::util::{NamedKind, Style, emit_json, parse_named_kind};

#[derive(clap::Args)]
pub struct Args {
	pub payload: String,
	/// Type name binding, as NAME=KIND; repeatable. Without any, Animal and
	/// Plant are bound under the `--style` names.
	#[arg(long = "bind", value_name = "NAME=KIND", value_parser = parse_named_kind)]
	pub bindings: Vec<NamedKind>,
	#[arg(long, value_enum, default_value_t)]
	pub style: Style,
	/// Reject fields the bound type does not declare.
	#[arg(long)]
	pub strict: bool,
	#[arg(long)]
	pub json: bool,
}

/// Decode a payload into a garden thing and describe it.
pub fn run(args: Args) -> Result<()> {
	let Args {
		payload,
		bindings,
		style,
		strict,
		json,
	} = args;

	let registry_options = RegistryOptions {
		naming: style.into(),
		..RegistryOptions::default()
	};
	let options = if strict { UnmarshalOptions::strict() } else { UnmarshalOptions::default() };
	let mut unmarshaler = Unmarshaler::with_registry_options(registry_options, options);

	let registry = unmarshaler.registry_mut();
	if bindings.is_empty() {
		registry.register_descriptors(thing_descriptors())?;
	}
	for binding in &bindings {
		registry.register_named(&binding.name, binding.kind.descriptor())?;
	}
	info!(bindings = registry.len(), strict, "unmarshaling payload");

	let thing: Box<dyn Thing> = unmarshaler.unmarshal(&payload)?;
	let type_name = thing.type_descriptor().short_name();

	if json {
		emit_json(&UnmarshalJson {
			type_name,
			color: thing.color().to_owned(),
			naming: unmarshaler.registry().options().naming.label(),
			bindings: unmarshaler.registry().names().into_iter().map(str::to_owned).collect(),
		});
		return Ok(());
	}

	println!("type: {type_name}");
	println!("color: {}", thing.color());
	Ok(())
}

#[derive(Serialize)]
struct UnmarshalJson {
	#[serde(rename = "type")]
	type_name: &'static str,
	color: String,
	naming: &'static str,
	bindings: Vec<String>,
}

#[cfg(test)]
mod tests;
