use clap::ValueEnum;
use serde::Serialize;
use zmarshal::zson::{DecorationScope, NamingPolicy, Record, TypeDescriptor, Value};
use zmarshal_testkit::{Animal, Garden, Gardener, LegacyAnimal, Plant, make};

/// Naming policy flag.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub(crate) enum Style {
	#[default]
	Simple,
	Qualified,
	Full,
	Explicit,
}

impl From<Style> for NamingPolicy {
	fn from(style: Style) -> Self {
		match style {
			Style::Simple => NamingPolicy::Simple,
			Style::Qualified => NamingPolicy::Qualified,
			Style::Full => NamingPolicy::Full,
			Style::Explicit => NamingPolicy::Explicit,
		}
	}
}

/// Decoration scope flag.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub(crate) enum Scope {
	#[default]
	Ambiguous,
	RootOnly,
	Every,
}

impl From<Scope> for DecorationScope {
	fn from(scope: Scope) -> Self {
		match scope {
			Scope::Ambiguous => DecorationScope::Ambiguous,
			Scope::RootOnly => DecorationScope::RootOnly,
			Scope::Every => DecorationScope::Every,
		}
	}
}

/// Garden record types addressable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Kind {
	Plant,
	Animal,
	LegacyAnimal,
	Garden,
	Gardener,
}

impl Kind {
	pub(crate) fn descriptor(self) -> &'static TypeDescriptor {
		match self {
			Kind::Plant => Plant::descriptor(),
			Kind::Animal => Animal::descriptor(),
			Kind::LegacyAnimal => LegacyAnimal::descriptor(),
			Kind::Garden => Garden::descriptor(),
			Kind::Gardener => Gardener::descriptor(),
		}
	}
}

/// `NAME=KIND` pair from a `--bind` flag.
#[derive(Clone, Debug)]
pub(crate) struct NamedKind {
	pub(crate) name: String,
	pub(crate) kind: Kind,
}

/// Parse a `NAME=KIND` flag value.
pub(crate) fn parse_named_kind(value: &str) -> Result<NamedKind, String> {
	let (name, kind) = value.split_once('=').ok_or_else(|| format!("expected NAME=KIND, got {value:?}"))?;
	if name.is_empty() {
		return Err(format!("empty type name in {value:?}"));
	}
	let kind = Kind::from_str(kind, true)?;
	Ok(NamedKind {
		name: name.to_owned(),
		kind,
	})
}

/// Sample garden used by `marshal garden`.
pub(crate) fn sample_garden() -> Garden {
	Garden {
		name: "back".to_owned(),
		things: ["rose", "flamingo"].into_iter().filter_map(make).collect(),
		centerpiece: make("ivy"),
		gardener: Gardener {
			name: "Sam".to_owned(),
			years: 12,
		},
	}
}

/// Convert a value tree into JSON for `--json` output.
pub(crate) fn value_json(value: &Value) -> serde_json::Value {
	match value {
		Value::Null => serde_json::Value::Null,
		Value::Bool(v) => serde_json::Value::Bool(*v),
		Value::I64(v) => serde_json::Value::from(*v),
		Value::U64(v) => serde_json::Value::from(*v),
		Value::F64(v) => serde_json::Number::from_f64(*v).map_or_else(|| serde_json::Value::String(v.to_string()), serde_json::Value::Number),
		Value::String(v) => serde_json::Value::String(v.to_string()),
		Value::Array(items) => serde_json::Value::Array(items.iter().map(value_json).collect()),
		Value::Record(record) => {
			let fields = record
				.fields
				.iter()
				.map(|field| serde_json::json!({ "name": field.name.as_ref(), "value": value_json(&field.value) }))
				.collect::<Vec<_>>();
			serde_json::json!({ "decoration": record.decoration.as_deref(), "fields": fields })
		}
	}
}

/// Print one pretty JSON document to stdout.
pub(crate) fn emit_json(payload: &impl Serialize) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: failed to encode json output: {err}"),
	}
}

#[cfg(test)]
mod tests {
	use super::{Kind, parse_named_kind};

	#[test]
	fn parses_name_kind_pairs() {
		let named = parse_named_kind("Animal.v0=legacy-animal").expect("pair parses");
		assert_eq!(named.name, "Animal.v0");
		assert_eq!(named.kind, Kind::LegacyAnimal);

		assert!(parse_named_kind("Animal").is_err());
		assert!(parse_named_kind("=Plant").is_err());
		assert!(parse_named_kind("Tree=Oak").is_err());
	}
}
