use zmarshal::zson::{MarshalOptions, Marshaler, NamingPolicy, Record, Result, Unmarshaler};
use zmarshal_testkit::{Animal, Plant, Thing, make};

#[derive(clap::Args)]
pub struct Args {
	/// Example number.
	#[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
	pub number: u8,
}

/// Run one numbered example and print its output.
pub fn run(args: Args) -> Result<()> {
	for line in lines(args.number)? {
		println!("{line}");
	}
	Ok(())
}

pub(crate) fn lines(number: u8) -> Result<Vec<String>> {
	match number {
		1 => marshal_pair(&simple()),
		2 => {
			let flamingo = round_trip_flamingo()?;
			Ok(vec![format!("The flamingo is {}", flamingo.color())])
		}
		3 => {
			let flamingo = round_trip_flamingo()?;
			Ok(vec![format!("The flamingo is an Animal? {}", flamingo.as_any().is::<Animal>())])
		}
		4 => {
			let mut marshaler = Marshaler::new();
			marshaler.decorate(NamingPolicy::Qualified);
			marshal_pair(&marshaler)
		}
		_ => {
			let mut marshaler = Marshaler::with_options(MarshalOptions {
				naming: NamingPolicy::Explicit,
				..MarshalOptions::default()
			});
			marshaler.named_bindings([("Plant.v0", Plant::descriptor()), ("Animal.v0", Animal::descriptor())])?;
			marshal_pair(&marshaler)
		}
	}
}

fn simple() -> Marshaler {
	let mut marshaler = Marshaler::new();
	marshaler.decorate(NamingPolicy::Simple);
	marshaler
}

fn marshal_pair(marshaler: &Marshaler) -> Result<Vec<String>> {
	["rose", "flamingo"]
		.into_iter()
		.filter_map(make)
		.map(|thing| marshaler.marshal(&thing))
		.collect()
}

fn round_trip_flamingo() -> Result<Box<dyn Thing>> {
	let flamingo: Box<dyn Thing> = Box::new(Animal {
		my_color: "pink".to_owned(),
	});
	let payload = simple().marshal(&flamingo)?;

	let mut unmarshaler = Unmarshaler::new();
	unmarshaler.bind::<Animal>()?;
	unmarshaler.bind::<Plant>()?;
	unmarshaler.unmarshal(&payload)
}

#[cfg(test)]
mod tests;
