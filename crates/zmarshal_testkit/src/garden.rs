use std::cell::RefCell;
use std::rc::Rc;
use std::sync::OnceLock;
use std::sync::mpsc::Sender;

use zmarshal::zson::{Record, TypeDescriptor, TypeIdent, Variant};

const PACKAGE: &str = "example.com/garden/main";

/// Anything in the garden that has a color.
pub trait Thing: Variant {
	/// Display color.
	fn color(&self) -> &str;
}
zmarshal::interface!(Thing);

/// A plant.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Plant {
	/// Color of the plant.
	pub my_color: String,
}

impl Thing for Plant {
	fn color(&self) -> &str {
		&self.my_color
	}
}

impl Record for Plant {
	fn descriptor() -> &'static TypeDescriptor {
		static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
		DESCRIPTOR.get_or_init(|| {
			TypeDescriptor::of::<Plant>(TypeIdent::new("main", "Plant").with_path(PACKAGE))
				.implements::<dyn Thing>(|plant| plant)
				.field("MyColor", |plant| &plant.my_color, |plant| &mut plant.my_color)
				.build()
		})
	}
}

/// An animal.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Animal {
	/// Color of the animal.
	pub my_color: String,
}

impl Thing for Animal {
	fn color(&self) -> &str {
		&self.my_color
	}
}

impl Record for Animal {
	fn descriptor() -> &'static TypeDescriptor {
		static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
		DESCRIPTOR.get_or_init(|| {
			TypeDescriptor::of::<Animal>(TypeIdent::new("main", "Animal").with_path(PACKAGE))
				.implements::<dyn Thing>(|animal| animal)
				.field("MyColor", |animal| &animal.my_color, |animal| &mut animal.my_color)
				.build()
		})
	}
}

/// Animal layout from before `Animal` was renamed; decodes `Animal.v0` payloads.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LegacyAnimal {
	/// Color of the animal.
	pub my_color: String,
}

impl Thing for LegacyAnimal {
	fn color(&self) -> &str {
		&self.my_color
	}
}

impl Record for LegacyAnimal {
	fn descriptor() -> &'static TypeDescriptor {
		static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
		DESCRIPTOR.get_or_init(|| {
			TypeDescriptor::of::<LegacyAnimal>(TypeIdent::new("main", "Animal").with_path(PACKAGE).with_version("v0"))
				.implements::<dyn Thing>(|animal| animal)
				.field("MyColor", |animal| &animal.my_color, |animal| &mut animal.my_color)
				.build()
		})
	}
}

/// Build a named thing: `rose`, `ivy` or `flamingo`.
pub fn make(which: &str) -> Option<Box<dyn Thing>> {
	let thing: Box<dyn Thing> = match which {
		"rose" => Box::new(Plant {
			my_color: "red".to_owned(),
		}),
		"ivy" => Box::new(Plant {
			my_color: "green".to_owned(),
		}),
		"flamingo" => Box::new(Animal {
			my_color: "pink".to_owned(),
		}),
		_ => return None,
	};
	Some(thing)
}

/// Descriptors of the current [`Thing`] implementations.
pub fn thing_descriptors() -> [&'static TypeDescriptor; 2] {
	[Animal::descriptor(), Plant::descriptor()]
}

/// Person looking after a garden.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Gardener {
	/// Name of the gardener.
	pub name: String,
	/// Years on the job.
	pub years: u32,
}

impl Record for Gardener {
	fn descriptor() -> &'static TypeDescriptor {
		static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
		DESCRIPTOR.get_or_init(|| {
			TypeDescriptor::of::<Gardener>(TypeIdent::new("main", "Gardener").with_path(PACKAGE))
				.field("name", |gardener| &gardener.name, |gardener| &mut gardener.name)
				.field("years", |gardener| &gardener.years, |gardener| &mut gardener.years)
				.build()
		})
	}
}

/// A garden: concrete and interface-typed members side by side.
#[derive(Debug, Default)]
pub struct Garden {
	/// Garden name.
	pub name: String,
	/// Everything planted or living here.
	pub things: Vec<Box<dyn Thing>>,
	/// Optional showpiece.
	pub centerpiece: Option<Box<dyn Thing>>,
	/// Who looks after it.
	pub gardener: Gardener,
}

impl Record for Garden {
	fn descriptor() -> &'static TypeDescriptor {
		static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
		DESCRIPTOR.get_or_init(|| {
			TypeDescriptor::of::<Garden>(TypeIdent::new("main", "Garden").with_path(PACKAGE))
				.field("name", |garden| &garden.name, |garden| &mut garden.name)
				.field("things", |garden| &garden.things, |garden| &mut garden.things)
				.field("centerpiece", |garden| &garden.centerpiece, |garden| &mut garden.centerpiece)
				.field("gardener", |garden| &garden.gardener, |garden| &mut garden.gardener)
				.build()
		})
	}
}

/// Node of a shared, possibly cyclic, chain.
#[derive(Debug, Default)]
pub struct Link {
	/// Node label.
	pub label: String,
	/// Following node, shared.
	pub next: Option<Rc<RefCell<Link>>>,
}

impl Record for Link {
	fn descriptor() -> &'static TypeDescriptor {
		static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
		DESCRIPTOR.get_or_init(|| {
			TypeDescriptor::of::<Link>(TypeIdent::new("main", "Link").with_path(PACKAGE))
				.field("label", |link| &link.label, |link| &mut link.label)
				.field("next", |link| &link.next, |link| &mut link.next)
				.build()
		})
	}
}

impl Link {
	/// Shared node labelled `label` with no successor.
	pub fn shared(label: &str) -> Rc<RefCell<Link>> {
		Rc::new(RefCell::new(Link {
			label: label.to_owned(),
			next: None,
		}))
	}
}

/// Record holding a channel, which has no text form.
#[derive(Debug, Default)]
pub struct Walkie {
	/// Call sign.
	pub callsign: String,
	/// Outgoing channel.
	pub channel: Option<Sender<String>>,
}

impl Record for Walkie {
	fn descriptor() -> &'static TypeDescriptor {
		static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
		DESCRIPTOR.get_or_init(|| {
			TypeDescriptor::of::<Walkie>(TypeIdent::new("main", "Walkie").with_path(PACKAGE))
				.field("callsign", |walkie| &walkie.callsign, |walkie| &mut walkie.callsign)
				.field("channel", |walkie| &walkie.channel, |walkie| &mut walkie.channel)
				.build()
		})
	}
}

/// Record holding a function, which has no text form.
#[derive(Debug, Default)]
pub struct Sprinkler {
	/// Irrigation zone.
	pub zone: u32,
	/// Schedule callback.
	pub timer: Option<fn() -> u32>,
}

impl Record for Sprinkler {
	fn descriptor() -> &'static TypeDescriptor {
		static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
		DESCRIPTOR.get_or_init(|| {
			TypeDescriptor::of::<Sprinkler>(TypeIdent::new("main", "Sprinkler").with_path(PACKAGE))
				.field("zone", |sprinkler| &sprinkler.zone, |sprinkler| &mut sprinkler.zone)
				.field("timer", |sprinkler| &sprinkler.timer, |sprinkler| &mut sprinkler.timer)
				.build()
		})
	}
}
