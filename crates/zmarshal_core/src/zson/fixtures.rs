//! Small record types shared by the unit tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::OnceLock;
use std::sync::mpsc::Sender;

use crate::zson::{Record, TypeDescriptor, TypeIdent, Variant};

pub(crate) trait Pet: Variant {
	fn sound(&self) -> &str;
	fn name(&self) -> &str;
}
crate::interface!(Pet);

#[derive(Debug, Default)]
pub(crate) struct Dog {
	pub name: String,
	pub age: u8,
}

impl Pet for Dog {
	fn sound(&self) -> &str {
		"woof"
	}

	fn name(&self) -> &str {
		&self.name
	}
}

impl Record for Dog {
	fn descriptor() -> &'static TypeDescriptor {
		static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
		DESCRIPTOR.get_or_init(|| {
			TypeDescriptor::of::<Dog>(TypeIdent::new("zoo", "Dog").with_path("example.com/zoo"))
				.implements::<dyn Pet>(|dog| dog)
				.field("name", |dog| &dog.name, |dog| &mut dog.name)
				.field("age", |dog| &dog.age, |dog| &mut dog.age)
				.build()
		})
	}
}

#[derive(Debug, Default)]
pub(crate) struct Cat {
	pub name: String,
	pub lives: i32,
}

impl Pet for Cat {
	fn sound(&self) -> &str {
		"meow"
	}

	fn name(&self) -> &str {
		&self.name
	}
}

impl Record for Cat {
	fn descriptor() -> &'static TypeDescriptor {
		static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
		DESCRIPTOR.get_or_init(|| {
			TypeDescriptor::of::<Cat>(TypeIdent::new("zoo", "Cat"))
				.implements::<dyn Pet>(|cat| cat)
				.field("name", |cat| &cat.name, |cat| &mut cat.name)
				.field("lives", |cat| &cat.lives, |cat| &mut cat.lives)
				.build()
		})
	}
}

/// Same simple name as [`Dog`], different namespace.
#[derive(Debug, Default)]
pub(crate) struct FarmDog {
	pub name: String,
}

impl Pet for FarmDog {
	fn sound(&self) -> &str {
		"arf"
	}

	fn name(&self) -> &str {
		&self.name
	}
}

impl Record for FarmDog {
	fn descriptor() -> &'static TypeDescriptor {
		static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
		DESCRIPTOR.get_or_init(|| {
			TypeDescriptor::of::<FarmDog>(TypeIdent::new("farm", "Dog"))
				.implements::<dyn Pet>(|dog| dog)
				.field("name", |dog| &dog.name, |dog| &mut dog.name)
				.build()
		})
	}
}

#[derive(Debug, Default)]
pub(crate) struct Keeper {
	pub name: String,
	pub rating: f64,
}

impl Record for Keeper {
	fn descriptor() -> &'static TypeDescriptor {
		static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
		DESCRIPTOR.get_or_init(|| {
			TypeDescriptor::of::<Keeper>(TypeIdent::new("zoo", "Keeper"))
				.field("name", |keeper| &keeper.name, |keeper| &mut keeper.name)
				.field("rating", |keeper| &keeper.rating, |keeper| &mut keeper.rating)
				.build()
		})
	}
}

#[derive(Debug, Default)]
pub(crate) struct Kennel {
	pub label: String,
	pub pets: Vec<Box<dyn Pet>>,
	pub favourite: Option<Box<dyn Pet>>,
	pub keeper: Keeper,
}

impl Record for Kennel {
	fn descriptor() -> &'static TypeDescriptor {
		static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
		DESCRIPTOR.get_or_init(|| {
			TypeDescriptor::of::<Kennel>(TypeIdent::new("zoo", "Kennel"))
				.field("label", |kennel| &kennel.label, |kennel| &mut kennel.label)
				.field("pets", |kennel| &kennel.pets, |kennel| &mut kennel.pets)
				.field("favourite", |kennel| &kennel.favourite, |kennel| &mut kennel.favourite)
				.field("keeper", |kennel| &kennel.keeper, |kennel| &mut kennel.keeper)
				.build()
		})
	}
}

#[derive(Debug, Default)]
pub(crate) struct Node {
	pub value: i64,
	pub next: Option<Rc<RefCell<Node>>>,
}

impl Record for Node {
	fn descriptor() -> &'static TypeDescriptor {
		static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
		DESCRIPTOR.get_or_init(|| {
			TypeDescriptor::of::<Node>(TypeIdent::new("zoo", "Node"))
				.field("value", |node| &node.value, |node| &mut node.value)
				.field("next", |node| &node.next, |node| &mut node.next)
				.build()
		})
	}
}

#[derive(Debug, Default)]
pub(crate) struct Radio {
	pub channel: Option<Sender<String>>,
}

impl Record for Radio {
	fn descriptor() -> &'static TypeDescriptor {
		static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
		DESCRIPTOR.get_or_init(|| {
			TypeDescriptor::of::<Radio>(TypeIdent::new("zoo", "Radio"))
				.field("channel", |radio| &radio.channel, |radio| &mut radio.channel)
				.build()
		})
	}
}

pub(crate) fn dog(name: &str, age: u8) -> Box<dyn Pet> {
	Box::new(Dog { name: name.to_owned(), age })
}

pub(crate) fn cat(name: &str, lives: i32) -> Box<dyn Pet> {
	Box::new(Cat { name: name.to_owned(), lives })
}

pub(crate) fn kennel() -> Kennel {
	Kennel {
		label: "north".to_owned(),
		pets: vec![dog("Rex", 3), cat("Tom", 9)],
		favourite: None,
		keeper: Keeper {
			name: "Ann".to_owned(),
			rating: 4.5,
		},
	}
}

/// Chain of `values.len()` shared nodes.
pub(crate) fn chain(values: &[i64]) -> Rc<RefCell<Node>> {
	let mut next = None;
	for &value in values.iter().rev() {
		next = Some(Rc::new(RefCell::new(Node { value, next })));
	}
	next.unwrap_or_default()
}
