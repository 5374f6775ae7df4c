mod unit_marshal_naming {

	use crate::zson::fixtures::{Cat, Dog, dog};
	use crate::zson::{MarshalOptions, Marshaler, NamingPolicy, Record, ZsonError};

	#[test]
	fn root_record_carries_simple_name() {
		let text = Marshaler::new()
			.marshal(&Dog {
				name: "Rex".to_owned(),
				age: 3,
			})
			.expect("dog marshals");
		assert_eq!(text, r#"{name:"Rex",age:3}(=Dog)"#);
	}

	#[test]
	fn policy_changes_the_decoration_only() {
		let rex = Dog {
			name: "Rex".to_owned(),
			age: 3,
		};
		let mut marshaler = Marshaler::new();

		marshaler.decorate(NamingPolicy::Qualified);
		assert_eq!(marshaler.marshal(&rex).expect("qualified"), r#"{name:"Rex",age:3}(=zoo.Dog)"#);

		marshaler.decorate(NamingPolicy::Full);
		assert_eq!(marshaler.marshal(&rex).expect("full"), r#"{name:"Rex",age:3}(=example.com/zoo.Dog)"#);

		let cat = Cat {
			name: "Tom".to_owned(),
			lives: 9,
		};
		assert_eq!(marshaler.marshal(&cat).expect("full without path"), r#"{name:"Tom",lives:9}(=zoo.Cat)"#);
	}

	#[test]
	fn explicit_policy_requires_a_bound_name() {
		let mut marshaler = Marshaler::with_options(MarshalOptions {
			naming: NamingPolicy::Explicit,
			..MarshalOptions::default()
		});
		let rex = Dog::default();

		let err = marshaler.marshal(&rex).expect_err("unnamed type fails");
		assert!(matches!(err, ZsonError::UnnamedType { type_name } if type_name.ends_with("Dog")));

		marshaler.bind_name::<Dog>("Dog.v1").expect("name binds");
		assert_eq!(marshaler.marshal(&rex).expect("named"), r#"{name:"",age:0}(=Dog.v1)"#);
	}

	#[test]
	fn bound_name_overrides_any_policy() {
		let mut marshaler = Marshaler::new();
		marshaler.bind_name::<Dog>("canine").expect("name binds");
		marshaler.decorate(NamingPolicy::Qualified);
		assert_eq!(marshaler.type_name(Dog::descriptor()).expect("name").as_ref(), "canine");
		assert_eq!(marshaler.type_name(Cat::descriptor()).expect("name").as_ref(), "zoo.Cat");
	}

	#[test]
	fn rebinding_releases_the_old_name() {
		let mut marshaler = Marshaler::new();
		marshaler.bind_name::<Dog>("A").expect("first bind");

		let err = marshaler.bind_name::<Cat>("A").expect_err("name taken");
		assert!(matches!(err, ZsonError::NameCollision { ref name, .. } if name == "A"));

		marshaler.bind_name::<Dog>("B").expect("rebind");
		marshaler.bind_name::<Cat>("A").expect("name released");
		assert_eq!(marshaler.bound_names(), [("A", "Cat"), ("B", "Dog")]);
	}

	#[test]
	fn interface_root_is_decorated() {
		let pet = dog("Rex", 3);
		let marshaler = Marshaler::new();
		assert_eq!(marshaler.marshal(&pet).expect("boxed pet"), r#"{name:"Rex",age:3}(=Dog)"#);
		assert_eq!(marshaler.marshal(&*pet).expect("dyn pet"), r#"{name:"Rex",age:3}(=Dog)"#);
	}

	#[test]
	fn invalid_bound_name_is_rejected() {
		let err = Marshaler::new().bind_name::<Dog>("").expect_err("empty name");
		assert!(matches!(err, ZsonError::InvalidTypeName { .. }));
	}
}

mod unit_marshal_scope {

	use crate::zson::fixtures::{FarmDog, Kennel, dog, kennel};
	use crate::zson::{DecorationScope, MarshalOptions, Marshaler, ZsonError};

	fn marshal_with(scope: DecorationScope, value: &Kennel) -> String {
		Marshaler::with_options(MarshalOptions {
			scope,
			..MarshalOptions::default()
		})
		.marshal(value)
		.expect("kennel marshals")
	}

	#[test]
	fn interface_slots_are_decorated_by_default() {
		assert_eq!(
			marshal_with(DecorationScope::Ambiguous, &kennel()),
			r#"{label:"north",pets:[{name:"Rex",age:3}(=Dog),{name:"Tom",lives:9}(=Cat)],favourite:null,keeper:{name:"Ann",rating:4.5}}(=Kennel)"#
		);
	}

	#[test]
	fn root_only_scope_leaves_nested_records_bare() {
		assert_eq!(
			marshal_with(DecorationScope::RootOnly, &kennel()),
			r#"{label:"north",pets:[{name:"Rex",age:3},{name:"Tom",lives:9}],favourite:null,keeper:{name:"Ann",rating:4.5}}(=Kennel)"#
		);
	}

	#[test]
	fn every_scope_decorates_concrete_slots_too() {
		let text = marshal_with(DecorationScope::Every, &kennel());
		assert!(text.contains(r#"keeper:{name:"Ann",rating:4.5}(=Keeper)"#), "text: {text}");
	}

	#[test]
	fn distinct_types_sharing_a_name_collide() {
		let mut value = kennel();
		value.favourite = Some(Box::new(FarmDog { name: "Bo".to_owned() }));

		let err = Marshaler::new().marshal(&value).expect_err("two types named Dog");
		match err {
			ZsonError::NameCollision { name, first, second } => {
				assert_eq!(name, "Dog");
				assert!(first.ends_with("::Dog"), "first: {first}");
				assert!(second.ends_with("::FarmDog"), "second: {second}");
			}
			other => panic!("expected NameCollision, got {other:?}"),
		}
	}

	#[test]
	fn same_type_may_appear_many_times() {
		let mut value = kennel();
		value.favourite = Some(dog("Rex", 3));
		value.pets.push(dog("Max", 1));
		let text = Marshaler::new().marshal(&value).expect("repeated type marshals");
		assert_eq!(text.matches("(=Dog)").count(), 3);
	}

	#[test]
	fn output_is_deterministic() {
		let marshaler = Marshaler::new();
		let first = marshaler.marshal(&kennel()).expect("first");
		let second = marshaler.marshal(&kennel()).expect("second");
		assert_eq!(first, second);
	}

	#[test]
	fn pretty_output_indents_fields() {
		let text = Marshaler::with_options(MarshalOptions::pretty()).marshal(&kennel()).expect("pretty");
		assert!(text.starts_with("{\n    label: \"north\",\n    pets: ["), "text: {text}");
		assert!(text.ends_with("\n}(=Kennel)"), "text: {text}");
	}
}

mod unit_marshal_failures {

	use crate::zson::fixtures::{Node, Radio, chain};
	use crate::zson::{MarshalOptions, Marshaler, ZsonError};

	#[test]
	fn cycles_are_reported_with_their_path() {
		let head = chain(&[1, 2]);
		let tail = head.borrow().next.clone().expect("second node");
		tail.borrow_mut().next = Some(head.clone());

		let err = Marshaler::new().marshal(&head).expect_err("cycle fails");
		match &err {
			ZsonError::CyclicValue { path, type_name } => {
				assert_eq!(path, "next.next");
				assert_eq!(type_name, "Node");
			}
			other => panic!("expected CyclicValue, got {other:?}"),
		}

		tail.borrow_mut().next = None;
	}

	#[test]
	fn acyclic_shared_nodes_encode() {
		let text = Marshaler::new().marshal(&chain(&[1, 2, 3])).expect("chain marshals");
		assert_eq!(text, "{value:1,next:{value:2,next:{value:3,next:null}}}(=Node)");
	}

	#[test]
	fn unsupported_fields_fail_even_when_empty() {
		let err = Marshaler::new().marshal(&Radio::default()).expect_err("channel field fails");
		match err {
			ZsonError::UnsupportedType { path, kind } => {
				assert_eq!(path, "channel");
				assert_eq!(kind, "channel");
			}
			other => panic!("expected UnsupportedType, got {other:?}"),
		}
	}

	#[test]
	fn nesting_beyond_the_limit_fails() {
		let marshaler = Marshaler::with_options(MarshalOptions {
			max_depth: 2,
			..MarshalOptions::default()
		});
		marshaler.marshal(&chain(&[1, 2])).expect("two levels fit");

		let err = marshaler.marshal(&chain(&[1, 2, 3])).expect_err("three levels do not");
		assert!(matches!(err, ZsonError::DepthExceeded { max_depth: 2 }));
	}

	#[test]
	fn empty_record_marshals() {
		let text = Marshaler::new().marshal(&Node::default()).expect("default node");
		assert_eq!(text, "{value:0,next:null}(=Node)");
	}
}
