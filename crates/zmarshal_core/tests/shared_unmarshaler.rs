use std::thread;

use zmarshal::zson::{Marshaler, Unmarshaler};
use zmarshal_testkit::{Animal, Plant, Thing, make};

#[test]
fn one_unmarshaler_serves_many_threads() {
	let marshaler = Marshaler::new();
	let payloads: Vec<(String, &str)> = ["rose", "ivy", "flamingo"]
		.into_iter()
		.map(|which| {
			let thing = make(which).expect("known thing");
			(marshaler.marshal(&thing).expect("thing marshals"), which)
		})
		.collect();

	let mut unmarshaler = Unmarshaler::new();
	unmarshaler.bind::<Animal>().expect("Animal binds");
	unmarshaler.bind::<Plant>().expect("Plant binds");
	let unmarshaler = &unmarshaler;
	let payloads = &payloads;

	thread::scope(|scope| {
		let workers: Vec<_> = (0..8)
			.map(|worker| {
				scope.spawn(move || {
					for round in 0..50 {
						let (text, which) = &payloads[(worker + round) % payloads.len()];
						let thing: Box<dyn Thing> = unmarshaler.unmarshal(text).expect("payload decodes");
						let expected = make(which).expect("known thing");
						assert_eq!(thing.color(), expected.color());
						assert_eq!(thing.type_descriptor().type_id(), expected.type_descriptor().type_id());
					}
				})
			})
			.collect();

		for worker in workers {
			worker.join().expect("worker finishes");
		}
	});

	assert!(unmarshaler.registry().is_sealed());
}
