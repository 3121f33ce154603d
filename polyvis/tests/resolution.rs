//! Resolution-order tests: which handler wins, and why.

use polyvis::{CallArgs, SharedHandler, TypenameDispatcher};
use std::collections::BTreeSet;
use std::sync::Arc;

mod common;
use common::{Cursor, Pet, Value, tag, tags};

#[test]
fn exact_type_beats_builtin_alias_and_categories() {
    let dispatcher = TypenameDispatcher::builder()
        .name("priority")
        .register("Hashable", tag("hashable"))
        .register("int", tag("builtin"))
        .register("i64", tag("exact"))
        .build();

    let result = dispatcher.dispatch(&Value::Int(3), &CallArgs::new()).unwrap();
    assert_eq!(result, Some("exact"));
}

#[test]
fn builtin_alias_beats_categories() {
    let dispatcher = TypenameDispatcher::builder()
        .name("priority")
        .register("Hashable", tag("hashable"))
        .register("int", tag("builtin"))
        .build();

    let result = dispatcher.dispatch(&Value::Int(3), &CallArgs::new()).unwrap();
    assert_eq!(result, Some("builtin"));
}

#[test]
fn category_handler_is_the_last_resort() {
    let dispatcher = TypenameDispatcher::builder()
        .name("priority")
        .register("Iterable", tag("iterable"))
        .build();

    let result = dispatcher
        .dispatch(&Value::List(vec![1, 2]), &CallArgs::new())
        .unwrap();
    assert_eq!(result, Some("iterable"));
}

#[test]
fn structural_category_beats_capability() {
    let dispatcher = TypenameDispatcher::builder()
        .name("priority")
        .register("Iterable", tag("iterable"))
        .register("Generator", tag("generator"))
        .build();

    let result = dispatcher.dispatch(&Cursor, &CallArgs::new()).unwrap();
    assert_eq!(result, Some("generator"));
}

#[test]
fn builtin_alias_precedes_the_structural_tier() {
    let dispatcher = TypenameDispatcher::builder()
        .name("priority")
        .multi(true)
        .register("Iterable", tag("via capability"))
        .register("Generator", tag("via structural"))
        .register("gen", tag("via builtin"))
        .build();

    let stream = dispatcher.dispatch_all(&Cursor, &CallArgs::new()).unwrap();
    assert_eq!(
        stream.collect::<Vec<_>>(),
        vec!["via builtin", "via structural", "via capability"]
    );
}

#[test]
fn nearer_ancestor_wins() {
    let dispatcher = TypenameDispatcher::builder()
        .name("kennel")
        .register("Animal", tag("animal"))
        .register("Dog", tag("dog"))
        .build();

    let beagle = dispatcher.dispatch(&Pet::Beagle, &CallArgs::new()).unwrap();
    assert_eq!(beagle, Some("dog"), "Dog is nearer to Beagle than Animal");

    let animal = dispatcher.dispatch(&Pet::Animal, &CallArgs::new()).unwrap();
    assert_eq!(animal, Some("animal"));
}

#[test]
fn one_token_type_routes_by_value_shape() {
    // The same dispatcher sends ints one way and iterables another.
    let dispatcher = TypenameDispatcher::builder()
        .name("router")
        .register("int", tag("saw an int"))
        .register("Iterable", tag("saw an iterable"))
        .build();

    let int = dispatcher.dispatch(&Value::Int(3), &CallArgs::new()).unwrap();
    assert_eq!(int, Some("saw an int"));

    let list = dispatcher
        .dispatch(&Value::List(vec![1]), &CallArgs::new())
        .unwrap();
    assert_eq!(list, Some("saw an iterable"));
}

#[test]
fn categories_yield_in_declaration_order() {
    // A set satisfies both Hashable and Iterable; Hashable is declared
    // first, so its handler runs first in multi mode.
    let dispatcher = TypenameDispatcher::builder()
        .name("cheer")
        .multi(true)
        .register("Hashable", tag("hooray"))
        .register("Iterable", tags(&["yip", "pee"]))
        .build();

    let set = Value::Set(BTreeSet::from([1, 2]));
    let stream = dispatcher.dispatch_all(&set, &CallArgs::new()).unwrap();
    assert_eq!(stream.collect::<Vec<_>>(), vec!["hooray", "yip", "pee"]);
}

#[test]
fn shared_handler_runs_once_across_tiers() {
    let shared: SharedHandler<Value, (), &'static str> = Arc::new(tag("once"));

    let dispatcher = TypenameDispatcher::builder()
        .name("dedup")
        .multi(true)
        .register_shared("Hashable", shared.clone())
        .register_shared("Iterable", shared)
        .build();

    let set = Value::Set(BTreeSet::from([1]));
    let stream = dispatcher.dispatch_all(&set, &CallArgs::new()).unwrap();
    assert_eq!(stream.collect::<Vec<_>>(), vec!["once"]);
}

#[test]
fn repeated_dispatch_is_deterministic() {
    let dispatcher = TypenameDispatcher::builder()
        .name("stable")
        .multi(true)
        .register("Hashable", tag("hashable"))
        .register("Iterable", tag("iterable"))
        .register("set", tag("set"))
        .build();

    let set = Value::Set(BTreeSet::from([9]));
    let first: Vec<_> = dispatcher
        .dispatch_all(&set, &CallArgs::new())
        .unwrap()
        .collect();
    for _ in 0..10 {
        let again: Vec<_> = dispatcher
            .dispatch_all(&set, &CallArgs::new())
            .unwrap()
            .collect();
        assert_eq!(again, first);
    }
    assert_eq!(first, vec!["set", "hashable", "iterable"]);
}
