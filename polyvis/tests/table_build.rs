//! Table lifecycle: build-once semantics, shadowing, and the re-entrancy guard.

use polyvis::{
    CallArgs, DispatchError, DispatchTable, Prepare, TypenameDispatcher,
};

mod common;
use common::{Pet, tag};

#[test]
fn later_registration_shadows_earlier() {
    let dispatcher = TypenameDispatcher::builder()
        .name("kennel")
        .register("Dog", tag("first"))
        .register("Dog", tag("second"))
        .build();

    let result = dispatcher.dispatch(&Pet::Dog, &CallArgs::new()).unwrap();
    assert_eq!(result, Some("second"));
}

#[test]
fn method_prefix_is_stripped_from_registration_names() {
    let dispatcher = TypenameDispatcher::builder()
        .name("kennel")
        .register("handle_Dog", tag("via prefix"))
        .build();

    let result = dispatcher.dispatch(&Pet::Dog, &CallArgs::new()).unwrap();
    assert_eq!(result, Some("via prefix"));
}

#[test]
fn custom_method_prefix_applies() {
    let dispatcher = TypenameDispatcher::builder()
        .name("kennel")
        .method_prefix("visit_")
        .register("visit_Dog", tag("visited"))
        .build();

    let result = dispatcher.dispatch(&Pet::Dog, &CallArgs::new()).unwrap();
    assert_eq!(result, Some("visited"));
}

#[test]
fn registration_after_first_dispatch_is_not_observed() {
    let mut dispatcher = TypenameDispatcher::builder()
        .name("kennel")
        .register("Animal", tag("animal"))
        .build();

    // First dispatch builds and freezes the table.
    let result = dispatcher.dispatch(&Pet::Dog, &CallArgs::new()).unwrap();
    assert_eq!(result, Some("animal"));
    assert!(dispatcher.is_prepared());

    dispatcher.register("Dog", tag("dog"));
    let result = dispatcher.dispatch(&Pet::Dog, &CallArgs::new()).unwrap();
    assert_eq!(result, Some("animal"), "frozen table ignores late registrations");
}

/// A preparer that calls back into dispatch while the table is mid-build.
struct ReentrantPrepare;

impl Prepare<Pet, (), &'static str> for ReentrantPrepare {
    fn prepare(
        &self,
        dispatcher: &TypenameDispatcher<Pet, (), &'static str>,
    ) -> Result<DispatchTable<Pet, (), &'static str>, DispatchError> {
        dispatcher.dispatch(&Pet::Animal, &CallArgs::new())?;
        Ok(DispatchTable::build(dispatcher.registry()))
    }
}

#[test]
fn reentrant_build_is_an_implementation_error() {
    let dispatcher = TypenameDispatcher::builder()
        .name("kennel")
        .register("Animal", tag("animal"))
        .prepare_with(ReentrantPrepare)
        .build();

    let err = dispatcher
        .dispatch(&Pet::Dog, &CallArgs::new())
        .unwrap_err();
    match err {
        DispatchError::Implementation(inner) => {
            assert!(inner.to_string().contains("kennel"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// A preparer that fails on the first attempt and succeeds afterwards.
struct FlakyPrepare {
    failures: std::sync::atomic::AtomicUsize,
}

impl Prepare<Pet, (), &'static str> for FlakyPrepare {
    fn prepare(
        &self,
        dispatcher: &TypenameDispatcher<Pet, (), &'static str>,
    ) -> Result<DispatchTable<Pet, (), &'static str>, DispatchError> {
        use std::sync::atomic::Ordering;
        if self.failures.fetch_add(1, Ordering::SeqCst) == 0 {
            return Err(DispatchError::NoMatch {
                token: "warming up".to_string(),
                dispatcher: dispatcher.name().to_string(),
            });
        }
        Ok(DispatchTable::build(dispatcher.registry()))
    }
}

#[test]
fn failed_build_is_retried_on_the_next_dispatch() {
    let dispatcher = TypenameDispatcher::builder()
        .name("kennel")
        .register("Animal", tag("animal"))
        .prepare_with(FlakyPrepare {
            failures: std::sync::atomic::AtomicUsize::new(0),
        })
        .build();

    assert!(dispatcher.dispatch(&Pet::Dog, &CallArgs::new()).is_err());
    let result = dispatcher.dispatch(&Pet::Dog, &CallArgs::new()).unwrap();
    assert_eq!(result, Some("animal"));
}
