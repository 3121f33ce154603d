use polyvis::{CallArgs, Capability, Category, Emission, Flow, Structural, Token};
use std::collections::BTreeSet;

// ============================================================================
// Test Token Types
// ============================================================================

/// A dynamically typed value, covering the builtin-alias and category tiers.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Text(String),
    List(Vec<i64>),
    Set(BTreeSet<i64>),
}

impl Token for Value {
    fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "i64",
            Value::Text(_) => "String",
            Value::List(_) => "Vec",
            Value::Set(_) => "BTreeSet",
        }
    }

    fn builtin_name(&self) -> Option<&'static str> {
        match self {
            Value::Int(_) => Some("int"),
            Value::Text(_) => Some("str"),
            Value::List(_) => Some("list"),
            Value::Set(_) => Some("set"),
        }
    }

    fn satisfies(&self, category: Category) -> bool {
        let Category::Capability(capability) = category else {
            return false;
        };
        match self {
            Value::Int(_) => capability == Capability::Hashable,
            Value::Text(_) => matches!(
                capability,
                Capability::Hashable
                    | Capability::Iterable
                    | Capability::Sized
                    | Capability::Container
                    | Capability::Sequence
            ),
            Value::List(_) => matches!(
                capability,
                Capability::Iterable
                    | Capability::Sized
                    | Capability::Container
                    | Capability::Sequence
                    | Capability::MutableSequence
            ),
            Value::Set(_) => matches!(
                capability,
                Capability::Hashable
                    | Capability::Iterable
                    | Capability::Sized
                    | Capability::Container
                    | Capability::Set
            ),
        }
    }
}

/// A three-deep ancestry chain, covering the nearest-ancestor tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pet {
    Beagle,
    Dog,
    Animal,
}

impl Token for Pet {
    fn type_name(&self) -> &'static str {
        match self {
            Pet::Beagle => "Beagle",
            Pet::Dog => "Dog",
            Pet::Animal => "Animal",
        }
    }

    fn ancestry(&self) -> Vec<&'static str> {
        match self {
            Pet::Beagle => vec!["Beagle", "Dog", "Animal"],
            Pet::Dog => vec!["Dog", "Animal"],
            Pet::Animal => vec!["Animal"],
        }
    }
}

/// A suspended producer: in a structural category as well as capabilities.
#[derive(Clone, Copy, Debug)]
pub struct Cursor;

impl Token for Cursor {
    fn type_name(&self) -> &'static str {
        "Cursor"
    }

    fn builtin_name(&self) -> Option<&'static str> {
        Some("gen")
    }

    fn satisfies(&self, category: Category) -> bool {
        matches!(category, Category::Structural(Structural::Generator))
            || matches!(
                category,
                Category::Capability(Capability::Iterable | Capability::Iterator)
            )
    }
}

// ============================================================================
// Handler Helpers
// ============================================================================

/// A handler emitting one fixed value.
pub fn tag<T>(value: &'static str) -> impl Fn(&T, &CallArgs<()>) -> Flow<&'static str> {
    move |_, _| Ok(Emission::one(value))
}

/// A handler emitting a fixed multi-value sequence.
pub fn tags<T>(
    values: &'static [&'static str],
) -> impl Fn(&T, &CallArgs<()>) -> Flow<&'static str> {
    move |_, _| Ok(Emission::many(values.iter().copied()))
}
