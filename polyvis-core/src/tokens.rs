//! Token implementations for common std types.
//!
//! Numeric and collection types from the standard library dispatch out of
//! the box. Each type declares a builtin alias (`"int"`, `"list"`, ...)
//! for the builtin-name tier and the capability categories it satisfies
//! structurally, so a handler registered under `"Iterable"` matches a
//! `Vec` even when no `"Vec"` or `"list"` handler exists.

use crate::category::{Capability, Category};
use crate::token::Token;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;

macro_rules! scalar_tokens {
    ($($ty:ty => $name:literal, $builtin:literal, hashable: $hashable:literal;)*) => {$(
        impl Token for $ty {
            fn type_name(&self) -> &'static str {
                $name
            }

            fn builtin_name(&self) -> Option<&'static str> {
                Some($builtin)
            }

            fn satisfies(&self, category: Category) -> bool {
                $hashable && category == Category::Capability(Capability::Hashable)
            }
        }
    )*};
}

scalar_tokens! {
    i8 => "i8", "int", hashable: true;
    i16 => "i16", "int", hashable: true;
    i32 => "i32", "int", hashable: true;
    i64 => "i64", "int", hashable: true;
    i128 => "i128", "int", hashable: true;
    isize => "isize", "int", hashable: true;
    u8 => "u8", "int", hashable: true;
    u16 => "u16", "int", hashable: true;
    u32 => "u32", "int", hashable: true;
    u64 => "u64", "int", hashable: true;
    u128 => "u128", "int", hashable: true;
    usize => "usize", "int", hashable: true;
    // Floats carry no structural hashability.
    f32 => "f32", "float", hashable: false;
    f64 => "f64", "float", hashable: false;
    bool => "bool", "bool", hashable: true;
    char => "char", "char", hashable: true;
}

impl Token for String {
    fn type_name(&self) -> &'static str {
        "String"
    }

    fn builtin_name(&self) -> Option<&'static str> {
        Some("str")
    }

    fn satisfies(&self, category: Category) -> bool {
        matches!(
            category,
            Category::Capability(Capability::Hashable)
                | Category::Capability(Capability::Iterable)
                | Category::Capability(Capability::Sized)
                | Category::Capability(Capability::Container)
                | Category::Capability(Capability::Sequence)
        )
    }
}

macro_rules! sequence_tokens {
    ($($ty:ident => $name:literal;)*) => {$(
        impl<V: fmt::Debug> Token for $ty<V> {
            fn type_name(&self) -> &'static str {
                $name
            }

            fn builtin_name(&self) -> Option<&'static str> {
                Some("list")
            }

            fn satisfies(&self, category: Category) -> bool {
                matches!(
                    category,
                    Category::Capability(Capability::Iterable)
                        | Category::Capability(Capability::Sized)
                        | Category::Capability(Capability::Container)
                        | Category::Capability(Capability::Sequence)
                        | Category::Capability(Capability::MutableSequence)
                )
            }
        }
    )*};
}

sequence_tokens! {
    Vec => "Vec";
    VecDeque => "VecDeque";
}

macro_rules! set_tokens {
    ($($ty:ident => $name:literal, hashable: $hashable:literal;)*) => {$(
        impl<V: fmt::Debug> Token for $ty<V> {
            fn type_name(&self) -> &'static str {
                $name
            }

            fn builtin_name(&self) -> Option<&'static str> {
                Some("set")
            }

            fn satisfies(&self, category: Category) -> bool {
                matches!(
                    category,
                    Category::Capability(Capability::Iterable)
                        | Category::Capability(Capability::Sized)
                        | Category::Capability(Capability::Container)
                        | Category::Capability(Capability::Set)
                        | Category::Capability(Capability::MutableSet)
                ) || ($hashable && category == Category::Capability(Capability::Hashable))
            }
        }
    )*};
}

set_tokens! {
    HashSet => "HashSet", hashable: false;
    // Ordered sets hash their contents, so they satisfy Hashable too.
    BTreeSet => "BTreeSet", hashable: true;
}

macro_rules! map_tokens {
    ($($ty:ident => $name:literal;)*) => {$(
        impl<K: fmt::Debug, V: fmt::Debug> Token for $ty<K, V> {
            fn type_name(&self) -> &'static str {
                $name
            }

            fn builtin_name(&self) -> Option<&'static str> {
                Some("dict")
            }

            fn satisfies(&self, category: Category) -> bool {
                matches!(
                    category,
                    Category::Capability(Capability::Iterable)
                        | Category::Capability(Capability::Sized)
                        | Category::Capability(Capability::Container)
                        | Category::Capability(Capability::Mapping)
                        | Category::Capability(Capability::MutableMapping)
                )
            }
        }
    )*};
}

map_tokens! {
    HashMap => "HashMap";
    BTreeMap => "BTreeMap";
}

#[cfg(test)]
mod tests {
    use crate::category::{Capability, Category};
    use crate::token::Token;
    use std::collections::{BTreeSet, HashMap, HashSet};

    #[test]
    fn integers_alias_int() {
        assert_eq!(3i64.builtin_name(), Some("int"));
        assert_eq!(3u8.builtin_name(), Some("int"));
        assert!(3i64.satisfies(Category::Capability(Capability::Hashable)));
        assert!(!3.5f64.satisfies(Category::Capability(Capability::Hashable)));
    }

    #[test]
    fn vec_is_a_mutable_sequence() {
        let list = vec![1, 2, 3];
        assert_eq!(list.builtin_name(), Some("list"));
        assert!(list.satisfies(Category::Capability(Capability::Iterable)));
        assert!(list.satisfies(Category::Capability(Capability::MutableSequence)));
        assert!(!list.satisfies(Category::Capability(Capability::Mapping)));
    }

    #[test]
    fn sets_differ_on_hashability() {
        let hashed: HashSet<i32> = HashSet::new();
        let ordered: BTreeSet<i32> = BTreeSet::new();
        assert!(!hashed.satisfies(Category::Capability(Capability::Hashable)));
        assert!(ordered.satisfies(Category::Capability(Capability::Hashable)));
        assert!(hashed.satisfies(Category::Capability(Capability::Set)));
    }

    #[test]
    fn maps_alias_dict() {
        let map: HashMap<String, i32> = HashMap::new();
        assert_eq!(map.builtin_name(), Some("dict"));
        assert!(map.satisfies(Category::Capability(Capability::MutableMapping)));
        assert_eq!(map.ancestry(), vec!["HashMap"]);
    }
}
