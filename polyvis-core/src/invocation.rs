//! Invocation arguments and the key codec.
//!
//! [`CallArgs`] is a structurally comparable record of positional and keyed
//! arguments with defined equality and hashing. Signature-keyed dispatchers
//! encode a registration's arguments through an [`InvocationCodec`] and
//! later match calls by exact key equality; any deterministic structural
//! encoder satisfies the codec contract.

use std::collections::BTreeMap;
use std::hash::Hash;

/// A structurally comparable record of call arguments.
///
/// The keyed side is a `BTreeMap`, so equality and hashing are independent
/// of insertion order. Values must carry structural equality themselves;
/// that requirement surfaces as the `A: Eq + Hash` bounds on the operations
/// that compare keys, rather than as a runtime error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallArgs<A> {
    positional: Vec<A>,
    keyed: BTreeMap<String, A>,
}

impl<A> CallArgs<A> {
    /// An empty argument record.
    pub fn new() -> Self {
        Self {
            positional: Vec::new(),
            keyed: BTreeMap::new(),
        }
    }

    /// An argument record from positional values only.
    pub fn from_positional<I: IntoIterator<Item = A>>(values: I) -> Self {
        Self {
            positional: values.into_iter().collect(),
            keyed: BTreeMap::new(),
        }
    }

    /// Append a positional argument.
    pub fn with_positional(mut self, value: A) -> Self {
        self.positional.push(value);
        self
    }

    /// Insert a keyed argument, replacing any previous value for the key.
    pub fn with_keyed(mut self, key: impl Into<String>, value: A) -> Self {
        self.keyed.insert(key.into(), value);
        self
    }

    /// The positional arguments, in order.
    pub fn positional(&self) -> &[A] {
        &self.positional
    }

    /// The keyed arguments, ordered by key.
    pub fn keyed(&self) -> &BTreeMap<String, A> {
        &self.keyed
    }

    /// Whether the record carries no arguments at all.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyed.is_empty()
    }

    /// Merge registration extras (`self`) with call-time arguments.
    ///
    /// Registration positionals come first, followed by the call's
    /// positionals. On a keyed collision the call-time value wins.
    pub fn merge(&self, call: &CallArgs<A>) -> CallArgs<A>
    where
        A: Clone,
    {
        let mut merged = self.clone();
        merged.positional.extend(call.positional.iter().cloned());
        for (key, value) in &call.keyed {
            merged.keyed.insert(key.clone(), value.clone());
        }
        merged
    }
}

impl<A> Default for CallArgs<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic encoder from call arguments to a comparable key.
///
/// Equal inputs (by structural equality) must produce equal keys. The codec
/// is a pluggable seam: the signature dispatcher works with any
/// implementation whose keys are `Eq + Hash`.
pub trait InvocationCodec<A>: Send + Sync {
    /// The key type produced by this codec.
    type Key: Eq + Hash + Clone + std::fmt::Debug;

    /// Encode the arguments into a key.
    fn encode(&self, args: &CallArgs<A>) -> Self::Key;
}

/// The default codec: the argument record is its own key.
///
/// `CallArgs` already defines structural equality and hashing, so no
/// serialization step is needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralCodec;

impl<A> InvocationCodec<A> for StructuralCodec
where
    A: Eq + Hash + Clone + std::fmt::Debug + Send + Sync,
{
    type Key = CallArgs<A>;

    fn encode(&self, args: &CallArgs<A>) -> Self::Key {
        args.clone()
    }
}
