//! Closed category sets used by the fallback tiers.
//!
//! Resolution falls through two fixed tables after the ancestry and builtin
//! tiers fail to produce a candidate:
//!
//! - [`Structural`]: interpreter-structural shapes a token can have
//!   (function, bound method, generator, module, and so on).
//! - [`Capability`]: abstract capabilities a token can satisfy structurally,
//!   independent of its nominal type (Iterable, Sized, Mapping, ...).
//!
//! Both tables are immutable and statically configured. Whether a given
//! token belongs to a category is answered by [`Token::satisfies`], a
//! declared predicate rather than runtime introspection.
//!
//! The `ALL` constant of each enum lists the variants in declaration order.
//! That order is the deterministic resolution order within the tier: when a
//! token satisfies several categories with registered handlers, candidates
//! are produced in `ALL` order.
//!
//! [`Token::satisfies`]: crate::Token::satisfies

/// Interpreter-structural categories.
///
/// A fixed, closed set of structural shapes. Handlers may be registered
/// under a category's [`name`](Structural::name) to match any token that
/// satisfies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Structural {
    /// A plain function value.
    Function,
    /// A builtin (native) function.
    BuiltinFunction,
    /// A method bound to a receiver.
    BoundMethod,
    /// An anonymous function.
    Lambda,
    /// A suspended producer of values.
    Generator,
    /// A module object.
    Module,
    /// A compiled code object.
    Code,
    /// A call-stack frame.
    Frame,
    /// A traceback object.
    Traceback,
    /// A simple attribute namespace.
    Namespace,
    /// A read-only view over a mapping.
    MappingProxy,
}

impl Structural {
    /// Every structural category, in declaration order.
    ///
    /// This order is the resolution order within the structural tier.
    pub const ALL: &'static [Structural] = &[
        Structural::Function,
        Structural::BuiltinFunction,
        Structural::BoundMethod,
        Structural::Lambda,
        Structural::Generator,
        Structural::Module,
        Structural::Code,
        Structural::Frame,
        Structural::Traceback,
        Structural::Namespace,
        Structural::MappingProxy,
    ];

    /// The name handlers register under to match this category.
    pub const fn name(self) -> &'static str {
        match self {
            Structural::Function => "Function",
            Structural::BuiltinFunction => "BuiltinFunction",
            Structural::BoundMethod => "BoundMethod",
            Structural::Lambda => "Lambda",
            Structural::Generator => "Generator",
            Structural::Module => "Module",
            Structural::Code => "Code",
            Structural::Frame => "Frame",
            Structural::Traceback => "Traceback",
            Structural::Namespace => "Namespace",
            Structural::MappingProxy => "MappingProxy",
        }
    }
}

/// Abstract capability categories.
///
/// A fixed, closed set of capabilities a token may satisfy structurally.
/// Handlers may be registered under a capability's
/// [`name`](Capability::name) to match any token that satisfies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Usable as a hash key.
    Hashable,
    /// Can produce an iterator over its elements.
    Iterable,
    /// Is itself an iterator.
    Iterator,
    /// Has a known element count.
    Sized,
    /// Supports membership tests.
    Container,
    /// Can be invoked.
    Callable,
    /// An unordered collection of unique elements.
    Set,
    /// A mutable [`Set`](Capability::Set).
    MutableSet,
    /// A key-to-value association.
    Mapping,
    /// A mutable [`Mapping`](Capability::Mapping).
    MutableMapping,
    /// A dynamic view over a mapping.
    MappingView,
    /// A view over a mapping's keys.
    KeysView,
    /// A view over a mapping's entries.
    ItemsView,
    /// A view over a mapping's values.
    ValuesView,
    /// An ordered, indexable collection.
    Sequence,
    /// A mutable [`Sequence`](Capability::Sequence).
    MutableSequence,
    /// A contiguous sequence of bytes.
    ByteString,
}

impl Capability {
    /// Every capability category, in declaration order.
    ///
    /// This order is the resolution order within the capability tier.
    pub const ALL: &'static [Capability] = &[
        Capability::Hashable,
        Capability::Iterable,
        Capability::Iterator,
        Capability::Sized,
        Capability::Container,
        Capability::Callable,
        Capability::Set,
        Capability::MutableSet,
        Capability::Mapping,
        Capability::MutableMapping,
        Capability::MappingView,
        Capability::KeysView,
        Capability::ItemsView,
        Capability::ValuesView,
        Capability::Sequence,
        Capability::MutableSequence,
        Capability::ByteString,
    ];

    /// The name handlers register under to match this capability.
    pub const fn name(self) -> &'static str {
        match self {
            Capability::Hashable => "Hashable",
            Capability::Iterable => "Iterable",
            Capability::Iterator => "Iterator",
            Capability::Sized => "Sized",
            Capability::Container => "Container",
            Capability::Callable => "Callable",
            Capability::Set => "Set",
            Capability::MutableSet => "MutableSet",
            Capability::Mapping => "Mapping",
            Capability::MutableMapping => "MutableMapping",
            Capability::MappingView => "MappingView",
            Capability::KeysView => "KeysView",
            Capability::ItemsView => "ItemsView",
            Capability::ValuesView => "ValuesView",
            Capability::Sequence => "Sequence",
            Capability::MutableSequence => "MutableSequence",
            Capability::ByteString => "ByteString",
        }
    }
}

/// Either kind of category, as passed to [`Token::satisfies`].
///
/// [`Token::satisfies`]: crate::Token::satisfies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// An interpreter-structural category.
    Structural(Structural),
    /// An abstract capability category.
    Capability(Capability),
}

impl Category {
    /// The registration name of the underlying category.
    pub const fn name(self) -> &'static str {
        match self {
            Category::Structural(s) => s.name(),
            Category::Capability(c) => c.name(),
        }
    }
}

impl From<Structural> for Category {
    fn from(s: Structural) -> Self {
        Category::Structural(s)
    }
}

impl From<Capability> for Category {
    fn from(c: Capability) -> Self {
        Category::Capability(c)
    }
}
