//! Signature-keyed dispatcher.
//!
//! [`SignatureDispatcher`] matches a call against the exact arguments
//! captured at registration time. Registration encodes the arguments
//! through an [`InvocationCodec`]; dispatch encodes the call the same way
//! and looks the key up by equality. There is no fallback chain here: a
//! call either hits a registered signature or fails with the no-match
//! error.
//!
//! The lookup table shares the same build-once lifecycle as the type-name
//! dispatcher: built from the registry on first use, later duplicates
//! shadowing earlier ones, immutable afterwards.
//!
//! [`InvocationCodec`]: polyvis_core::InvocationCodec

use crate::cache::BuildOnce;
use polyvis_core::{
    CallArgs, DispatchError, Emission, Flow, Interrupt, InvocationCodec, StructuralCodec,
};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// A handler keyed by invocation signature rather than token type.
pub type SharedSignatureHandler<A, R> = Arc<dyn Fn(&CallArgs<A>) -> Flow<R> + Send + Sync>;

/// A dispatcher matching calls by exact signature equality.
pub struct SignatureDispatcher<A: 'static, R: 'static, C = StructuralCodec>
where
    C: InvocationCodec<A>,
{
    name: String,
    codec: C,
    registry: Vec<(C::Key, SharedSignatureHandler<A, R>)>,
    table: BuildOnce<HashMap<C::Key, SharedSignatureHandler<A, R>>>,
}

impl<A, R> SignatureDispatcher<A, R, StructuralCodec>
where
    A: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static,
    R: 'static,
{
    /// A dispatcher using the default structural codec.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_codec(name, StructuralCodec)
    }
}

impl<A, R, C> SignatureDispatcher<A, R, C>
where
    A: fmt::Debug + 'static,
    R: 'static,
    C: InvocationCodec<A>,
{
    /// A dispatcher using a custom key codec.
    pub fn with_codec(name: impl Into<String>, codec: C) -> Self {
        Self {
            name: name.into(),
            codec,
            registry: Vec::new(),
            table: BuildOnce::new(),
        }
    }

    /// The dispatcher's name, as used in error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number of registrations.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Whether no signatures have been registered.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Register a handler for the given argument signature.
    ///
    /// Registering the same signature twice is permitted; the later
    /// registration shadows the earlier one once the table is built.
    /// Registrations after the first dispatch have no effect.
    pub fn register<F>(&mut self, args: CallArgs<A>, handler: F)
    where
        F: Fn(&CallArgs<A>) -> Flow<R> + Send + Sync + 'static,
    {
        let key = self.codec.encode(&args);
        self.registry.push((key, Arc::new(handler)));
    }

    fn table(&self) -> Result<&HashMap<C::Key, SharedSignatureHandler<A, R>>, DispatchError> {
        self.table.get_or_try_build(&self.name, || {
            let mut table = HashMap::with_capacity(self.registry.len());
            for (key, handler) in &self.registry {
                table.insert(key.clone(), handler.clone());
            }
            Ok(table)
        })
    }

    /// Dispatch to the handler registered for exactly these arguments and
    /// return the lazy, flattened result stream.
    pub fn dispatch_all(&self, args: &CallArgs<A>) -> Result<SignatureStream<A, R>, DispatchError>
    where
        A: Clone,
    {
        let table = self.table()?;
        let key = self.codec.encode(args);
        let Some(handler) = table.get(&key) else {
            return Err(DispatchError::NoMatch {
                token: format!("{args:?}"),
                dispatcher: self.name.clone(),
            });
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(dispatcher = %self.name, key = ?key, "matched invocation signature");
        Ok(SignatureStream {
            handler: Some(handler.clone()),
            args: args.clone(),
            current: None,
        })
    }

    /// Dispatch and return the first flattened result.
    ///
    /// `Ok(None)` means the handler interrupted (or emitted an empty
    /// sequence) before producing a value.
    pub fn dispatch(&self, args: &CallArgs<A>) -> Result<Option<R>, DispatchError>
    where
        A: Clone,
    {
        let mut stream = self.dispatch_all(args)?;
        Ok(stream.next())
    }
}

/// Lazy, flattened output of a signature dispatch.
///
/// The matched handler runs on the first `next` call; dropping the stream
/// beforehand cancels the invocation entirely.
pub struct SignatureStream<A, R> {
    handler: Option<SharedSignatureHandler<A, R>>,
    args: CallArgs<A>,
    current: Option<Box<dyn Iterator<Item = R> + Send>>,
}

impl<A, R> Iterator for SignatureStream<A, R> {
    type Item = R;

    fn next(&mut self) -> Option<R> {
        loop {
            if let Some(current) = &mut self.current {
                if let Some(value) = current.next() {
                    return Some(value);
                }
                self.current = None;
                return None;
            }
            let handler = self.handler.take()?;
            match handler(&self.args) {
                Ok(Emission::One(value)) => return Some(value),
                Ok(Emission::Many(values)) => self.current = Some(values),
                Err(Interrupt) => return None,
            }
        }
    }
}
