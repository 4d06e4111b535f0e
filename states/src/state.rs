use std::any::{Any, TypeId};

use flume::Sender;

/// A value stored in a [`StateCtx`](crate::StateCtx), addressed by its type.
///
/// Implementors are plain data: filter inputs, fetched records, session info.
/// Derived values belong in a [`Compute`](crate::Compute) instead.
pub trait State: Any + Send {}

pub(crate) type PendingUpdate = (TypeId, &'static str, Box<dyn Any + Send>);

/// Cloneable handle that replaces states from outside the owning context.
///
/// Async work (e.g. a network fetch) holds an `Updater` instead of the context
/// itself. Values are queued and applied on the next
/// [`StateCtx::sync_computes`](crate::StateCtx::sync_computes).
#[derive(Debug, Clone)]
pub struct Updater {
    send: Sender<PendingUpdate>,
}

impl Updater {
    pub(crate) fn new(send: Sender<PendingUpdate>) -> Self {
        Self { send }
    }

    /// Queue `state` to replace the stored value of the same type.
    ///
    /// Returns `false` when the owning context has been dropped.
    pub fn set<T: State>(&self, state: T) -> bool {
        let boxed: Box<dyn Any + Send> = Box::new(state);
        self.send
            .send((TypeId::of::<T>(), std::any::type_name::<T>(), boxed))
            .is_ok()
    }
}
