use std::any::{Any, TypeId};

use crate::{Dep, State};

/// Dependencies a [`Compute`] reads, split by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputeDeps {
    pub states: Vec<TypeId>,
    pub computes: Vec<TypeId>,
}

impl ComputeDeps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state<T: State>(mut self) -> Self {
        self.states.push(TypeId::of::<T>());
        self
    }

    pub fn compute<T: Compute>(mut self) -> Self {
        self.computes.push(TypeId::of::<T>());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.states.iter().chain(self.computes.iter()).copied()
    }
}

/// A value derived from other states and computes.
///
/// `compute` must be a pure function of what it reads through [`Dep`]: the
/// context re-runs it whenever one of the declared dependencies changes and
/// callers may observe the result at any time in between.
pub trait Compute: Any + Send {
    fn deps(&self) -> ComputeDeps;

    fn compute(&mut self, deps: Dep<'_>);

    fn as_any(&self) -> &dyn Any;
}
