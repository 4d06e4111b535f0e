use std::{
    any::{TypeId, type_name},
    collections::BTreeMap,
};

use crate::{
    Compute, State,
    ctx::{ComputeSlot, StateSlot},
};

/// Read-only view of the context handed to [`Compute::compute`].
pub struct Dep<'a> {
    states: &'a BTreeMap<TypeId, StateSlot>,
    computes: &'a BTreeMap<TypeId, ComputeSlot>,
}

impl<'a> Dep<'a> {
    pub(crate) fn new(
        states: &'a BTreeMap<TypeId, StateSlot>,
        computes: &'a BTreeMap<TypeId, ComputeSlot>,
    ) -> Self {
        Self { states, computes }
    }

    pub fn state<T: State>(&self) -> Option<&'a T> {
        let found = self
            .states
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.downcast_ref::<T>());
        if found.is_none() {
            log::debug!("dependency state {} is not registered", type_name::<T>());
        }
        found
    }

    pub fn compute<T: Compute>(&self) -> Option<&'a T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.compute.as_any().downcast_ref::<T>())
    }
}
