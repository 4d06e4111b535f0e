use std::{
    any::{Any, TypeId, type_name},
    collections::{BTreeMap, BTreeSet},
};

use flume::{Receiver, Sender};

use crate::{
    Compute, Dep, Error, Graph, State, StateSyncStatus, Updater, state::PendingUpdate,
};

pub(crate) struct StateSlot {
    pub(crate) name: &'static str,
    pub(crate) value: Box<dyn Any + Send>,
    pub(crate) status: StateSyncStatus,
}

pub(crate) struct ComputeSlot {
    pub(crate) name: &'static str,
    pub(crate) compute: Box<dyn Compute>,
    pub(crate) status: StateSyncStatus,
}

/// Owner of every state and compute of one view.
///
/// Writes go through [`StateCtx::update`] / [`StateCtx::set_state`] or an
/// [`Updater`]; [`StateCtx::sync_computes`] then re-runs exactly the computes
/// that (transitively) depend on something that changed.
pub struct StateCtx {
    states: BTreeMap<TypeId, StateSlot>,
    computes: BTreeMap<TypeId, ComputeSlot>,
    graph: Graph<TypeId>,

    send: Sender<PendingUpdate>,
    recv: Receiver<PendingUpdate>,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field(
                "states",
                &self.states.values().map(|s| (s.name, s.status)).collect::<Vec<_>>(),
            )
            .field(
                "computes",
                &self.computes.values().map(|c| (c.name, c.status)).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self {
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            graph: Graph::new(),
            send,
            recv,
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        let replaced = self.states.insert(
            TypeId::of::<T>(),
            StateSlot {
                name: type_name::<T>(),
                value: Box::new(state),
                status: StateSyncStatus::BeforeInit,
            },
        );
        if replaced.is_some() {
            log::warn!("state {} registered twice, keeping the latest", type_name::<T>());
        }
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        let id = TypeId::of::<T>();
        for dep in compute.deps().iter() {
            self.graph.route_to(dep, id, ());
        }
        self.computes.insert(
            id,
            ComputeSlot {
                name: type_name::<T>(),
                compute: Box::new(compute),
                status: StateSyncStatus::BeforeInit,
            },
        );
    }

    pub fn state<T: State>(&self) -> Option<&T> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.downcast_ref::<T>())
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.state::<T>().ok_or_else(Error::state_not_found::<T>)
    }

    pub fn compute<T: Compute>(&self) -> Option<&T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.compute.as_any().downcast_ref::<T>())
    }

    pub fn try_compute<T: Compute>(&self) -> Result<&T, Error> {
        self.compute::<T>().ok_or_else(Error::compute_not_found::<T>)
    }

    pub fn status<T: 'static>(&self) -> Option<StateSyncStatus> {
        let id = TypeId::of::<T>();
        self.states
            .get(&id)
            .map(|slot| slot.status)
            .or_else(|| self.computes.get(&id).map(|slot| slot.status))
    }

    /// Mutates a state in place and marks it dirty.
    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) -> Result<(), Error> {
        let slot = self
            .states
            .get_mut(&TypeId::of::<T>())
            .ok_or_else(Error::state_not_found::<T>)?;
        let state = slot
            .value
            .downcast_mut::<T>()
            .ok_or_else(Error::state_not_found::<T>)?;
        f(state);
        slot.status = StateSyncStatus::Dirty;
        Ok(())
    }

    pub fn set_state<T: State>(&mut self, value: T) -> Result<(), Error> {
        self.update::<T>(|state| *state = value)
    }

    pub fn updater(&self) -> Updater {
        Updater::new(self.send.clone())
    }

    /// Checks that the recorded compute dependencies form a DAG.
    pub fn verify_deps(&self) -> Result<(), Error> {
        self.recompute_order().map(|_| ())
    }

    fn recompute_order(&self) -> Result<Vec<TypeId>, Error> {
        self.graph.topology_sort().map_err(|err| {
            Error::Topology(err.map(|id| self.name_of(id).unwrap_or("<unregistered>")))
        })
    }

    fn name_of(&self, id: TypeId) -> Option<&'static str> {
        self.states
            .get(&id)
            .map(|slot| slot.name)
            .or_else(|| self.computes.get(&id).map(|slot| slot.name))
    }

    fn drain_updates(&mut self) {
        for (id, name, value) in self.recv.try_iter() {
            match self.states.get_mut(&id) {
                Some(slot) => {
                    slot.value = value;
                    slot.status = StateSyncStatus::Dirty;
                }
                None => log::warn!("dropping update for unregistered state {name}"),
            }
        }
    }

    /// Applies queued updates and recomputes every compute affected by a change.
    ///
    /// Computes run dependencies-first. Each one runs at most once per call.
    pub fn sync_computes(&mut self) -> Result<(), Error> {
        self.drain_updates();

        let mut affected = BTreeSet::new();
        let changed: Vec<TypeId> = self
            .states
            .iter()
            .filter(|(_, slot)| slot.status.needs_sync())
            .map(|(id, _)| *id)
            .chain(
                self.computes
                    .iter()
                    .filter(|(_, slot)| slot.status.needs_sync())
                    .map(|(id, _)| *id),
            )
            .collect();

        for id in changed {
            if self.computes.contains_key(&id) {
                affected.insert(id);
            }
            affected.extend(
                self.graph
                    .connected(id)
                    .filter(|node| self.computes.contains_key(*node)),
            );
        }

        let mut order: Vec<TypeId> = self
            .recompute_order()?
            .into_iter()
            .filter(|id| affected.contains(id))
            .collect();
        // computes without any recorded dependency never appear in the graph
        let unordered: Vec<TypeId> = affected
            .iter()
            .filter(|id| !order.contains(id))
            .copied()
            .collect();
        order.extend(unordered);

        for id in order {
            let Some(mut slot) = self.computes.remove(&id) else {
                continue;
            };
            log::debug!("recomputing {}", slot.name);
            slot.compute.compute(Dep::new(&self.states, &self.computes));
            slot.status = StateSyncStatus::Clean;
            self.computes.insert(id, slot);
        }

        for slot in self.states.values_mut() {
            slot.status = StateSyncStatus::Clean;
        }

        Ok(())
    }
}
