//! Reactive state runtime for the camps admin views.
//!
//! A [`StateCtx`] stores plain [`State`] values and derived [`Compute`] values
//! by type. Computes declare what they read; after any write,
//! [`StateCtx::sync_computes`] re-runs the affected computes in dependency
//! order so derived values are always a function of the current states.

mod compute;
mod ctx;
mod dep;
mod error;
mod graph;
mod state;
mod state_sync_status;

pub use compute::{Compute, ComputeDeps};
pub use ctx::StateCtx;
pub use dep::Dep;
pub use error::Error;
pub use graph::{DepRoute, Graph, TopologyError};
pub use state::{State, Updater};
pub use state_sync_status::StateSyncStatus;

#[cfg(test)]
mod state_runtime_test {
    use std::any::Any;

    use super::*;

    #[derive(Debug, Default)]
    struct Needle(String);
    impl State for Needle {}

    #[derive(Debug, Default)]
    struct Names(Vec<&'static str>);
    impl State for Names {}

    #[derive(Debug, Default)]
    struct Unrelated(u32);
    impl State for Unrelated {}

    #[derive(Debug, Default)]
    struct Matches {
        names: Vec<&'static str>,
        runs: usize,
    }

    impl Compute for Matches {
        fn deps(&self) -> ComputeDeps {
            ComputeDeps::new().state::<Needle>().state::<Names>()
        }

        fn compute(&mut self, deps: Dep<'_>) {
            let needle = deps.state::<Needle>().map(|n| n.0.as_str()).unwrap_or_default();
            let names = deps.state::<Names>().map(|n| n.0.as_slice()).unwrap_or_default();
            self.names = names
                .iter()
                .copied()
                .filter(|name| name.contains(needle))
                .collect();
            self.runs += 1;
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[derive(Debug, Default)]
    struct MatchCount(usize);

    impl Compute for MatchCount {
        fn deps(&self) -> ComputeDeps {
            ComputeDeps::new().compute::<Matches>()
        }

        fn compute(&mut self, deps: Dep<'_>) {
            self.0 = deps.compute::<Matches>().map(|m| m.names.len()).unwrap_or(0);
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn ctx() -> StateCtx {
        let mut ctx = StateCtx::new();
        ctx.add_state(Needle::default());
        ctx.add_state(Names(vec!["ahmed", "sara", "ahmad"]));
        ctx.add_state(Unrelated::default());
        ctx.record_compute(MatchCount::default());
        ctx.record_compute(Matches::default());
        ctx
    }

    #[test]
    fn first_sync_initialises_every_compute() {
        let mut ctx = ctx();
        assert_eq!(ctx.status::<Matches>(), Some(StateSyncStatus::BeforeInit));

        ctx.sync_computes().unwrap();

        assert_eq!(ctx.compute::<Matches>().unwrap().names.len(), 3);
        assert_eq!(ctx.compute::<MatchCount>().unwrap().0, 3);
        assert_eq!(ctx.status::<Matches>(), Some(StateSyncStatus::Clean));
    }

    #[test]
    fn update_recomputes_dependents_in_order() {
        let mut ctx = ctx();
        ctx.sync_computes().unwrap();

        ctx.update::<Needle>(|n| n.0 = "ahm".to_owned()).unwrap();
        assert_eq!(ctx.status::<Needle>(), Some(StateSyncStatus::Dirty));
        ctx.sync_computes().unwrap();

        assert_eq!(ctx.compute::<Matches>().unwrap().names, vec!["ahmed", "ahmad"]);
        assert_eq!(ctx.compute::<MatchCount>().unwrap().0, 2);
    }

    #[test]
    fn unrelated_update_does_not_recompute() {
        let mut ctx = ctx();
        ctx.sync_computes().unwrap();

        ctx.set_state(Unrelated(7)).unwrap();
        ctx.sync_computes().unwrap();

        assert_eq!(ctx.compute::<Matches>().unwrap().runs, 1);
    }

    #[test]
    fn updater_values_apply_on_sync() {
        let mut ctx = ctx();
        ctx.sync_computes().unwrap();

        let updater = ctx.updater();
        assert!(updater.set(Names(vec!["sara"])));
        assert_eq!(ctx.compute::<MatchCount>().unwrap().0, 3);

        ctx.sync_computes().unwrap();
        assert_eq!(ctx.compute::<MatchCount>().unwrap().0, 1);
    }

    #[test]
    fn update_of_unknown_state_is_an_error() {
        let mut ctx = StateCtx::new();
        let err = ctx.update::<Needle>(|_| {}).unwrap_err();
        assert!(matches!(err, Error::StateNotFound { .. }));
        assert!(err.to_string().contains("Needle"));
        assert!(ctx.try_compute::<Matches>().is_err());
    }

    #[derive(Debug, Default)]
    struct Ping;
    #[derive(Debug, Default)]
    struct Pong;

    impl Compute for Ping {
        fn deps(&self) -> ComputeDeps {
            ComputeDeps::new().compute::<Pong>()
        }
        fn compute(&mut self, _deps: Dep<'_>) {}
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    impl Compute for Pong {
        fn deps(&self) -> ComputeDeps {
            ComputeDeps::new().compute::<Ping>()
        }
        fn compute(&mut self, _deps: Dep<'_>) {}
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn cyclic_computes_are_rejected_with_type_names() {
        let mut ctx = StateCtx::new();
        ctx.record_compute(Ping);
        ctx.record_compute(Pong);

        let err = ctx.verify_deps().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Cycle detected"));
        assert!(message.contains("Ping"));
        assert!(ctx.sync_computes().is_err());
    }
}
