use std::any::TypeId;

use thiserror::Error;

use crate::TopologyError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("State not found: {name}")]
    StateNotFound { id: TypeId, name: &'static str },
    #[error("Compute not found: {name}")]
    ComputeNotFound { id: TypeId, name: &'static str },
    #[error("Invalid compute dependencies: {0}")]
    Topology(#[from] TopologyError<&'static str>),
}

impl Error {
    pub fn state_not_found<T: 'static>() -> Self {
        Self::StateNotFound {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn compute_not_found<T: 'static>() -> Self {
        Self::ComputeNotFound {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }
}
