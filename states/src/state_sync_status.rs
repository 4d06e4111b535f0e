/// Synchronisation status of a stored state or compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateSyncStatus {
    /// Registered but never observed by a sync pass.
    #[default]
    BeforeInit,
    /// Changed since the last sync; dependents must be recomputed.
    Dirty,
    /// Up to date.
    Clean,
}

impl StateSyncStatus {
    pub fn needs_sync(self) -> bool {
        !matches!(self, Self::Clean)
    }
}
