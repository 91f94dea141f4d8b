/// Summary of one reconciliation pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Results the remote acknowledged this pass.
    pub pushed: usize,
    /// Results the remote already held (conflict treated as success).
    pub conflicts_ignored: usize,
    /// True when this pass was dropped because another was in flight.
    pub coalesced: bool,
}

impl SyncReport {
    /// Total rows flipped to synced this pass.
    pub fn flushed(&self) -> usize {
        self.pushed + self.conflicts_ignored
    }
}
