//! Vault existence and save-serialization state machine.
//!
//! Tracks whether a vault exists server-side and whether a save is in
//! flight, so the session layer always knows which API call to issue:
//!
//! ```text
//! Unknown ──load: not found──> Absent ──create ok──> Present
//!    │                                                  ^
//!    └──────────load: success───────────────────────────┘
//! ```
//!
//! Saves are strictly serialized: `begin_save` hands out a
//! `PendingSave` token and refuses a second one until the first is
//! completed.  Without this guard, overlapping saves could issue two
//! create calls (duplicate vault rows) or out-of-order updates (lost
//! writes).

use crate::errors::{PassVaultError, Result};

/// Whether a vault exists server-side for this account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No load has completed yet — existence is unresolved.
    Unknown,
    /// Server confirmed no vault exists.
    Absent,
    /// Server has a vault.
    Present,
}

/// Which API call a pending save must issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOp {
    /// No vault exists yet — POST a new one.
    Create,
    /// A vault exists — PUT the replacement.
    Update,
}

/// Token for a save in flight.
///
/// Not `Clone`/`Copy`: exactly one exists per in-flight save, and
/// `complete_save` consumes it, so a save cannot be completed twice.
#[derive(Debug)]
pub struct PendingSave {
    op: SaveOp,
}

impl PendingSave {
    /// The operation this save must issue.
    pub fn op(&self) -> SaveOp {
        self.op
    }
}

/// The vault sync state machine for one session.
#[derive(Debug)]
pub struct VaultSync {
    state: SyncState,
    save_in_flight: bool,
}

impl VaultSync {
    /// New sessions start with existence unresolved.
    pub fn new() -> Self {
        Self {
            state: SyncState::Unknown,
            save_in_flight: false,
        }
    }

    /// Current existence state.
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// True while a save token is outstanding.
    pub fn save_in_flight(&self) -> bool {
        self.save_in_flight
    }

    // ------------------------------------------------------------------
    // Load outcomes
    // ------------------------------------------------------------------

    /// Record a load that got a not-found response.
    pub fn record_load_absent(&mut self) {
        self.state = SyncState::Absent;
    }

    /// Record a load that returned a vault.
    pub fn record_load_present(&mut self) {
        self.state = SyncState::Present;
    }

    // A failed load records nothing — the state is left exactly as it
    // was, so a retry starts from the same place.

    // ------------------------------------------------------------------
    // Save protocol
    // ------------------------------------------------------------------

    /// Start a save, deciding create-vs-update from the current state.
    ///
    /// Fails with `Busy` if a save is already in flight, and with
    /// `SyncStateUnknown` if existence was never resolved — the machine
    /// never guesses between create and update.
    pub fn begin_save(&mut self) -> Result<PendingSave> {
        if self.save_in_flight {
            return Err(PassVaultError::Busy);
        }

        let op = match self.state {
            SyncState::Unknown => return Err(PassVaultError::SyncStateUnknown),
            SyncState::Absent => SaveOp::Create,
            SyncState::Present => SaveOp::Update,
        };

        self.save_in_flight = true;
        Ok(PendingSave { op })
    }

    /// Finish a save, successful or not.
    ///
    /// State advances only on server confirmation: a successful create
    /// moves `Absent` to `Present`; a failed save leaves the state
    /// untouched so the caller can retry.
    pub fn complete_save(&mut self, pending: PendingSave, success: bool) {
        self.save_in_flight = false;
        if success && pending.op == SaveOp::Create {
            self.state = SyncState::Present;
        }
    }
}

impl Default for VaultSync {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unknown_with_no_save_in_flight() {
        let sync = VaultSync::new();
        assert_eq!(sync.state(), SyncState::Unknown);
        assert!(!sync.save_in_flight());
    }

    #[test]
    fn save_from_unknown_is_a_precondition_error() {
        let mut sync = VaultSync::new();
        let err = sync.begin_save().unwrap_err();
        assert!(matches!(err, PassVaultError::SyncStateUnknown));
        // The failed begin must not leave the machine locked.
        assert!(!sync.save_in_flight());
    }

    #[test]
    fn absent_save_is_create_then_present() {
        let mut sync = VaultSync::new();
        sync.record_load_absent();
        assert_eq!(sync.state(), SyncState::Absent);

        let pending = sync.begin_save().unwrap();
        assert_eq!(pending.op(), SaveOp::Create);

        sync.complete_save(pending, true);
        assert_eq!(sync.state(), SyncState::Present);
    }

    #[test]
    fn present_save_is_update_and_state_unchanged() {
        let mut sync = VaultSync::new();
        sync.record_load_present();

        let pending = sync.begin_save().unwrap();
        assert_eq!(pending.op(), SaveOp::Update);

        sync.complete_save(pending, true);
        assert_eq!(sync.state(), SyncState::Present);
    }

    #[test]
    fn second_save_while_in_flight_is_busy() {
        let mut sync = VaultSync::new();
        sync.record_load_absent();

        let pending = sync.begin_save().unwrap();
        let err = sync.begin_save().unwrap_err();
        assert!(matches!(err, PassVaultError::Busy));

        // Completing the first save unblocks the machine.
        sync.complete_save(pending, true);
        assert!(sync.begin_save().is_ok());
    }

    #[test]
    fn failed_create_leaves_state_absent() {
        let mut sync = VaultSync::new();
        sync.record_load_absent();

        let pending = sync.begin_save().unwrap();
        sync.complete_save(pending, false);

        // Still Absent — the next save must retry the create.
        assert_eq!(sync.state(), SyncState::Absent);
        let retry = sync.begin_save().unwrap();
        assert_eq!(retry.op(), SaveOp::Create);
    }

    #[test]
    fn failed_load_changes_nothing() {
        let mut sync = VaultSync::new();
        // A transport failure during load records no outcome at all, so
        // the state simply stays Unknown.
        assert_eq!(sync.state(), SyncState::Unknown);
        assert!(matches!(
            sync.begin_save().unwrap_err(),
            PassVaultError::SyncStateUnknown
        ));
    }
}
