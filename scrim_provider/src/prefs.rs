// Copyright 2025 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The single persisted inspector preference.

/// Persistence of the "inspector enabled" boolean.
///
/// Read once at init, written on every toggle. Survives process restarts;
/// the storage mechanism (key-value store, file, registry) is the host's
/// choice and outside the core's contract.
pub trait InspectorPrefs {
    /// Reads the persisted flag. Hosts without a stored value return `false`.
    fn load_enabled(&self) -> bool;

    /// Persists the flag. Best-effort: a failed write is not reported, the
    /// in-memory state stays authoritative for the session.
    fn store_enabled(&mut self, enabled: bool);
}

/// In-memory [`InspectorPrefs`] for hosts and tests that do not persist.
#[derive(Debug, Default, Clone, Copy)]
pub struct EphemeralPrefs {
    enabled: bool,
}

impl InspectorPrefs for EphemeralPrefs {
    fn load_enabled(&self) -> bool {
        self.enabled
    }

    fn store_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
