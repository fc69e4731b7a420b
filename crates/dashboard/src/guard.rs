//! Single-flight guard for mutating commands.
//!
//! Every command that mutates backend state (apply update, reboot,
//! add/connect/test/remove device) acquires a permit before issuing its
//! request. A second invocation while a permit is live is rejected, so rapid
//! repeated clicks cannot double-submit a command. The permit releases on
//! drop, covering every exit path of the command.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// Registry of commands currently in flight, keyed by operation name.
#[derive(Clone, Default)]
pub struct CommandGuard {
    active: Arc<Mutex<HashSet<&'static str>>>,
}

fn active_set(active: &Mutex<HashSet<&'static str>>) -> MutexGuard<'_, HashSet<&'static str>> {
    // The app is single-threaded; a poisoned lock can only come from a
    // panic mid-update, in which case the set content is still usable.
    active.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

impl CommandGuard {
    /// Try to start a command. Returns `None` while an earlier invocation of
    /// the same command still holds its permit.
    #[must_use]
    pub fn try_acquire(&self, command: &'static str) -> Option<CommandPermit> {
        if active_set(&self.active).insert(command) {
            Some(CommandPermit {
                command,
                active: Arc::clone(&self.active),
            })
        } else {
            None
        }
    }

    /// Whether the named command is currently in flight.
    #[must_use]
    pub fn is_active(&self, command: &str) -> bool {
        active_set(&self.active).contains(command)
    }
}

/// RAII permit for one in-flight command; releases the slot on drop.
pub struct CommandPermit {
    command: &'static str,
    active: Arc<Mutex<HashSet<&'static str>>>,
}

impl Drop for CommandPermit {
    fn drop(&mut self) {
        active_set(&self.active).remove(self.command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_reject_second_acquisition_while_permit_is_live() {
        let guard = CommandGuard::default();
        let permit = guard.try_acquire("perform-update");
        assert!(permit.is_some());
        assert!(guard.try_acquire("perform-update").is_none());
        assert!(guard.is_active("perform-update"));
    }

    #[test]
    fn should_release_slot_when_permit_is_dropped() {
        let guard = CommandGuard::default();
        let permit = guard.try_acquire("reboot");
        drop(permit);
        assert!(!guard.is_active("reboot"));
        assert!(guard.try_acquire("reboot").is_some());
    }

    #[test]
    fn should_track_commands_independently() {
        let guard = CommandGuard::default();
        let _update = guard.try_acquire("perform-update").unwrap();
        let _remove = guard.try_acquire("remove-device").unwrap();
        assert!(guard.is_active("perform-update"));
        assert!(guard.is_active("remove-device"));
        assert!(!guard.is_active("connect-device"));
    }

    #[test]
    fn should_share_state_between_clones() {
        let guard = CommandGuard::default();
        let clone = guard.clone();
        let _permit = guard.try_acquire("test-device").unwrap();
        assert!(clone.try_acquire("test-device").is_none());
    }
}
