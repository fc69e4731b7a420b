//! Periodic refresh scheduling tied to page visibility.
//!
//! Two independent timers drive background work: telemetry every 30 seconds
//! and the silent update check every 5 minutes (only while the auto-update
//! toggle is on). Both stop while the page is hidden and resume when it
//! becomes visible again.

use gloo_timers::callback::Interval;

/// Telemetry refresh period.
pub const STATUS_REFRESH_SECS: u32 = 30;
/// Background update check period.
pub const UPDATE_CHECK_SECS: u32 = 300;

/// Which timers should currently be running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wanted {
    pub status: bool,
    pub update_check: bool,
}

/// Desired timer state for the given page conditions.
#[must_use]
pub fn wanted(visible: bool, auto_update: bool) -> Wanted {
    Wanted {
        status: visible,
        update_check: visible && auto_update,
    }
}

/// Owner of the running interval timers. Dropping an `Interval` cancels it.
#[derive(Default)]
pub struct Pollers {
    status: Option<Interval>,
    update_check: Option<Interval>,
}

impl Pollers {
    /// Reconcile running timers against the desired state. A timer that is
    /// already running is kept as-is, so reapplying the same state never
    /// doubles an interval.
    pub fn apply<S, U>(&mut self, wanted: Wanted, on_status: S, on_update_check: U)
    where
        S: Fn() + 'static,
        U: Fn() + 'static,
    {
        reconcile(&mut self.status, wanted.status, STATUS_REFRESH_SECS, on_status);
        reconcile(
            &mut self.update_check,
            wanted.update_check,
            UPDATE_CHECK_SECS,
            on_update_check,
        );
    }

    /// Cancel both timers.
    pub fn stop_all(&mut self) {
        self.status = None;
        self.update_check = None;
    }
}

fn reconcile<F>(slot: &mut Option<Interval>, want: bool, period_secs: u32, tick: F)
where
    F: Fn() + 'static,
{
    match (slot.is_some(), want) {
        (false, true) => *slot = Some(Interval::new(period_secs * 1_000, tick)),
        (true, false) => *slot = None,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_run_both_timers_when_visible_with_auto_update_on() {
        assert_eq!(
            wanted(true, true),
            Wanted {
                status: true,
                update_check: true
            }
        );
    }

    #[test]
    fn should_stop_update_check_when_auto_update_is_off() {
        assert_eq!(
            wanted(true, false),
            Wanted {
                status: true,
                update_check: false
            }
        );
    }

    #[test]
    fn should_stop_all_timers_when_page_is_hidden() {
        assert_eq!(wanted(false, true), Wanted::default());
        assert_eq!(wanted(false, false), Wanted::default());
    }
}
