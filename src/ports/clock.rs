//! Clock port - source of "now" for time-dependent rules.
//!
//! Cancellation windows, cooldowns and expiry are all relative to the
//! current time, so handlers read it through this port instead of calling
//! `Timestamp::now()` directly.

use crate::domain::foundation::Timestamp;

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_object_safe() {
        fn _accepts_dyn(_clock: &dyn Clock) {}
    }
}
