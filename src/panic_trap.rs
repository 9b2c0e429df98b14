//! Panic capture around step and hook bodies.
//!
//! Bodies are allowed to panic (a failed `assert!` in a step is an
//! ordinary test failure); the trap converts the panic into data at the
//! invocation boundary so the dispatcher keeps running.

use std::{
    cell::Cell,
    panic,
    sync::Once,
};

thread_local! {
    /// Whether the current thread is inside [`trap()`].
    static TRAPPING: Cell<bool> = const { Cell::new(false) };

    /// Panic site captured by the hook for the innermost [`trap()`] call.
    static LOCATION: Cell<Option<String>> = const { Cell::new(None) };
}

/// Details of a panic caught by [`trap()`].
#[derive(Clone, Debug)]
pub(crate) struct PanicDetails {
    /// The panic payload, rendered as text.
    pub payload: String,

    /// The panic site, when the hook observed one.
    pub location: Option<String>,
}

/// Installs the process-wide panic hook once.
///
/// While a thread is trapping, its panics are silenced and their location
/// recorded; panics on other threads fall through to the previous hook.
fn install_hook() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if TRAPPING.with(Cell::get) {
                let location = info
                    .location()
                    .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()));
                LOCATION.with(|l| l.set(location));
            } else {
                previous(info);
            }
        }));
    });
}

/// Runs `f`, catching any panic and returning it as [`PanicDetails`].
pub(crate) fn trap<T>(f: impl FnOnce() -> T) -> Result<T, PanicDetails> {
    install_hook();
    TRAPPING.with(|t| t.set(true));
    LOCATION.with(|l| l.set(None));
    let result = panic::catch_unwind(panic::AssertUnwindSafe(f));
    TRAPPING.with(|t| t.set(false));
    result.map_err(|payload| {
        let payload = if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_owned()
        } else {
            "Opaque panic payload".to_owned()
        };
        PanicDetails {
            payload,
            location: LOCATION.with(Cell::take),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_the_return_value() {
        assert_eq!(trap(|| 40 + 2).unwrap(), 42);
    }

    #[test]
    fn catches_str_panics() {
        let details = trap(|| panic!("boom")).unwrap_err();
        assert_eq!(details.payload, "boom");
        assert!(details.location.unwrap().contains("panic_trap.rs"));
    }

    #[test]
    fn catches_assert_panics_with_their_message() {
        let details = trap(|| assert_eq!(1 + 1, 3, "arithmetic is broken")).unwrap_err();
        assert!(details.payload.contains("arithmetic is broken"));
    }

    #[test]
    fn trapping_resets_after_the_call() {
        let _ = trap(|| panic!("first"));
        assert_eq!(trap(|| "fine").unwrap(), "fine");
        assert!(!TRAPPING.with(Cell::get));
    }
}
