// src/reentry.rs

//! Marker that tells a supervised child it must not start a supervisor of
//! its own.
//!
//! The marker is only ever placed in the child's environment (see
//! [`crate::exec::supervisor`]); the supervisor's own environment is left
//! untouched.

/// Environment variable set on every supervised child.
pub const REENTRY_KEY: &str = "__DEVLOOP_RELOAD__";

/// Value the variable must hold for the marker to count.
pub const REENTRY_VALUE: &str = "__DEVLOOP_RELOAD__";

/// Whether the current process was started by a devloop supervisor.
pub fn is_supervised_child() -> bool {
    is_supervised_child_with(|key| std::env::var(key).ok())
}

/// Same as [`is_supervised_child`], reading variables through `lookup`.
pub fn is_supervised_child_with<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(REENTRY_KEY).as_deref() == Some(REENTRY_VALUE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_must_hold_the_sentinel_value() {
        assert!(is_supervised_child_with(|k| {
            (k == REENTRY_KEY).then(|| REENTRY_VALUE.to_string())
        }));
        assert!(!is_supervised_child_with(|_| Some("1".to_string())));
        assert!(!is_supervised_child_with(|_| None));
    }
}
