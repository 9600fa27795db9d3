use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// What to do with triggers that arrive while a restart cycle is in flight.
///
/// - `Coalesce`: keep at most one pending cycle; any further triggers collapse
///   into it (default behaviour).
/// - `Serial`: every trigger waits for the restart lock and then runs its own
///   full cycle, so N triggers always produce N cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestartPolicy {
    Coalesce,
    Serial,
}

impl Default for RestartPolicy {
    fn default() -> Self {
        RestartPolicy::Coalesce
    }
}

impl FromStr for RestartPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "coalesce" => Ok(RestartPolicy::Coalesce),
            "serial" => Ok(RestartPolicy::Serial),
            other => Err(format!(
                "invalid restart_policy: {other} (expected \"coalesce\" or \"serial\")"
            )),
        }
    }
}

impl fmt::Display for RestartPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestartPolicy::Coalesce => f.write_str("coalesce"),
            RestartPolicy::Serial => f.write_str("serial"),
        }
    }
}

/// Coarse kind of a filesystem change, as reported by the watch source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Create,
    Modify,
    Remove,
    Access,
    Other,
}

impl From<&notify::EventKind> for ChangeKind {
    fn from(kind: &notify::EventKind) -> Self {
        match kind {
            notify::EventKind::Create(_) => ChangeKind::Create,
            notify::EventKind::Modify(_) => ChangeKind::Modify,
            notify::EventKind::Remove(_) => ChangeKind::Remove,
            notify::EventKind::Access(_) => ChangeKind::Access,
            notify::EventKind::Any | notify::EventKind::Other => ChangeKind::Other,
        }
    }
}
