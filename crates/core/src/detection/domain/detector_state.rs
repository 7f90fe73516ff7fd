use std::fmt;

/// Lifecycle of a face detector capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectorState {
    Unloaded,
    Loading,
    Ready,
    Failed,
}

impl fmt::Display for DetectorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectorState::Unloaded => write!(f, "unloaded"),
            DetectorState::Loading => write!(f, "loading"),
            DetectorState::Ready => write!(f, "ready"),
            DetectorState::Failed => write!(f, "failed"),
        }
    }
}
