//! Per-screen fetch state machine.
//!
//! Screens hold the only client-side state; there is no cache layer. A
//! failed fetch either retains the previously loaded data or resets to
//! empty — each screen picks its policy at the call site.

/// What to do with previously loaded data when a fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    RetainPrior,
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState<T> {
    Idle,
    Loading { prior: Option<T> },
    Loaded(T),
    Error { message: String, prior: Option<T> },
}

impl<T> Default for ScreenState<T> {
    fn default() -> Self {
        ScreenState::Idle
    }
}

impl<T> ScreenState<T> {
    /// Begin a fetch, carrying any previously loaded data through.
    pub fn start(&mut self) {
        let prior = match std::mem::take(self) {
            ScreenState::Loaded(data) => Some(data),
            ScreenState::Loading { prior } | ScreenState::Error { prior, .. } => prior,
            ScreenState::Idle => None,
        };
        *self = ScreenState::Loading { prior };
    }

    pub fn succeed(&mut self, data: T) {
        *self = ScreenState::Loaded(data);
    }

    pub fn fail(&mut self, message: impl Into<String>, policy: FailurePolicy) {
        let prior = match (policy, std::mem::take(self)) {
            (FailurePolicy::Reset, _) => None,
            (FailurePolicy::RetainPrior, ScreenState::Loaded(data)) => Some(data),
            (FailurePolicy::RetainPrior, ScreenState::Loading { prior })
            | (FailurePolicy::RetainPrior, ScreenState::Error { prior, .. }) => prior,
            (FailurePolicy::RetainPrior, ScreenState::Idle) => None,
        };
        *self = ScreenState::Error {
            message: message.into(),
            prior,
        };
    }

    /// The data a screen can render right now, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            ScreenState::Loaded(data) => Some(data),
            ScreenState::Loading { prior } | ScreenState::Error { prior, .. } => prior.as_ref(),
            ScreenState::Idle => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ScreenState::Error { message, .. } => Some(message),
            _ => None,
        }
    }
}
