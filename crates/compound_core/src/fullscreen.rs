use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FullscreenState {
    #[default]
    Collapsed,
    Fullscreen,
}

/// Step of the enter sequence that failed to register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterStep {
    Expand,
    ToggleFullPage,
    CloseMarker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterOutcome {
    Entered,
    Failed { step: EnterStep },
}

/// Ways of leaving the full-page view, tried in [`ExitStrategy::ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitStrategy {
    CloseControl,
    ToggleFullPage,
    EscapeKey,
}

impl ExitStrategy {
    pub const ORDER: [ExitStrategy; 3] = [
        ExitStrategy::CloseControl,
        ExitStrategy::ToggleFullPage,
        ExitStrategy::EscapeKey,
    ];
}

impl fmt::Display for ExitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitStrategy::CloseControl => write!(f, "close control"),
            ExitStrategy::ToggleFullPage => write!(f, "toggle full page"),
            ExitStrategy::EscapeKey => write!(f, "escape key"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    Succeeded { via: ExitStrategy },
    AllFailed,
}

impl ExitOutcome {
    pub fn succeeded(self) -> bool {
        matches!(self, ExitOutcome::Succeeded { .. })
    }
}
