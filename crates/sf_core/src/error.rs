use thiserror::Error;

/// Misconfigured state graph. None of these are recoverable at runtime.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControlError {
    /// A state asked to transition to a name that was never registered.
    #[error("state '{from}' requested transition to unregistered state '{to}'")]
    UnknownState { from: String, to: String },

    #[error("start state '{0}' is not registered")]
    UnknownStartState(String),

    #[error("state '{0}' registered more than once")]
    DuplicateState(String),

    #[error("no states registered; call setup_states first")]
    NotSetUp,
}
