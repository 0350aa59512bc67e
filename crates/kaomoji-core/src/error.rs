use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    /// State kept changing after the configured number of settle rounds,
    /// usually a reaction writing an ever-changing value to its own dependency.
    #[error("update loop: state did not settle after {rounds} rounds")]
    UpdateLoop { rounds: usize },
}
