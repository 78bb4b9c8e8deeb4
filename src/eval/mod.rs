pub mod evaluator;
pub mod snapshot;
