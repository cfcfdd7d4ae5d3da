//! Stateless per-frame scene evaluation.

pub(crate) mod evaluator;
