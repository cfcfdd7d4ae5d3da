//! Active-word caption lookup.

pub(crate) mod resolver;
