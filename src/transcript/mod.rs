//! Word-level transcript input.

pub(crate) mod model;
