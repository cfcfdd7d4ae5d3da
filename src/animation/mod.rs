//! Easing curves and frame-driven envelopes.

pub(crate) mod ease;
pub(crate) mod envelope;
