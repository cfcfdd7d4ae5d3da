//! Session-oriented frame evaluation over a whole transcript.

pub(crate) mod render_session;
pub(crate) mod sink;
