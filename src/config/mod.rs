//! Static render configuration.

pub(crate) mod render_config;
