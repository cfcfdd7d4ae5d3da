//! Data-driven motion presets and color grades.

pub(crate) mod grade;
pub(crate) mod preset;
