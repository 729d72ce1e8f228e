//! Edges of the application: CSV command input, CSV result output and a
//! plain-text renderer for descriptor content.

pub mod csv;
pub mod render;
