//! Small helpers with no I/O

pub mod mime;
pub mod text;
