//! Presentation layer: labels, messages and navigation links.

pub mod display;
pub mod links;
