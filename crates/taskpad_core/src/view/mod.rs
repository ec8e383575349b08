//! Text presentation of the two Taskpad views.
//!
//! # Responsibility
//! - Map application state to plain text for headless front-ends.
//! - Model the document root that carries the theme class.

pub mod document;
pub mod render;
pub mod route;
