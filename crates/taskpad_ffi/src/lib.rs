//! Flutter bridge over `taskpad_core`.

pub mod api;
