//! Graphics backend implementations
//!
//! Only a headless backend ships with the engine; windowed backends live in
//! the host application.

pub mod recording;
