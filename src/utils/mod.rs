//! Generic utility primitives with zero domain knowledge.
//!
//! - `io` - File I/O with consistent error handling
//! - `paths` - User path expansion
//! - `slugify` - Filename token sanitization

pub mod io;
pub mod paths;
pub mod slugify;
