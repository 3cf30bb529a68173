/// Macro for prefixed status logging to stderr (only when stderr is a terminal).
///
/// Usage:
/// ```ignore
/// log_status!("flags", "Loaded {} hardware entries", count);
/// log_status!("flags", "Wrote {}", path.display());
/// ```
#[macro_export]
macro_rules! log_status {
    ($prefix:expr, $($arg:tt)*) => {
        if ::std::io::IsTerminal::is_terminal(&::std::io::stderr()) {
            eprintln!(concat!("[", $prefix, "] {}"), format_args!($($arg)*));
        }
    };
}

pub mod cli;
pub mod core;
pub mod utils;

// Re-export everything from core for ergonomic library use
// Users can write `fwflags::flags` instead of `fwflags::core::flags`
pub use self::core::*;
pub use utils::*;
