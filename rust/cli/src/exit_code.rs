//! Exit code constants for the CLI application.

/// Success exit code (standard Unix convention).
pub const SUCCESS: i32 = 0;

/// Invalid input, failed computation, or I/O failure.
pub const ERROR: i32 = 2;

/// Run stopped by its deadline before finishing.
pub const INTERRUPTED: i32 = 130;
