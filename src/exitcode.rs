//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// Data format error
pub const DATAERR: i32 = 65;

/// Configuration error
pub const CONFIG: i32 = 78;
