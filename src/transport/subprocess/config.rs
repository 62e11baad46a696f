//! Configuration constants for the subprocess transport

use std::time::Duration;

/// Default time to wait for each response frame
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Default maximum length of one inbound line (1 MiB)
pub const DEFAULT_MAX_LINE_BYTES: usize = 1024 * 1024;

/// Environment variables that are never forwarded to the server process
///
/// These variables change how the child loads code, so caller-supplied values
/// for them are dropped. Values inherited from the client's own environment
/// are left untouched.
pub const DANGEROUS_ENV_VARS: &[&str] = &[
    "LD_PRELOAD",
    "LD_LIBRARY_PATH",
    "DYLD_INSERT_LIBRARIES",
    "DYLD_LIBRARY_PATH",
    "NODE_OPTIONS",
    "PYTHONPATH",
    "PERL5LIB",
    "RUBYLIB",
];
