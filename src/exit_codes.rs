//! Exit codes used by the chatmark binary
//!
//! - 0: every input was processed
//! - 1: at least one input could not be read or written
//! - 2: tool error (invalid configuration, bad arguments)

pub const SUCCESS: i32 = 0;
pub const PROCESSING_FAILURE: i32 = 1;
pub const TOOL_ERROR: i32 = 2;

pub mod exit {
    use super::{PROCESSING_FAILURE, SUCCESS, TOOL_ERROR};

    pub fn success() -> ! {
        std::process::exit(SUCCESS)
    }

    pub fn processing_failure() -> ! {
        std::process::exit(PROCESSING_FAILURE)
    }

    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR)
    }
}
