//! Exit code constants for the symposium CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable or malformed config, I/O)
//! - 2: Invalid topology (rejected before any philosopher is seated)
//! - 3: Protocol failure (fork, barrier or collector contract violated)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, config that cannot be read or parsed, I/O failures.
pub const USER_ERROR: i32 = 1;

/// The seating plan failed construction-time validation.
pub const INVALID_TOPOLOGY: i32 = 2;

/// A coordination primitive was misused during a run.
pub const PROTOCOL_FAILURE: i32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, INVALID_TOPOLOGY, PROTOCOL_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
