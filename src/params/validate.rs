//! Argument validation
//!
//! Every tuning flag and every pid goes through [`parse_numeric`] first and
//! then through a per-field range check. The functions here are plain
//! `&str -> Result` so they plug straight into clap's `value_parser`.

use thiserror::Error;

use super::model::{
    CoreLimit, IO_PRIO_MAX, IO_PRIO_MIN, NICE_MAX, NICE_MIN, OOM_ADJUST_MAX, OOM_DISABLE,
    RLIM_INFINITY,
};

/// Literal accepted by `--force-limit` in place of a byte count
pub const UNLIMITED: &str = "unlimited";

/// Fatal configuration error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Parsed to the largest representable value; treated as overflow
    #[error("invalid number '{0}'")]
    Overflow(String),

    #[error("not a number '{0}'")]
    NotANumber(String),

    #[error("invalid {field} {value} - must be in range [{min}:{max}]")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: u64,
    },

    #[error("invalid pid {0}")]
    InvalidPid(String),
}

/// Parse a whole string as a base-10 signed integer
///
/// Trailing characters, empty input and whitespace are rejected. A value
/// equal to `i64::MAX` is rejected as overflow, matching `strtol` clamping.
pub fn parse_numeric(arg: &str) -> Result<i64, ValidationError> {
    match arg.parse::<i64>() {
        Ok(i64::MAX) => Err(ValidationError::Overflow(arg.to_string())),
        Ok(val) => Ok(val),
        Err(e) => match e.kind() {
            std::num::IntErrorKind::PosOverflow => Err(ValidationError::Overflow(arg.to_string())),
            _ => Err(ValidationError::NotANumber(arg.to_string())),
        },
    }
}

fn check_range(field: &'static str, value: i64, min: i32, max: i32) -> Result<i32, ValidationError> {
    if value < min as i64 || value > max as i64 {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min: min as i64,
            max: max as u64,
        });
    }
    Ok(value as i32)
}

/// `--io-priority`: [0, 7]
pub fn io_priority(arg: &str) -> Result<i32, ValidationError> {
    check_range("IO priority", parse_numeric(arg)?, IO_PRIO_MIN, IO_PRIO_MAX)
}

/// `--oom-adjustment`: [OOM_DISABLE, OOM_ADJUST_MAX]
pub fn oom_adjustment(arg: &str) -> Result<i32, ValidationError> {
    check_range("OOM adjustment", parse_numeric(arg)?, OOM_DISABLE, OOM_ADJUST_MAX)
}

/// `--sched-nice`: [-20, 19]
pub fn sched_nice(arg: &str) -> Result<i32, ValidationError> {
    check_range("scheduling niceness", parse_numeric(arg)?, NICE_MIN, NICE_MAX)
}

/// `--force-limit`: `unlimited` or a non-negative byte count
pub fn core_limit(arg: &str) -> Result<CoreLimit, ValidationError> {
    if arg == UNLIMITED {
        return Ok(CoreLimit::Unlimited);
    }

    let value = parse_numeric(arg)?;
    if value < 0 {
        return Err(ValidationError::OutOfRange {
            field: "core file size limit",
            value,
            min: 0,
            max: RLIM_INFINITY,
        });
    }
    Ok(CoreLimit::Bytes(value as u64))
}

/// Positional pid: non-negative and within `pid_t`
pub fn pid(arg: &str) -> Result<i32, ValidationError> {
    let value = parse_numeric(arg)?;
    // Stricter than non-negativity alone: values past pid_t would be
    // silently truncated by the kernel call
    if value < 0 || value > libc::pid_t::MAX as i64 {
        return Err(ValidationError::InvalidPid(arg.to_string()));
    }
    Ok(value as i32)
}
