// resolution.rs - Parsing "columns x rows" requests

use std::str::FromStr;

use crate::dimension::DesiredResolution;
use crate::error::{LifeError, Result};

/// Fallback step interval when the text is not a number.
pub const DEFAULT_INTERVAL_MS: u64 = 500;

fn split_number(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn positive(digits: &str) -> Option<usize> {
    digits.parse::<usize>().ok().filter(|&n| n > 0)
}

/// Parses `"40x30"`, `"40 X 30"`, `"40×30"`, `"40,30"` or `"40 30"`.
///
/// Exactly one separator (`x`, `×`, `,`, or a whitespace run) sits between two
/// positive integers; whitespace around the separator and the whole string is
/// ignored.
pub fn parse_resolution(text: &str) -> Result<DesiredResolution> {
    let invalid = || LifeError::InvalidFormat(text.to_string());
    let cleaned = text.trim().to_lowercase().replace('×', "x");

    let (cols, rest) = split_number(&cleaned);
    let trimmed = rest.trim_start();
    let had_space = trimmed.len() < rest.len();
    let (had_sep, rest) = match trimmed.strip_prefix(['x', ',']) {
        Some(after) => (true, after.trim_start()),
        None => (false, trimmed),
    };
    if !had_space && !had_sep {
        return Err(invalid());
    }
    let (rows, tail) = split_number(rest);
    if !tail.is_empty() {
        return Err(invalid());
    }

    match (positive(cols), positive(rows)) {
        (Some(columns), Some(rows)) => Ok(DesiredResolution { columns, rows }),
        _ => Err(invalid()),
    }
}

impl FromStr for DesiredResolution {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self> {
        parse_resolution(s)
    }
}

/// Step interval from user text: non-numbers fall back to the default,
/// anything below 1ms becomes 1ms.
pub fn parse_interval(text: &str) -> u64 {
    match text.trim().parse::<i64>() {
        Ok(ms) => ms.max(1) as u64,
        Err(_) => DEFAULT_INTERVAL_MS,
    }
}
