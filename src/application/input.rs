//! Parsing of `KEY=VALUE` command arguments

use crate::error::{LightsError, Result};

/// Split `key=value` with an integer value. `what` names the kind of pair in errors.
pub fn parse_assignment(arg: &str, what: &str) -> Result<(String, i64)> {
    let invalid = || LightsError::InvalidInput(format!("Invalid {}: '{}'", what, arg));

    let (key, value) = arg.split_once('=').ok_or_else(invalid)?;
    let key = key.trim();
    if key.is_empty() {
        return Err(invalid());
    }
    let value = value.trim().parse::<i64>().map_err(|_| invalid())?;
    Ok((key.to_string(), value))
}

pub fn parse_assignments(args: &[String], what: &str) -> Result<Vec<(String, i64)>> {
    args.iter().map(|a| parse_assignment(a, what)).collect()
}
