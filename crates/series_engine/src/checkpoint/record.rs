//! Text encoding of a recurrence state.

use crate::error::{StateError, StateResult};
use crate::recurrence::RecurrenceState;
use num_bigint::BigInt;
use num_rational::BigRational;
use std::str::FromStr;

/// Number of fields in a checkpoint record.
pub const FIELD_COUNT: usize = 6;

/// Field names in record order.
pub const FIELD_NAMES: [&str; FIELD_COUNT] = ["sum", "q", "m", "k", "l", "x"];

/// Encodes a state as a single record line, without a trailing newline.
pub fn encode(state: &RecurrenceState) -> String {
    format!(
        "{} {} {} {} {} {}",
        state.sum(),
        state.q(),
        state.m(),
        state.k(),
        state.l(),
        state.x()
    )
}

/// Decodes a record produced by [`encode`].
///
/// Leading and trailing whitespace is ignored. A missing field, an extra
/// token or a token that does not parse is a [`StateError::MalformedState`].
/// So is a well-formed record that no run could have written; see
/// [`RecurrenceState::check_consistency`].
pub fn decode(text: &str) -> StateResult<RecurrenceState> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != FIELD_COUNT {
        return Err(StateError::MalformedState(format!(
            "expected {} fields ({}), found {}",
            FIELD_COUNT,
            FIELD_NAMES.join(" "),
            tokens.len()
        )));
    }

    let sum = parse_rational(FIELD_NAMES[0], tokens[0])?;
    let q = tokens[1]
        .parse::<u64>()
        .map_err(|e| invalid_token(FIELD_NAMES[1], tokens[1], e))?;
    let m = parse_rational(FIELD_NAMES[2], tokens[2])?;
    let k = parse_integer(FIELD_NAMES[3], tokens[3])?;
    let l = parse_integer(FIELD_NAMES[4], tokens[4])?;
    let x = parse_integer(FIELD_NAMES[5], tokens[5])?;

    let state = RecurrenceState::from_parts(q, sum, m, k, l, x);
    state
        .check_consistency()
        .map_err(StateError::MalformedState)?;

    Ok(state)
}

fn parse_rational(field: &str, token: &str) -> StateResult<BigRational> {
    BigRational::from_str(token).map_err(|e| invalid_token(field, token, e))
}

fn parse_integer(field: &str, token: &str) -> StateResult<BigInt> {
    BigInt::from_str(token).map_err(|e| invalid_token(field, token, e))
}

fn invalid_token(field: &str, token: &str, cause: impl std::fmt::Display) -> StateError {
    StateError::MalformedState(format!(
        "field '{}' has invalid value '{}': {}",
        field,
        abbreviate(token),
        cause
    ))
}

/// Shortens multi-megabyte tokens for error messages.
fn abbreviate(token: &str) -> String {
    const LIMIT: usize = 64;
    if token.len() <= LIMIT {
        token.to_string()
    } else {
        let head: String = token.chars().take(LIMIT).collect();
        format!("{}... ({} bytes)", head, token.len())
    }
}
