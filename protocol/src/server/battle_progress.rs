//! Turn boundaries and battle outcome

use anyhow::Result;

use super::ServerMessage;
use crate::ParseError;

/// Parse |turn|NUMBER
///
/// Turn ordering is checked by the tokenizer; this only reads the number.
pub fn parse_turn(parts: &[&str]) -> Result<ServerMessage> {
    let raw = parts.get(2).map(|s| s.trim()).unwrap_or_default();
    let number = raw
        .parse()
        .map_err(|_| ParseError::InvalidFormat(format!("turn number {raw:?}")))?;
    Ok(ServerMessage::Turn(number))
}

/// Parse |win|USER
///
/// The name is matched against the players later, so an empty one is
/// rejected here rather than silently matching nobody.
pub fn parse_win(parts: &[&str]) -> Result<ServerMessage> {
    match parts.get(2).map(|s| s.trim()) {
        Some(user) if !user.is_empty() => Ok(ServerMessage::Win(user.to_string())),
        _ => Err(ParseError::MissingField("winner".to_string()).into()),
    }
}
