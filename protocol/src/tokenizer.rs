//! Turn-grouping tokenizer for replay logs
//!
//! Lines before the first `|turn|` marker belong to turn 0, the preamble
//! holding player info, team preview and the lead switch-ins. Every later
//! line belongs to the most recent marker. Markers must count up from 1
//! without gaps; anything else makes the log untrustworthy.

use crate::ParseError;

const TURN_PREFIX: &str = "|turn|";

/// One non-empty log line tagged with the turn it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizedLine<'a> {
    /// Turn number (0 = preamble)
    pub turn: u32,
    /// 1-based line number in the raw log
    pub line_no: usize,
    /// Trimmed line text, passed through verbatim
    pub raw: &'a str,
}

/// All lines belonging to a single turn, in log order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnLines<'a> {
    pub turn: u32,
    pub lines: Vec<TokenizedLine<'a>>,
}

/// Tokenizer over a borrowed raw log
///
/// The tokenizer itself holds no cursor; [`LogTokenizer::lines`] and
/// [`LogTokenizer::turns`] each start a fresh pass, so the sequence can be
/// replayed as often as needed.
#[derive(Debug, Clone, Copy)]
pub struct LogTokenizer<'a> {
    raw: &'a str,
}

impl<'a> LogTokenizer<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self { raw }
    }

    /// Lazily iterate `(turn, line)` pairs
    ///
    /// `|turn|` marker lines are consumed by the tokenizer and not yielded.
    /// The iterator stops after the first error.
    pub fn lines(&self) -> Lines<'a> {
        Lines {
            inner: self.raw.lines().enumerate(),
            turn: 0,
            failed: false,
        }
    }

    /// Lazily iterate lines grouped by turn
    ///
    /// The preamble group (turn 0) is always yielded first, even when empty.
    pub fn turns(&self) -> Turns<'a> {
        Turns {
            lines: self.lines(),
            current: Some(TurnLines {
                turn: 0,
                lines: Vec::new(),
            }),
            pending: None,
        }
    }
}

/// Iterator returned by [`LogTokenizer::lines`]
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
    turn: u32,
    failed: bool,
}

impl<'a> Lines<'a> {
    /// Current turn, as set by the last marker seen
    pub fn turn(&self) -> u32 {
        self.turn
    }

    fn advance_turn(&mut self, line_no: usize, value: &str) -> Result<(), ParseError> {
        let found: u32 = value
            .trim()
            .parse()
            .map_err(|_| ParseError::MalformedTurn {
                line: line_no,
                value: value.to_string(),
            })?;

        let expected = self.turn + 1;
        if found != expected {
            return Err(ParseError::NonMonotonicTurn {
                line: line_no,
                expected,
                found,
            });
        }

        self.turn = found;
        Ok(())
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Result<TokenizedLine<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        while let Some((idx, line)) = self.inner.next() {
            let line = line.trim();
            if line.is_empty() || line == "|" {
                continue;
            }

            let line_no = idx + 1;
            if let Some(value) = line.strip_prefix(TURN_PREFIX) {
                if let Err(e) = self.advance_turn(line_no, value) {
                    self.failed = true;
                    return Some(Err(e));
                }
                continue;
            }

            return Some(Ok(TokenizedLine {
                turn: self.turn,
                line_no,
                raw: line,
            }));
        }

        None
    }
}

/// Iterator returned by [`LogTokenizer::turns`]
#[derive(Debug, Clone)]
pub struct Turns<'a> {
    lines: Lines<'a>,
    current: Option<TurnLines<'a>>,
    pending: Option<TokenizedLine<'a>>,
}

impl<'a> Turns<'a> {
    fn close(&mut self, current: TurnLines<'a>) -> Option<Result<TurnLines<'a>, ParseError>> {
        self.current = Some(TurnLines {
            turn: current.turn + 1,
            lines: Vec::new(),
        });
        Some(Ok(current))
    }
}

impl<'a> Iterator for Turns<'a> {
    type Item = Result<TurnLines<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut current = self.current.take()?;

        if let Some(line) = self.pending.take() {
            if line.turn != current.turn {
                // A marker with no lines of its own; emit it empty
                self.pending = Some(line);
                return self.close(current);
            }
            current.lines.push(line);
        }

        loop {
            match self.lines.next() {
                Some(Ok(line)) if line.turn == current.turn => current.lines.push(line),
                Some(Ok(line)) => {
                    self.pending = Some(line);
                    return self.close(current);
                }
                Some(Err(e)) => return Some(Err(e)),
                None => {
                    if self.lines.turn() > current.turn {
                        return self.close(current);
                    }
                    return Some(Ok(current));
                }
            }
        }
    }
}

/// Undo the `\/` escaping found in logs scraped from replay HTML/JSON
pub fn unescape_line(line: &str) -> std::borrow::Cow<'_, str> {
    if line.contains("\\/") {
        std::borrow::Cow::Owned(line.replace("\\/", "/"))
    } else {
        std::borrow::Cow::Borrowed(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "|player|p1|Alice|1\n\
                       |player|p2|Bob|2\n\
                       |switch|p1a: Pikachu|Pikachu, L50|100/100\n\
                       |turn|1\n\
                       |move|p1a: Pikachu|Thunderbolt|p2a: Gyarados\n\
                       \n\
                       |turn|2\n\
                       |move|p1a: Pikachu|Quick Attack|p2a: Gyarados\n\
                       |win|Alice\n";

    #[test]
    fn test_lines_are_tagged_with_turn() {
        let tokenizer = LogTokenizer::new(LOG);
        let lines: Vec<_> = tokenizer.lines().collect::<Result<_, _>>().unwrap();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0].turn, 0);
        assert_eq!(lines[2].turn, 0);
        assert_eq!(lines[3].turn, 1);
        assert_eq!(lines[3].raw, "|move|p1a: Pikachu|Thunderbolt|p2a: Gyarados");
        assert_eq!(lines[5].turn, 2);
        assert_eq!(lines[5].raw, "|win|Alice");
    }

    #[test]
    fn test_turn_markers_are_not_yielded() {
        let tokenizer = LogTokenizer::new(LOG);
        assert!(
            tokenizer
                .lines()
                .all(|l| !l.unwrap().raw.starts_with("|turn|"))
        );
    }

    #[test]
    fn test_turns_groups_lines() {
        let tokenizer = LogTokenizer::new(LOG);
        let turns: Vec<_> = tokenizer.turns().collect::<Result<_, _>>().unwrap();

        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].turn, 0);
        assert_eq!(turns[0].lines.len(), 3);
        assert_eq!(turns[1].turn, 1);
        assert_eq!(turns[1].lines.len(), 1);
        assert_eq!(turns[2].turn, 2);
        assert_eq!(turns[2].lines.len(), 2);
    }

    #[test]
    fn test_tokenizer_is_restartable() {
        let tokenizer = LogTokenizer::new(LOG);
        let first: Vec<_> = tokenizer.lines().collect();
        let second: Vec<_> = tokenizer.lines().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unrecognized_lines_pass_through() {
        let tokenizer = LogTokenizer::new("|turn|1\n|someunknown|data\nplain text");
        let lines: Vec<_> = tokenizer.lines().collect::<Result<_, _>>().unwrap();
        assert_eq!(lines[0].raw, "|someunknown|data");
        assert_eq!(lines[1].raw, "plain text");
    }

    #[test]
    fn test_non_numeric_turn_fails() {
        let tokenizer = LogTokenizer::new("|turn|1\n|turn|two\n");
        let result: Result<Vec<_>, _> = tokenizer.lines().collect();
        assert_eq!(
            result.unwrap_err(),
            ParseError::MalformedTurn {
                line: 2,
                value: "two".to_string()
            }
        );
    }

    #[test]
    fn test_non_monotonic_turn_fails() {
        let tokenizer = LogTokenizer::new("|turn|1\n|turn|3\n");
        let result: Result<Vec<_>, _> = tokenizer.turns().collect();
        assert_eq!(
            result.unwrap_err(),
            ParseError::NonMonotonicTurn {
                line: 2,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_repeated_turn_fails() {
        let tokenizer = LogTokenizer::new("|turn|1\n|turn|1\n");
        assert!(tokenizer.lines().any(|line| line.is_err()));
    }

    #[test]
    fn test_lines_stop_after_error() {
        let tokenizer = LogTokenizer::new("|turn|x\n|move|p1a: A|Tackle|p2a: B\n");
        let mut lines = tokenizer.lines();
        assert!(lines.next().unwrap().is_err());
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_trailing_empty_turn_is_kept() {
        let tokenizer = LogTokenizer::new("|start\n|turn|1\n");
        let turns: Vec<_> = tokenizer.turns().collect::<Result<_, _>>().unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].turn, 1);
        assert!(turns[1].lines.is_empty());
    }

    #[test]
    fn test_empty_middle_turn_is_kept() {
        let tokenizer = LogTokenizer::new("|turn|1\n|turn|2\n|move|p1a: A|Tackle|p2a: B\n");
        let turns: Vec<_> = tokenizer.turns().collect::<Result<_, _>>().unwrap();
        let numbers: Vec<u32> = turns.iter().map(|t| t.turn).collect();
        assert_eq!(numbers, vec![0, 1, 2]);
        assert!(turns[1].lines.is_empty());
        assert_eq!(turns[2].lines.len(), 1);
    }

    #[test]
    fn test_unescape_line() {
        assert_eq!(unescape_line("|-damage|p1a: A|50\\/100"), "|-damage|p1a: A|50/100");
        assert_eq!(unescape_line("|turn|1"), "|turn|1");
    }
}
