//! Shorthand range notation.
//!
//! A range string is a comma-separated list of tokens. Each token is one of:
//!
//! | Form        | Example   | Expands to                         |
//! |-------------|-----------|------------------------------------|
//! | `XX+`       | `QQ+`     | QQ, KK, AA                         |
//! | `XX-YY`     | `99-77`   | 99, 88, 77 (either order)          |
//! | `XX`        | `JJ`      | JJ                                 |
//! | `XYs+`      | `ATs+`    | ATs, AJs, AQs, AKs                 |
//! | `XYo+`      | `KJo+`    | KJo, KQo                           |
//! | `XYs-ZWs`   | `KQs-K9s` | KQs, KJs, KTs, K9s                 |
//! | `XYo-ZWo`   | `T9o-76o` | T9o, 98o, 87o, 76o                 |
//! | `XYs`/`XYo` | `AKs`     | AKs                                |
//! | `XY`        | `AK`      | AKs, AKo                           |
//!
//! Parsing is fail-fast: the first bad token aborts the whole parse.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::Rank;
use crate::errors::RangeError;

/// Abstract two-rank starting hand before suits are assigned.
///
/// `rank1 >= rank2` always holds for parser output. Pairs carry `suited = false`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ParsedHand {
    pub rank1: Rank,
    pub rank2: Rank,
    pub suited: bool,
}

impl ParsedHand {
    pub fn pair(rank: Rank) -> Self {
        Self {
            rank1: rank,
            rank2: rank,
            suited: false,
        }
    }

    pub fn unpaired(a: Rank, b: Rank, suited: bool) -> Self {
        let (rank1, rank2) = if a >= b { (a, b) } else { (b, a) };
        Self {
            rank1,
            rank2,
            suited,
        }
    }

    pub fn is_pair(&self) -> bool {
        self.rank1 == self.rank2
    }

    /// Number of concrete suit assignments: 6 pair, 4 suited, 12 offsuit.
    pub fn combo_count(&self) -> usize {
        if self.is_pair() {
            6
        } else if self.suited {
            4
        } else {
            12
        }
    }
}

impl fmt::Display for ParsedHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pair() {
            write!(f, "{}{}", self.rank1, self.rank2)
        } else {
            let q = if self.suited { 's' } else { 'o' };
            write!(f, "{}{}{}", self.rank1, self.rank2, q)
        }
    }
}

/// Successful parse: deduplicated descriptors plus their combined combo count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRange {
    pub hands: Vec<ParsedHand>,
    pub total_combos: usize,
}

/// Boundary shape of [`parse_range`]; `hands` is empty whenever `error` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeResult {
    pub hands: Vec<ParsedHand>,
    pub total_combos: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSyntax {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn parse_range(range: &str) -> RangeResult {
    match try_parse_range(range) {
        Ok(parsed) => RangeResult {
            hands: parsed.hands,
            total_combos: parsed.total_combos,
            error: None,
        },
        Err(e) => RangeResult {
            hands: Vec::new(),
            total_combos: 0,
            error: Some(e.to_string()),
        },
    }
}

pub fn try_parse_range(range: &str) -> Result<ParsedRange, RangeError> {
    if range.trim().is_empty() {
        return Err(RangeError::Empty);
    }

    let mut hands = Vec::new();
    let mut seen = HashSet::new();
    for token in range.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        for hand in parse_token(token)? {
            if seen.insert(hand) {
                hands.push(hand);
            }
        }
    }
    if hands.is_empty() {
        return Err(RangeError::Empty);
    }

    let total_combos = hands.iter().map(ParsedHand::combo_count).sum();
    debug!(range, descriptors = hands.len(), total_combos, "parsed range");
    Ok(ParsedRange {
        hands,
        total_combos,
    })
}

/// Cheap syntax gate: character whitelist first, then a full parse.
pub fn parse_range_syntax(range: &str) -> RangeSyntax {
    let verdict = if range.trim().is_empty() {
        Err(RangeError::Empty)
    } else if !range.chars().all(is_range_char) {
        Err(RangeError::InvalidCharacters)
    } else {
        try_parse_range(range).map(|_| ())
    };
    match verdict {
        Ok(()) => RangeSyntax {
            valid: true,
            error: None,
        },
        Err(e) => RangeSyntax {
            valid: false,
            error: Some(e.to_string()),
        },
    }
}

fn is_range_char(c: char) -> bool {
    Rank::from_char(c).is_some() || matches!(c, 's' | 'o' | '+' | '-' | ',') || c.is_whitespace()
}

/// Named reference ranges for common player archetypes.
pub fn example_ranges() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Premium", "QQ+, AKs, AKo"),
        ("TAG", "88+, ATs+, AJo+, KQs"),
        ("LAG", "22+, A2s+, A9o+, K5s+, Q9s+"),
        ("Fish", "22+, A2s+, A2o+, K2s+, Q2s+, J7s+"),
        ("Nit", "QQ+, AKs, AKo"),
        ("Tight", "TT+, AQs+, AKo"),
        ("Loose", "22+, A2s+, A7o+, K7s+, Q8s+, J9s+, T9s"),
    ]
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Qualifier {
    Suited,
    Offsuit,
}

impl Qualifier {
    fn from_char(c: char) -> Option<Self> {
        match c {
            's' => Some(Qualifier::Suited),
            'o' => Some(Qualifier::Offsuit),
            _ => None,
        }
    }

    fn suited(self) -> bool {
        self == Qualifier::Suited
    }
}

fn parse_token(token: &str) -> Result<Vec<ParsedHand>, RangeError> {
    let chars: Vec<char> = token.chars().collect();
    let invalid = || RangeError::InvalidFormat(token.to_string());
    let rank_at = |i: usize| chars.get(i).copied().and_then(Rank::from_char);

    let (Some(a), Some(b)) = (rank_at(0), rank_at(1)) else {
        return Err(invalid());
    };
    let rest = &chars[2..];

    if a == b {
        return match rest {
            [] => Ok(vec![ParsedHand::pair(a)]),
            ['+'] => Ok(pairs_between(a, Rank::Ace)),
            ['-', c, d] => {
                let (Some(c), Some(d)) = (Rank::from_char(*c), Rank::from_char(*d)) else {
                    return Err(invalid());
                };
                if c != d {
                    return Err(invalid());
                }
                // pair spans are unambiguous, so `22-99` reads like `99-22`
                Ok(pairs_between(a.min(c), a.max(c)))
            }
            [q, ..] if Qualifier::from_char(*q).is_some() => {
                Err(RangeError::QualifiedPair(token.to_string()))
            }
            _ => Err(invalid()),
        };
    }

    match rest {
        [] => Ok(vec![
            ParsedHand::unpaired(a, b, true),
            ParsedHand::unpaired(a, b, false),
        ]),
        [q] => {
            let q = Qualifier::from_char(*q).ok_or_else(invalid)?;
            Ok(vec![ParsedHand::unpaired(a, b, q.suited())])
        }
        [q, '+'] => {
            let q = Qualifier::from_char(*q).ok_or_else(invalid)?;
            if a < b {
                return Err(RangeError::InvalidOrder(token.to_string()));
            }
            Ok(kickers_between(a, b, prev_rank(a), q.suited()))
        }
        [q, '-', c, d, q2] => {
            let q = Qualifier::from_char(*q).ok_or_else(invalid)?;
            if Qualifier::from_char(*q2) != Some(q) {
                return Err(invalid());
            }
            let (Some(c), Some(d)) = (Rank::from_char(*c), Rank::from_char(*d)) else {
                return Err(invalid());
            };
            if c == d {
                return Err(RangeError::QualifiedPair(token.to_string()));
            }
            let start = ParsedHand::unpaired(a, b, q.suited());
            let end = ParsedHand::unpaired(c, d, q.suited());
            span(token, start, end)
        }
        _ => Err(invalid()),
    }
}

/// Expands `start-end` either along the kicker (`KQs-K9s`) or as a sliding
/// connector run with a fixed gap (`T9o-76o`).
fn span(token: &str, start: ParsedHand, end: ParsedHand) -> Result<Vec<ParsedHand>, RangeError> {
    if start.rank1 == end.rank1 {
        if start.rank2 < end.rank2 {
            return Err(RangeError::InvalidOrder(token.to_string()));
        }
        return Ok(kickers_between(start.rank1, end.rank2, start.rank2, start.suited));
    }

    let gap = start.rank1.value() - start.rank2.value();
    if end.rank1.value() - end.rank2.value() != gap {
        return Err(RangeError::InvalidFormat(token.to_string()));
    }
    if start.rank1 < end.rank1 {
        return Err(RangeError::InvalidOrder(token.to_string()));
    }
    Ok((end.rank1.value()..=start.rank1.value())
        .rev()
        .filter_map(|hi| Some((Rank::from_u8(hi)?, Rank::from_u8(hi - gap)?)))
        .map(|(hi, lo)| ParsedHand::unpaired(hi, lo, start.suited))
        .collect())
}

/// Pairs from `high` down to `low`, inclusive.
fn pairs_between(low: Rank, high: Rank) -> Vec<ParsedHand> {
    Rank::ALL
        .iter()
        .rev()
        .filter(|&&r| r >= low && r <= high)
        .map(|&r| ParsedHand::pair(r))
        .collect()
}

/// `anchor` with every kicker in `low..=high`, strongest first.
fn kickers_between(anchor: Rank, low: Rank, high: Rank, suited: bool) -> Vec<ParsedHand> {
    Rank::ALL
        .iter()
        .rev()
        .filter(|&&r| r >= low && r <= high && r != anchor)
        .map(|&r| ParsedHand::unpaired(anchor, r, suited))
        .collect()
}

fn prev_rank(r: Rank) -> Rank {
    Rank::from_u8(r.value() - 1).unwrap_or(Rank::Two)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(r: &ParsedRange) -> Vec<String> {
        r.hands.iter().map(|h| h.to_string()).collect()
    }

    #[test]
    fn pair_plus() {
        let r = try_parse_range("QQ+").unwrap();
        assert_eq!(names(&r), ["AA", "KK", "QQ"]);
        assert!(r.hands.iter().all(|h| !h.suited));
        assert_eq!(r.total_combos, 18);
    }

    #[test]
    fn suited_single() {
        let r = try_parse_range("AKs").unwrap();
        assert_eq!(r.hands, vec![ParsedHand::unpaired(Rank::Ace, Rank::King, true)]);
        assert_eq!(r.total_combos, 4);
    }

    #[test]
    fn suited_plus_stops_below_anchor() {
        let r = try_parse_range("ATs+").unwrap();
        assert_eq!(names(&r), ["AKs", "AQs", "AJs", "ATs"]);
        assert_eq!(r.total_combos, 16);
    }

    #[test]
    fn offsuit_plus_and_range() {
        let r = try_parse_range("KJo+").unwrap();
        assert_eq!(names(&r), ["KQo", "KJo"]);
        assert_eq!(r.total_combos, 24);

        let r = try_parse_range("KQs-K9s").unwrap();
        assert_eq!(names(&r), ["KQs", "KJs", "KTs", "K9s"]);
    }

    #[test]
    fn connector_range_slides_both_ranks() {
        let r = try_parse_range("T9o-76o").unwrap();
        assert_eq!(names(&r), ["T9o", "98o", "87o", "76o"]);
        assert_eq!(r.total_combos, 48);
    }

    #[test]
    fn pair_range_and_bare_two_rank() {
        let r = try_parse_range("99-77, AK").unwrap();
        assert_eq!(names(&r), ["99", "88", "77", "AKs", "AKo"]);
        assert_eq!(r.total_combos, 18 + 16);

        let r = try_parse_range("22-44").unwrap();
        assert_eq!(names(&r), ["44", "33", "22"]);
    }

    #[test]
    fn duplicates_are_removed() {
        let r = try_parse_range("QQ+, KK, AKs, AK, KAs").unwrap();
        assert_eq!(names(&r), ["AA", "KK", "QQ", "AKs", "AKo"]);
        assert_eq!(r.total_combos, 18 + 4 + 12);
    }

    #[test]
    fn rejects_bad_ordering() {
        assert!(matches!(try_parse_range("QKs+"), Err(RangeError::InvalidOrder(_))));
        assert!(matches!(try_parse_range("K9s-KQs"), Err(RangeError::InvalidOrder(_))));
        assert!(matches!(try_parse_range("89s-JTs"), Err(RangeError::InvalidOrder(_))));
    }

    #[test]
    fn rejects_qualified_pairs_and_garbage() {
        assert!(matches!(try_parse_range("AAs"), Err(RangeError::QualifiedPair(_))));
        assert!(matches!(try_parse_range("QQo+"), Err(RangeError::QualifiedPair(_))));
        assert!(matches!(try_parse_range("AKx"), Err(RangeError::InvalidFormat(_))));
        assert!(matches!(try_parse_range("AKs-QJo"), Err(RangeError::InvalidFormat(_))));
        assert!(matches!(try_parse_range("  "), Err(RangeError::Empty)));
    }

    #[test]
    fn failure_is_all_or_nothing() {
        let r = parse_range("AA, KK, QKs+");
        assert!(r.hands.is_empty());
        assert_eq!(r.total_combos, 0);
        assert!(r.error.unwrap().contains("QKs+"));
    }

    #[test]
    fn syntax_check_rejects_foreign_characters() {
        let v = parse_range_syntax("AA, K*");
        assert!(!v.valid);
        assert_eq!(v.error.as_deref(), Some("Range contains invalid characters"));
        assert!(parse_range_syntax("88+, ATs+").valid);
    }

    #[test]
    fn presets_all_parse() {
        for (name, range) in example_ranges() {
            assert!(try_parse_range(range).is_ok(), "preset {} failed", name);
        }
    }
}
