use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

/// Largest neighbour count a cell can have.
pub const MAX_NEIGHBOURS: u8 = 8;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// # Representation
/// Life rules are represented as
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Examples
/// ```notrust
/// B3/S23:                0000_0000_0000_1000_0000_0000_0000_1100
///
/// B0/S:                  0000_0000_0000_0001_0000_0000_0000_0000
/// B012345678/S012345678: 0000_0001_1111_1111_0000_0001_1111_1111
/// ```
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleSet {
    rule: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// Create a new `RuleSet` for the given births and survivals. For both `b` and
    /// `s`, numbers are set on a bit basis. For instance if bit `i` in `b` is on, it
    /// means `i` is included in the set of births. Any bit past the 8th is ignored.
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// Whether a dead cell with `n` live neighbours comes alive.
    pub fn can_be_born(&self, n: u8) -> bool {
        n <= MAX_NEIGHBOURS && self.births() & (1 << n) != 0
    }

    /// Whether a live cell with `n` live neighbours stays alive.
    pub fn can_survive(&self, n: u8) -> bool {
        n <= MAX_NEIGHBOURS && self.survivals() & (1 << n) != 0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("Empty rule string")]
    Empty,

    #[error("Expected '/' between births and survivals in \"{rule}\"")]
    MissingSlash { rule: String },

    #[error("Expected exactly one '/' in \"{rule}\"")]
    TooManyParts { rule: String },

    #[error("Expected births to start with 'B', got \"{got}\"")]
    MissingBirthPrefix { got: String },

    #[error("Expected survivals to start with 'S', got \"{got}\"")]
    MissingSurvivalPrefix { got: String },

    #[error("Some number of births is required")]
    EmptyBirths,

    #[error("Expected a neighbour count between 0 and 8, got '{got}'")]
    InvalidDigit { got: char },
}

/// Parse rules that look like `B3/S23`.
///
/// The prefixes may be either case. The survival run may be empty (`B1/S`), the birth run may not.
pub fn parse_rule(rule: &str) -> Result<RuleSet, RuleError> {
    if rule.is_empty() {
        return Err(RuleError::Empty);
    }

    let Some((b, s)) = rule.split_once('/') else {
        return Err(RuleError::MissingSlash {
            rule: rule.to_string(),
        });
    };

    if s.contains('/') {
        return Err(RuleError::TooManyParts {
            rule: rule.to_string(),
        });
    }

    let Some(b) = b.strip_prefix(|c: char| c == 'b' || c == 'B') else {
        return Err(RuleError::MissingBirthPrefix { got: b.to_string() });
    };

    let Some(s) = s.strip_prefix(|c: char| c == 's' || c == 'S') else {
        return Err(RuleError::MissingSurvivalPrefix { got: s.to_string() });
    };

    if b.is_empty() {
        return Err(RuleError::EmptyBirths);
    }

    let b = digits_to_num("birth", b)?;
    let s = digits_to_num("survival", s)?;

    Ok(RuleSet::new(b, s))
}

/// Format a rule in canonical `B<digits>/S<digits>` form, digits ascending.
pub fn format_rule(set: &RuleSet) -> String {
    set.to_string()
}

/// Convert the human readable birth/survival counts to a packed bit representation
fn digits_to_num(kind: &str, digits: &str) -> Result<u16, RuleError> {
    let mut n = 0;

    for c in digits.chars() {
        let d = c
            .to_digit(10)
            .filter(|&d| d <= MAX_NEIGHBOURS as u32)
            .ok_or(RuleError::InvalidDigit { got: c })?;

        if n & (1 << d) != 0 {
            warn!("Duplicate {kind} count {d} in rule. Ignoring");
        }

        n |= 1 << d;
    }

    Ok(n)
}

impl FromStr for RuleSet {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_rule(s)
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_counts = |f: &mut fmt::Formatter<'_>, mask: u16| -> fmt::Result {
            for n in 0..=MAX_NEIGHBOURS {
                if mask & (1 << n) != 0 {
                    write!(f, "{n}")?;
                }
            }

            Ok(())
        };

        f.write_str("B")?;
        write_counts(f, self.births())?;
        f.write_str("/S")?;
        write_counts(f, self.survivals())
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleSet({self})")
    }
}
