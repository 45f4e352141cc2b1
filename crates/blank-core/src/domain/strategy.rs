//! Merge strategy flags.
//!
//! Flags imply each other (`dedup` ⇒ `append` ⇒ `merge`), so a set of flags
//! collapses to the strongest one it contains.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// One conflict-resolution flag, as given by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyFlag {
    /// Only fill in what the target lacks.
    Set,
    /// Overwrite, recursing into mappings.
    Merge,
    /// Merge, concatenating sequences.
    Append,
    /// Append, dropping elements already present.
    Dedup,
}

impl StrategyFlag {
    pub const ALL: [Self; 4] = [Self::Set, Self::Merge, Self::Append, Self::Dedup];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Merge => "merge",
            Self::Append => "append",
            Self::Dedup => "dedup",
        }
    }

    /// The single-letter operation flag (`-s`, `-m`, `-a`, `-u`).
    pub const fn short(&self) -> char {
        match self {
            Self::Set => 's',
            Self::Merge => 'm',
            Self::Append => 'a',
            Self::Dedup => 'u',
        }
    }

    pub fn from_short(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.short() == c)
    }
}

impl fmt::Display for StrategyFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the long flag names; `unique` is an alias of `dedup`.
impl FromStr for StrategyFlag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "set" => Ok(Self::Set),
            "merge" => Ok(Self::Merge),
            "append" => Ok(Self::Append),
            "dedup" | "unique" => Ok(Self::Dedup),
            _ => Err(DomainError::UnknownStrategy(s.to_owned())),
        }
    }
}

/// The effective strategy for one patch source.
///
/// Variants are ordered by strength; each one includes the behaviour of the
/// ones before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MergeStrategy {
    #[default]
    Set,
    Merge,
    Append,
    Dedup,
}

impl MergeStrategy {
    pub fn from_flags<I>(flags: I) -> Self
    where
        I: IntoIterator<Item = StrategyFlag>,
    {
        flags
            .into_iter()
            .map(Self::from)
            .max()
            .unwrap_or_default()
    }

    /// Whether values already in the target may be replaced.
    pub fn overwrites(self) -> bool {
        self >= Self::Merge
    }

    /// Whether two sequences are concatenated rather than replaced.
    pub fn appends(self) -> bool {
        self >= Self::Append
    }

    pub fn dedups(self) -> bool {
        self == Self::Dedup
    }
}

impl From<StrategyFlag> for MergeStrategy {
    fn from(flag: StrategyFlag) -> Self {
        match flag {
            StrategyFlag::Set => Self::Set,
            StrategyFlag::Merge => Self::Merge,
            StrategyFlag::Append => Self::Append,
            StrategyFlag::Dedup => Self::Dedup,
        }
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Set => "set",
            Self::Merge => "merge",
            Self::Append => "append",
            Self::Dedup => "dedup",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strongest_flag_wins() {
        use StrategyFlag::*;
        assert_eq!(MergeStrategy::from_flags([Set]), MergeStrategy::Set);
        assert_eq!(MergeStrategy::from_flags([Set, Merge]), MergeStrategy::Merge);
        assert_eq!(
            MergeStrategy::from_flags([Append, Merge]),
            MergeStrategy::Append
        );
        assert_eq!(MergeStrategy::from_flags([Dedup]), MergeStrategy::Dedup);
    }

    #[test]
    fn no_flags_means_set() {
        assert_eq!(MergeStrategy::from_flags(Vec::new()), MergeStrategy::Set);
    }

    #[test]
    fn implications() {
        assert!(!MergeStrategy::Set.overwrites());
        assert!(MergeStrategy::Merge.overwrites());
        assert!(!MergeStrategy::Merge.appends());
        assert!(MergeStrategy::Append.overwrites());
        assert!(MergeStrategy::Dedup.appends());
        assert!(!MergeStrategy::Append.dedups());
    }

    #[test]
    fn parses_long_names() {
        for flag in StrategyFlag::ALL {
            assert_eq!(flag.as_str().parse::<StrategyFlag>().unwrap(), flag);
        }
        assert_eq!(
            "unique".parse::<StrategyFlag>().unwrap(),
            StrategyFlag::Dedup
        );
    }

    #[test]
    fn letters_and_other_cases_are_not_long_names() {
        for name in ["m", "s", "Merge", "SET", "x"] {
            assert_eq!(
                name.parse::<StrategyFlag>(),
                Err(DomainError::UnknownStrategy(name.into()))
            );
        }
    }

    #[test]
    fn short_letters_round_trip() {
        for flag in StrategyFlag::ALL {
            assert_eq!(StrategyFlag::from_short(flag.short()), Some(flag));
        }
        assert_eq!(StrategyFlag::from_short('x'), None);
    }
}
