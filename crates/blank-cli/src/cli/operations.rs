//! Scanner for the `update` operation list.
//!
//! `update` takes its operations as a flat token list
//! (`-s /a 1 -au /b '[2]' -m '{"c": 3}'`) that clap cannot describe, so
//! clap hands the raw tokens over and they are split here.

use blank_core::domain::{PatchSpec, StrategyFlag};

use crate::error::{CliError, CliResult, IS_REQUIRED, IS_UNKNOWN, OptionKind};

const COMMAND: &str = "update";

/// Whether `token` is an operation flag rather than a path or json argument.
///
/// A flag starts with `-` followed by a letter or a second `-`, so negative
/// numbers and a lone `-` are arguments.
fn is_flag(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next() == Some('-')
        && chars
            .next()
            .is_some_and(|c| c == '-' || c.is_ascii_alphabetic())
}

/// Expand one flag token (`-au`, `--merge`) into strategy flags.
fn parse_flag(token: &str) -> CliResult<Vec<StrategyFlag>> {
    if let Some(long) = token.strip_prefix("--") {
        return long
            .parse::<StrategyFlag>()
            .map(|flag| vec![flag])
            .map_err(|_| CliError::usage(COMMAND, OptionKind::Flag, IS_UNKNOWN, &[token]));
    }

    token[1..]
        .chars()
        .map(|c| {
            StrategyFlag::from_short(c).ok_or_else(|| {
                CliError::usage(COMMAND, OptionKind::Flag, IS_UNKNOWN, &[format!("-{c}").as_str()])
            })
        })
        .collect()
}

/// Split `update` operation tokens into patch specs, keeping their order.
///
/// Each operation is a flag token followed by `PATH JSON`, or by `JSON`
/// alone for the root path.
pub fn parse_operations<S: AsRef<str>>(tokens: &[S]) -> CliResult<Vec<PatchSpec>> {
    let mut specs = Vec::new();
    let mut rest = tokens.iter().map(|t| t.as_ref()).peekable();

    while let Some(token) = rest.next() {
        if !is_flag(token) {
            return Err(CliError::usage(
                COMMAND,
                OptionKind::Flag,
                IS_REQUIRED,
                &["operation"],
            ));
        }
        let flags = parse_flag(token)?;

        let Some(first) = rest.next_if(|t| !is_flag(t)) else {
            return Err(CliError::usage(
                COMMAND,
                OptionKind::Argument,
                IS_REQUIRED,
                &["path", "json"],
            ));
        };

        let spec = match rest.next_if(|t| !is_flag(t)) {
            Some(json) => PatchSpec::new(flags, first, json),
            None => PatchSpec::new(flags, "/", first),
        };
        specs.push(spec);
    }

    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blank_core::domain::FragmentRef;
    use std::path::PathBuf;

    fn parse(tokens: &[&str]) -> CliResult<Vec<PatchSpec>> {
        parse_operations(tokens)
    }

    #[test]
    fn empty_list_is_no_operations() {
        assert!(parse(&[]).unwrap().is_empty());
    }

    #[test]
    fn path_and_json() {
        let specs = parse(&["-s", "/dependencies/eslint", "\"^7\""]).unwrap();
        assert_eq!(
            specs,
            [PatchSpec::new(
                [StrategyFlag::Set],
                "/dependencies/eslint",
                "\"^7\""
            )]
        );
    }

    #[test]
    fn json_alone_targets_the_root() {
        let specs = parse(&["-m", "{\"a\": 1}", "-a", "/b", "[2]"]).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].path, "/");
        assert_eq!(specs[0].fragment, FragmentRef::Inline("{\"a\": 1}".into()));
        assert_eq!(specs[1].path, "/b");
        assert_eq!(specs[1].flags, [StrategyFlag::Append]);
    }

    #[test]
    fn combined_and_long_flags() {
        let specs = parse(&["-au", "/x", "[1]", "--set", "/y", "2", "--unique", "[3]"]).unwrap();
        assert_eq!(specs[0].flags, [StrategyFlag::Append, StrategyFlag::Dedup]);
        assert_eq!(specs[1].flags, [StrategyFlag::Set]);
        assert_eq!(specs[2].flags, [StrategyFlag::Dedup]);
    }

    #[test]
    fn at_sign_reads_a_file() {
        let specs = parse(&["-m", "@base.yaml"]).unwrap();
        assert_eq!(specs[0].fragment, FragmentRef::File(PathBuf::from("base.yaml")));
    }

    #[test]
    fn negative_numbers_are_arguments() {
        let specs = parse(&["-m", "/offset", "-1"]).unwrap();
        assert_eq!(specs[0].path, "/offset");
        assert_eq!(specs[0].fragment, FragmentRef::Inline("-1".into()));
    }

    #[test]
    fn missing_flag() {
        let err = parse(&["/a", "1"]).unwrap_err();
        assert_eq!(err.to_string(), "The operation flag is required");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn unknown_short_flag() {
        let err = parse(&["-sx", "/a", "1"]).unwrap_err();
        assert_eq!(err.to_string(), "The -x flag is unknown");
    }

    #[test]
    fn unknown_long_flag() {
        let err = parse(&["--replace", "/a", "1"]).unwrap_err();
        assert_eq!(err.to_string(), "The --replace flag is unknown");
    }

    #[test]
    fn long_flags_are_exact_names() {
        let err = parse(&["--m", "/a", "1"]).unwrap_err();
        assert_eq!(err.to_string(), "The --m flag is unknown");

        let err = parse(&["--Merge", "/a", "1"]).unwrap_err();
        assert_eq!(err.to_string(), "The --Merge flag is unknown");

        let specs = parse(&["--dedup", "/a", "[1]", "--append", "[2]"]).unwrap();
        assert_eq!(specs[0].flags, [StrategyFlag::Dedup]);
        assert_eq!(specs[1].flags, [StrategyFlag::Append]);
    }

    #[test]
    fn missing_arguments() {
        let err = parse(&["-s"]).unwrap_err();
        assert_eq!(err.to_string(), "The path, json argument is required");

        let err = parse(&["-s", "-m", "{}"]).unwrap_err();
        assert_eq!(err.to_string(), "The path, json argument is required");
    }
}
