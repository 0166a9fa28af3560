//! Command line parsing and [`Config`] construction.

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, builder::BoolishValueParser, value_parser};

/// Description of a single `font-converter` invocation.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Config {
    /// The path to the `!Fnt` font to convert.
    pub input: PathBuf,
    /// The path to which the `+Fnt` font should be written, or `None` for standard output.
    pub output: Option<PathBuf>,
    /// Whether truncated fonts should be rejected.
    pub strict: bool,
}

/// Parses `font-converter`'s arguments to construct a [`Config`].
pub fn get_config() -> Config {
    parse_arguments(&command_parser().get_matches())
}

/// Parses the arguments required to produce a valid [`Config`].
pub fn parse_arguments(matches: &ArgMatches) -> Config {
    let input = matches
        .get_one::<PathBuf>("input")
        .cloned()
        .unwrap_or_else(|| unreachable!("`input` is a required argument"));

    let output = matches.get_one::<PathBuf>("output").cloned();
    let strict = matches.get_flag("strict");

    Config {
        input,
        output,
        strict,
    }
}

/// Returns the command parser for `font-converter`.
pub fn command_parser() -> Command {
    let input = Arg::new("input")
        .value_name("IN_FONT")
        .help("The `!Fnt` font to convert")
        .value_parser(value_parser!(PathBuf))
        .required(true);

    let output = Arg::new("output")
        .short('o')
        .long("output")
        .value_name("OUT_FONT")
        .help("Write the `+Fnt` font to OUT_FONT instead of standard output")
        .value_parser(value_parser!(PathBuf));

    let strict = Arg::new("strict")
        .long("strict")
        .env("FONT_CONVERTER_STRICT")
        .value_parser(BoolishValueParser::new())
        .help("Reject fonts whose glyph tables are truncated instead of zero-filling them")
        .action(ArgAction::SetTrue);

    Command::new("font-converter")
        .about("Converts bitmap fonts from the `!Fnt` format into the sparse `+Fnt` format")
        .arg(input)
        .arg(output)
        .arg(strict)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn input_only() {
        let matches = command_parser()
            .try_get_matches_from(["font-converter", "Katica10.font"])
            .unwrap();

        assert_eq!(
            parse_arguments(&matches),
            Config {
                input: PathBuf::from("Katica10.font"),
                output: None,
                strict: false,
            }
        );
    }

    #[test]
    fn output_and_strict() {
        let matches = command_parser()
            .try_get_matches_from([
                "font-converter",
                "--strict",
                "-o",
                "out.font",
                "in.font",
            ])
            .unwrap();

        let config = parse_arguments(&matches);
        assert_eq!(config.input, PathBuf::from("in.font"));
        assert_eq!(config.output, Some(PathBuf::from("out.font")));
        assert!(config.strict);
    }

    #[test]
    fn wrong_argument_count_is_rejected() {
        assert!(
            command_parser()
                .try_get_matches_from(["font-converter"])
                .is_err()
        );
        assert!(
            command_parser()
                .try_get_matches_from(["font-converter", "a.font", "b.font"])
                .is_err()
        );
    }

    #[test]
    fn command_is_consistent() {
        command_parser().debug_assert();
    }
}
