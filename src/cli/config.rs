//! Command line options

use clap::{App, Arg, ArgMatches};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::lib::dispatch::FailurePolicy;

pub const DEFAULT_OUTPUT: &str = "church";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// where charts are written
    pub out_dir: PathBuf,
    pub policy: FailurePolicy,
    /// wait for Enter after each batch
    pub pause: bool,
    /// run this selection once instead of showing the menu
    pub select: Option<String>,
}

fn app() -> App<'static, 'static> {
    App::new("tally")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Menu-driven attendance and giving report generator")
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("DIR")
                .takes_value(true)
                .default_value(DEFAULT_OUTPUT)
                .help("Directory the charts are written to"),
        )
        .arg(
            Arg::with_name("abort")
                .long("abort-on-failure")
                .help("Skip the rest of a batch after a report fails"),
        )
        .arg(
            Arg::with_name("select")
                .short("s")
                .long("select")
                .value_name("SELECTION")
                .takes_value(true)
                .help("Generate these reports and exit (e.g. 1,3,5 or 1-12 or 99)"),
        )
        .arg(
            Arg::with_name("no-pause")
                .long("no-pause")
                .help("Do not wait for Enter between batches"),
        )
}

impl Config {
    /// Exits with clap's message on bad arguments, `--help` and `--version`
    pub fn from_env() -> Self {
        Self::from_args(std::env::args_os()).unwrap_or_else(|err| err.exit())
    }

    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(Self::from_matches(&app().get_matches_from_safe(args)?))
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            out_dir: PathBuf::from(matches.value_of("output").unwrap_or(DEFAULT_OUTPUT)),
            policy: if matches.is_present("abort") {
                FailurePolicy::Abort
            } else {
                FailurePolicy::Continue
            },
            pause: !matches.is_present("no-pause"),
            select: matches.value_of("select").map(String::from),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::from_args(vec!["tally"]).unwrap();
        assert_eq!(cfg.out_dir, PathBuf::from("church"));
        assert_eq!(cfg.policy, FailurePolicy::Continue);
        assert!(cfg.pause);
        assert_eq!(cfg.select, None);
    }

    #[test]
    fn all_options() {
        let cfg = Config::from_args(vec![
            "tally",
            "-o",
            "out",
            "--abort-on-failure",
            "--select",
            "1-3",
            "--no-pause",
        ])
        .unwrap();
        assert_eq!(cfg.out_dir, PathBuf::from("out"));
        assert_eq!(cfg.policy, FailurePolicy::Abort);
        assert!(!cfg.pause);
        assert_eq!(cfg.select.as_deref(), Some("1-3"));
    }

    #[test]
    fn unknown_flag() {
        assert!(Config::from_args(vec!["tally", "--frobnicate"]).is_err());
    }
}
