use std::ffi::OsString;
use std::path::PathBuf;

use clap::{
    Arg, ArgAction, ArgMatches, Command, crate_description, crate_name, crate_version,
    value_parser,
};

#[derive(Debug, Clone)]
pub struct CopyOptions {
    pub source: PathBuf,
    pub destination: PathBuf,

    /// Worker threads running the copy tasks; 0 means one per logical CPU
    pub threads: usize,
    /// Mirror report lines into this file
    pub log_file: Option<PathBuf>,
    pub verbose: bool,
    /// Only report failures and the final line
    pub quiet: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        CopyOptions {
            source: PathBuf::new(),
            destination: PathBuf::new(),
            threads: 0,
            log_file: None,
            verbose: false,
            quiet: false,
        }
    }
}

impl CopyOptions {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        CopyOptions {
            source: source.into(),
            destination: destination.into(),
            ..Default::default()
        }
    }

    /// Parse the process command line.
    ///
    /// Returns `Ok(None)` when the source or destination is missing, in
    /// which case the caller should print the usage line and stop.
    pub fn parse() -> Result<Option<Self>, clap::Error> {
        Self::parse_from(std::env::args_os())
    }

    pub fn parse_from<I, T>(args: I) -> Result<Option<Self>, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = command().try_get_matches_from(args)?;
        Ok(Self::from_matches(&matches))
    }

    fn from_matches(matches: &ArgMatches) -> Option<Self> {
        let source = matches.get_one::<PathBuf>("source")?;
        let destination = matches.get_one::<PathBuf>("destination")?;

        if let Some(extra) = matches.get_many::<OsString>("extra") {
            log::debug!("Ignoring {} extra argument(s)", extra.count());
        }

        Some(CopyOptions {
            source: source.clone(),
            destination: destination.clone(),
            threads: matches.get_one::<usize>("threads").copied().unwrap_or(0),
            log_file: matches.get_one::<PathBuf>("log").cloned(),
            verbose: matches.get_flag("verbose"),
            quiet: matches.get_flag("quiet"),
        })
    }
}

pub fn command() -> Command {
    Command::new(crate_name!())
        .about(crate_description!())
        .version(crate_version!())
        .arg(
            Arg::new("source")
                .help("Directory whose contents are copied")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("destination")
                .help("Directory the contents are copied into")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("extra")
                .num_args(1..)
                .value_parser(value_parser!(OsString))
                .hide(true),
        )
        .arg(
            Arg::new("threads")
                .short('t')
                .long("threads")
                .value_name("N")
                .help("Number of worker threads (0 = one per CPU)")
                .value_parser(value_parser!(usize))
                .default_value("0"),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .value_name("FILE")
                .help("Also write the report to FILE")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose diagnostics on stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only report errors and completion")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose"),
        )
}

pub fn print_usage(program_name: &str) {
    println!("Usage: {} <source_dir> <dest_dir>", program_name);
    println!("Try '{} --help' for more information.", program_name);
}
