use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use shelve_frontend::{error::AppError, settings::Settings};
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Application error: {0}")]
    App(#[from] AppError),
    #[error("Cache directory could not be resolved")]
    CacheDirUnresolved,
    #[error("'{0}' is not an existing directory")]
    InvalidFolder(String),
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli().get_matches();

    let mut settings = Settings::default();
    if let Err(error) = map_args_to_settings(&args, &mut settings) {
        eprintln!("shelve: {}", error);
        return ExitCode::FAILURE;
    }

    let logpath = match get_logging_path() {
        Ok(it) => it,
        Err(error) => {
            eprintln!("shelve: {}", error);
            return ExitCode::FAILURE;
        }
    };

    let logfile = tracing_appender::rolling::daily(logpath, "log");
    tracing_subscriber::fmt()
        .compact()
        .with_writer(logfile)
        .init();

    debug!("starting application with settings: {:?}", settings);

    match shelve_frontend::run(settings).await.map_err(Error::from) {
        Ok(()) => {
            debug!("closing application");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("closing application with error: {:?}", err);
            eprintln!("shelve: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn cli() -> Command {
    Command::new("shelve")
        .about("shelve - sort a folder of documents one file at a time")
        .args([
            // NOTE: arguments
            Arg::new("folder")
                .action(ArgAction::Set)
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("folder holding the files to sort, '~/' is expanded"),
            // NOTE: options
            Arg::new("dests")
                .long("dests")
                .action(ArgAction::Set)
                .value_name("LIST")
                .default_value("_sorted,_keep,_review")
                .help("comma separated destination folders offered in the move prompt"),
            Arg::new("extension")
                .long("extension")
                .action(ArgAction::Set)
                .value_name("EXT")
                .default_value("pdf")
                .help("extension of the files to sort"),
            Arg::new("recents")
                .long("recents")
                .action(ArgAction::Set)
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("file storing recently used destination folders"),
        ])
}

fn map_args_to_settings(args: &ArgMatches, settings: &mut Settings) -> Result<(), Error> {
    if let Some(folder) = args.get_one::<PathBuf>("folder") {
        settings.root = resolve_folder(folder)?;
    }

    if let Some(dests) = args.get_one::<String>("dests") {
        settings.presets = split_destinations(dests);
    }

    if let Some(extension) = args.get_one::<String>("extension") {
        settings.extension = extension.trim().to_string();
    }

    settings.recents_path = args.get_one::<PathBuf>("recents").cloned();

    Ok(())
}

fn resolve_folder(folder: &Path) -> Result<PathBuf, Error> {
    let expanded = expand_home(folder);
    match expanded.canonicalize() {
        Ok(path) if path.is_dir() => Ok(path),
        _ => Err(Error::InvalidFolder(folder.display().to_string())),
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

fn split_destinations(dests: &str) -> Vec<String> {
    dests
        .split(',')
        .map(str::trim)
        .filter(|dest| !dest.is_empty())
        .map(str::to_string)
        .collect()
}

fn get_logging_path() -> Result<PathBuf, Error> {
    match dirs::cache_dir() {
        Some(cache_dir) => Ok(cache_dir.join("shelve").join("logs")),
        None => Err(Error::CacheDirUnresolved),
    }
}
