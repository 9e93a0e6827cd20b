use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use log::{debug, info};
use show_runtime::{
    DEFAULT_BASE_URL, ProgressEvent, ShowRuntimeError, TvMazeProvider, format_show_length,
    read_show_list, show_runtime, strip_quotes, survey_shows,
};
use std::path::{Path, PathBuf};
use std::process;

/// Adds up the runtime of every episode of a TV show.
#[derive(Debug, Parser)]
#[command(name = "show_runtime", version, about)]
struct Cli {
    /// Name of the show to look up (quote characters are ignored)
    #[arg(
        value_name = "SHOW_NAME",
        required_unless_present = "list",
        conflicts_with = "list"
    )]
    show_name: Option<String>,

    /// File with one show name per line; prints the shortest and the longest show
    #[arg(short, long, value_name = "FILE")]
    list: Option<PathBuf>,

    /// Base URL of the TVMaze API
    #[arg(long, env = "TVMAZE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Increase log output (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Forwards progress events to the logger
fn handle_progress_event(event: ProgressEvent) {
    match event {
        ProgressEvent::Resolving { show_name } => {
            info!("Searching for '{}'...", show_name);
        }
        ProgressEvent::Resolved { show_name, show_id } => {
            debug!("'{}' is show {}", show_name, show_id);
        }
        ProgressEvent::FetchingEpisodes { show_id } => {
            info!("Fetching episodes of show {}...", show_id);
        }
        ProgressEvent::Totalled { show_id, minutes } => {
            debug!("Show {} runs for {} minute(s)", show_id, minutes);
        }
        ProgressEvent::SurveyingShow {
            index,
            total,
            show_name,
        } => {
            info!("[{}/{}] {}", index + 1, total, show_name);
        }
    }
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Looks up a single show and prints its total runtime in minutes
fn run_single(provider: &TvMazeProvider, show_name: &str) -> Result<(), ShowRuntimeError> {
    let show_name = strip_quotes(show_name);
    let minutes = show_runtime(provider, &show_name, handle_progress_event)?;
    println!("{}", minutes);
    Ok(())
}

/// Surveys a show list and prints the shortest and the longest show
fn run_survey(provider: &TvMazeProvider, list: &Path) -> Result<(), ShowRuntimeError> {
    let shows: Vec<String> = read_show_list(list)?
        .into_iter()
        .map(|show| strip_quotes(&show))
        .collect();

    let report = survey_shows(provider, &shows, handle_progress_event);

    for failure in &report.failures {
        debug!("Lookup of '{}' failed: {}", failure.show_name, failure.error);
        eprintln!("Could not get info for '{}'.", failure.show_name);
    }

    let (shortest, longest) = report.extremes()?;
    println!("The shortest show: {}", format_show_length(shortest));
    println!("The longest show: {}", format_show_length(longest));
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr, stdout only carries results
    let _logger = match flexi_logger::Logger::try_with_env_or_str(log_level(cli.verbose))
        .and_then(|logger| logger.log_to_stderr().start())
    {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: could not initialize logging: {}", e);
            None
        }
    };

    let provider = TvMazeProvider::with_base_url(&cli.base_url);
    if provider.base_url() != DEFAULT_BASE_URL {
        info!("Using TVMaze API at {}", provider.base_url());
    }

    let result = match (&cli.list, &cli.show_name) {
        (Some(list), _) => run_survey(&provider, list),
        (None, Some(show_name)) => run_single(&provider, show_name),
        (None, None) => Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "a show name or --list <FILE> is required",
            )
            .exit(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}
