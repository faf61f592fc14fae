use anyhow::{Context, Result};
use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{
    filter::Directive, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use movie_catalog::{AppConfig, CliConfig, FileConfig, Movie, MovieCatalog, MovieUpdate};

use rustyline::{
    completion::Completer,
    highlight::Highlighter,
    history::FileHistory,
    validate::Validator,
    CompletionType, Config, Editor, Helper,
};

fn get_styles() -> Styles {
    Styles::styled()
        .usage(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .header(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
        .error(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(styles=get_styles())]
struct CliArgs {
    /// Path to the movies JSON document. Defaults to the nearest movies.json.
    #[clap(value_parser = parse_path)]
    pub path: Option<PathBuf>,

    /// Path to a TOML config file, its values override the CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Default log filter, LOG_LEVEL takes precedence.
    #[clap(long)]
    pub log_level: Option<String>,
}

#[derive(Parser)]
#[command(styles=get_styles(), name = "")]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Subcommand)]
enum InnerCommand {
    /// Shows all movies.
    List,

    /// Adds a movie at the end of the catalog.
    Add {
        title: String,
        director: String,
        year: i64,
        genres: Vec<String>,
    },

    /// Removes the first movie with the given title.
    Remove { title: String },

    /// Overwrites the given fields of a movie, empty values are ignored.
    Update {
        title: String,
        #[arg(long)]
        director: Option<String>,
        #[arg(long)]
        year: Option<i64>,
        #[arg(long, num_args = 1..)]
        genres: Option<Vec<String>>,
    },

    /// Shows a movie by title, ignoring case.
    Show { title: String },

    /// Shows all titles.
    Titles,

    /// Shows the number of movies.
    Count,

    /// Shows movies whose title contains the given text (case-sensitive).
    Search { substring: String },

    /// Shows movies released in the given year.
    ByYear { year: i64 },

    /// Shows movies having the given genre.
    ByGenre { genre: String },

    /// Counts the movies of a director.
    CountDirector { director: String },

    /// Shows the title of the oldest movie.
    Oldest,

    /// Shows the average release year.
    AverageYear,

    /// Shows the longest title.
    Longest,

    /// Shows the most common release year.
    MostCommonYear,

    /// Shows titles released between two years, both included.
    Between { start: i64, end: i64 },

    /// Reloads the catalog from disk, discarding unsaved changes.
    Reload,

    /// Shows the path of the current catalog document.
    Where,

    /// Close this program.
    Exit,
}

enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

const PROMPT: &str = "movies> ";

fn print_movie(movie: &Movie) {
    println!(
        "{} ({}) - {} [{}]",
        movie.title,
        movie.year,
        movie.director,
        movie.genres.join(", ")
    );
}

fn print_movies<'a>(movies: impl IntoIterator<Item = &'a Movie>) {
    let mut printed = 0;
    for movie in movies {
        print_movie(movie);
        printed += 1;
    }
    if printed == 0 {
        println!("(no movies)");
    }
}

fn run_command(
    command: InnerCommand,
    catalog: &mut MovieCatalog,
) -> movie_catalog::catalog::Result<CommandExecutionResult> {
    match command {
        InnerCommand::List => print_movies(catalog.list()),
        InnerCommand::Add {
            title,
            director,
            year,
            genres,
        } => {
            let movie = catalog.add(title, director, year, genres)?;
            print!("Added: ");
            print_movie(&movie);
        }
        InnerCommand::Remove { title } => {
            catalog.remove(&title)?;
        }
        InnerCommand::Update {
            title,
            director,
            year,
            genres,
        } => {
            let movie = catalog.update(
                &title,
                MovieUpdate {
                    director,
                    year,
                    genres,
                },
            )?;
            print_movie(&movie);
        }
        InnerCommand::Show { title } => print_movie(catalog.get_by_title(&title)?),
        InnerCommand::Titles => {
            for title in catalog.titles() {
                println!("{}", title);
            }
        }
        InnerCommand::Count => println!("{}", catalog.count()),
        InnerCommand::Search { substring } => {
            print_movies(catalog.find_by_title_substring(&substring))
        }
        InnerCommand::ByYear { year } => print_movies(catalog.find_by_year(year)),
        InnerCommand::ByGenre { genre } => print_movies(catalog.find_by_genre(&genre)),
        InnerCommand::CountDirector { director } => {
            println!("{}", catalog.count_by_director(&director))
        }
        InnerCommand::Oldest => println!("{}", catalog.oldest_title()?),
        InnerCommand::AverageYear => println!("{:.2}", catalog.average_year()?),
        InnerCommand::Longest => println!("{}", catalog.longest_title()?),
        InnerCommand::MostCommonYear => println!("{}", catalog.most_common_year()?),
        InnerCommand::Between { start, end } => {
            for title in catalog.titles_between_years(start, end) {
                println!("{}", title);
            }
        }
        InnerCommand::Reload => {
            catalog.reload()?;
            println!("Reloaded {} movies.", catalog.count());
        }
        InnerCommand::Where => println!("{}", catalog.path().display()),
        InnerCommand::Exit => return Ok(CommandExecutionResult::Exit),
    }
    Ok(CommandExecutionResult::Ok)
}

fn execute_command(line: String, catalog: &mut MovieCatalog) -> CommandExecutionResult {
    if line.is_empty() {
        return CommandExecutionResult::Ok;
    }

    let args =
        shlex::split(&line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());

    let cli = InnerCli::try_parse_from(std::iter::once(" ").chain(args.iter().map(String::as_str)));

    match cli {
        Ok(cli) => match run_command(cli.command, catalog) {
            Ok(result) => return result,
            Err(err) => return CommandExecutionResult::Error(format!("{}", err)),
        },
        Err(e) => {
            if e.print().is_err() {
                println!("{}", e);
            }
        }
    }
    CommandExecutionResult::Ok
}

/// Lines worth keeping in the shell history.
fn history_entry(line: &str) -> Option<&str> {
    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}

#[derive(rustyline_derive::Hinter)]
struct ShellHelper {
    commands_names: Vec<String>,
}

impl ShellHelper {
    pub fn new() -> Self {
        let commands_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();

        ShellHelper { commands_names }
    }
}

impl Completer for ShellHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if line.contains(' ') {
            return Ok((0, Vec::with_capacity(0)));
        }
        let matches = self
            .commands_names
            .iter()
            .filter(|c| c.starts_with(line))
            .cloned()
            .collect::<Vec<_>>();

        Ok((0, matches))
    }
}

impl Highlighter for ShellHelper {}
impl Validator for ShellHelper {}
impl Helper for ShellHelper {}

fn init_logging(default_level: &str) -> Result<()> {
    let directive: Directive = default_level
        .parse()
        .with_context(|| format!("Invalid log level: {}", default_level))?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().without_time().with_target(false))
        .with(
            EnvFilter::builder()
                .with_default_directive(directive)
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        catalog_path: cli_args.path,
        log_level: cli_args.log_level,
    };
    let app_config = AppConfig::resolve(&cli_config, file_config)?;

    init_logging(&app_config.log_level)?;

    let mut catalog = MovieCatalog::open(&app_config.catalog_path)?;

    InnerCli::command().print_long_help()?;

    let config = Config::builder()
        .completion_type(CompletionType::List)
        .max_history_size(app_config.history_size)?
        .build();

    let mut rl = Editor::<ShellHelper, FileHistory>::with_config(config)?;
    rl.set_helper(Some(ShellHelper::new()));

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let line = line.trim().to_string();
                if let Some(entry) = history_entry(&line) {
                    let _ = rl.add_history_entry(entry);
                }
                match execute_command(line, &mut catalog) {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => break,
                    CommandExecutionResult::Error(err) => {
                        eprintln!("Error: {}", err);
                        continue;
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                println!("Error: {:?}", e);
                break;
            }
        }
    }
    Ok(())
}
