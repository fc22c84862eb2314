use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use commands::{config, details, find, library, person, search, season, videos};
use media_lookup_core::FilmographyList;
use media_lookup_models::MediaKind;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reelmatch")]
#[command(about = "reelmatch - TMDb lookups matched against your Kodi library")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListArg {
    Movies,
    Tv,
    MovieCrew,
    TvCrew,
    KnownFor,
    Combined,
}

impl From<ListArg> for FilmographyList {
    fn from(arg: ListArg) -> Self {
        match arg {
            ListArg::Movies => FilmographyList::Movies,
            ListArg::Tv => FilmographyList::TvShows,
            ListArg::MovieCrew => FilmographyList::MovieCrew,
            ListArg::TvCrew => FilmographyList::TvCrew,
            ListArg::KnownFor => FilmographyList::KnownFor,
            ListArg::Combined => FilmographyList::Combined,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Movie,
    Tv,
}

impl From<KindArg> for MediaKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Movie => MediaKind::Movie,
            KindArg::Tv => MediaKind::Show,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchKind {
    Movie,
    Tv,
    Person,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a person with one of their filmography lists
    #[command(long_about = "Fetch a person from TMDb and list their credits. Every credit is matched against the local library; matched entries show their play count.")]
    Person {
        /// TMDb person id
        id: u64,

        /// Which list to show
        #[arg(long, value_enum, default_value = "movies")]
        list: ListArg,
    },
    /// Show movie details and local state
    Movie {
        /// TMDb movie id
        id: u64,
    },
    /// Show TV show details and local state
    Tv {
        /// TMDb TV id
        id: u64,

        /// Show one season with its episodes instead
        #[arg(long)]
        season: Option<u32>,
    },
    /// List YouTube trailers and clips of a movie or show
    Videos {
        #[arg(value_enum)]
        kind: KindArg,

        /// TMDb id
        id: u64,
    },
    /// Search TMDb
    #[command(long_about = "Search TMDb for movies, shows or people. With --select an interactive picker opens and the chosen entry is shown in detail.")]
    Search {
        #[arg(value_enum)]
        kind: SearchKind,

        query: String,

        /// Release year (first air year for shows)
        #[arg(long)]
        year: Option<i32>,

        /// Pick one result interactively
        #[arg(long, action = ArgAction::SetTrue)]
        select: bool,
    },
    /// Look up a TMDb entry by IMDb (tt...) or TVDb id
    Find {
        external_id: String,

        #[arg(long, value_enum, default_value = "movie")]
        kind: KindArg,
    },
    /// Show what the local library contains
    Library,
    /// Configure credentials and settings
    #[command(long_about = "Manage configuration and credentials. Running without a subcommand shows the current configuration.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks sensitive data)
    Show {
        /// Show full configuration including masked secrets
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Configure the TMDb API key and request language
    Tmdb {
        /// TMDb API key (if not provided, will prompt)
        #[arg(long)]
        api_key: Option<String>,

        /// Request language, e.g. en-US
        #[arg(long)]
        language: Option<String>,

        /// Two-letter country code used for certifications
        #[arg(long)]
        country_code: Option<String>,

        /// Include adult titles in searches
        #[arg(long)]
        include_adult: Option<bool>,
    },

    /// Configure OMDb ratings
    Omdb {
        /// OMDb API key (if not provided, will prompt)
        #[arg(long)]
        api_key: Option<String>,

        /// Enable or disable OMDb lookups
        #[arg(long)]
        enabled: Option<bool>,
    },

    /// Configure the Kodi JSON-RPC library endpoint
    Library {
        /// JSON-RPC URL, e.g. http://localhost:8080/jsonrpc
        #[arg(long)]
        url: Option<String>,

        /// HTTP username
        #[arg(long)]
        username: Option<String>,

        /// Prompt for the HTTP password
        #[arg(long, action = ArgAction::SetTrue)]
        password: bool,
    },

    /// Configure filmography filters
    Filters {
        /// Hide credits released too far in the future
        #[arg(long)]
        upcoming: Option<bool>,

        /// Days ahead of today a release may be and still be listed
        #[arg(long)]
        day_delta: Option<i64>,

        /// Hide documentary self-appearances and filler crew jobs
        #[arg(long)]
        documentaries: Option<bool>,

        /// TMDb TV genre ids to hide (comma separated, empty to disable)
        #[arg(long, value_delimiter = ',', num_args = 0..)]
        shows_blacklist: Option<Vec<u32>>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_settings = commands::context::configured_logging();
    logging::init_logging_with_file(cli.verbose, cli.quiet, log_settings)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Person { id, list } => person::run_person(id, list.into(), &output).await,
        Commands::Movie { id } => details::run_details(MediaKind::Movie, id, &output).await,
        Commands::Tv { id, season: Some(number) } => season::run_season(id, number, &output).await,
        Commands::Tv { id, season: None } => details::run_details(MediaKind::Show, id, &output).await,
        Commands::Videos { kind, id } => videos::run_videos(kind.into(), id, &output).await,
        Commands::Search { kind, query, year, select } => search::run_search(kind, &query, year, select, &output).await,
        Commands::Find { external_id, kind } => find::run_find(&external_id, kind.into(), &output).await,
        Commands::Library => library::run_library(&output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output).await
        }
    }
}
