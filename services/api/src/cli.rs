use crate::demo::{run_compare, run_demo, run_quiz, run_rank, CompareArgs, DemoArgs, QuizArgs, RankArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use gv_funds::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Golden Visa Fund Matcher",
    about = "Match investors to Portugal Golden Visa funds and rank the catalog",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run the investor quiz against a fund catalog
    Quiz(QuizArgs),
    /// Rank the catalog and print the priority clusters
    Rank(RankArgs),
    /// Compare two to four funds side by side
    Compare(CompareArgs),
    /// Walk through quiz, ranking, and comparison on the bundled sample catalog
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quiz(args) => run_quiz(args),
        Command::Rank(args) => run_rank(args),
        Command::Compare(args) => run_compare(args),
        Command::Demo(args) => run_demo(args),
    }
}
