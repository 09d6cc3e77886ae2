use crate::console::{
    run_all, run_body, run_disorders, run_mood, run_soul, run_texture, AllArgs, BodyArgs,
    DisordersArgs, MoodArgs, SoulArgs, TextureArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use happy_menu::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Happy Menu",
    about = "Score, classify and rank fast-food menu items from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the dashboard HTTP service (default command)
    Serve(ServeArgs),
    /// Vegetarian items with the highest vibrational score and the lowest overall
    Soul(SoulArgs),
    /// Items matching a texture, with the feeling it evokes
    Texture(TextureArgs),
    /// Mood-matched picks for a 1-10 rating and dietary category
    Mood(MoodArgs),
    /// Meals that fit how you want to feel, grouped into nutrient clusters
    Body(BodyArgs),
    /// Recommendations that respect a health condition or allergy
    Disorders(DisordersArgs),
    /// Run the soul screen followed by the texture screen
    All(AllArgs),
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
        Command::Soul(args) => run_soul(args),
        Command::Texture(args) => run_texture(args),
        Command::Mood(args) => run_mood(args),
        Command::Body(args) => run_body(args),
        Command::Disorders(args) => run_disorders(args),
        Command::All(args) => run_all(args),
    }
}
