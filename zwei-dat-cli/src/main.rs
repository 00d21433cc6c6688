use clap::{Args, Parser, Subcommand};

mod list;
mod pack;
mod unpack;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Pack a directory into a DAT archive
    Pack(PackCommand),
    /// Unpack DAT archives into directories
    Unpack(UnpackCommand),
    /// Print the table of contents of a DAT archive
    List(ListCommand),
}

#[derive(Debug, Args)]
pub struct PackCommand {
    /// Input directory to pack
    pub input: String,
    /// Output archive path (default: `<input>.dat` next to the input)
    #[arg(short, long)]
    pub output: Option<String>,
    /// Overwrite the output file if it exists
    #[arg(long)]
    pub r#override: bool,
    /// Suppress per-file output
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Args)]
pub struct UnpackCommand {
    /// Input DAT file path(s)
    #[arg(required = true)]
    pub input: Vec<String>,
    /// Output directory path (default: named after each archive)
    #[arg(short, long)]
    pub output: Option<String>,
    /// Suppress per-file output
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Args)]
pub struct ListCommand {
    /// Input DAT file path
    pub input: String,
    /// Emit the listing as JSON
    #[arg(long)]
    pub json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Pack(cmd) => pack::pack(cmd),
        Command::Unpack(cmd) => unpack::unpack(cmd),
        Command::List(cmd) => list::list(cmd),
    }
}
