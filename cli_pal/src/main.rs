mod filemanager;
mod source;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lib_pal::constants::DEFAULT_OUTPUT_DIR;
use log::LevelFilter;

use filemanager::ImageHandlingError;

#[derive(Parser)]
#[command(name = "pal-json")]
#[command(about = "Convert pixel images into indexed-palette JSON documents")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an image into a JSON document
    Convert(ConvertArgs),
    /// Render a JSON document back into a PNG image
    Restore {
        /// Document produced by `convert`
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Image file to convert (png, jpg, bmp, ...)
    pub input: PathBuf,

    /// Document name, defaults to the input file stem
    #[arg(short, long)]
    pub name: Option<String>,

    /// Directory the document is written into
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub out_dir: PathBuf,
}

fn main() -> Result<(), ImageHandlingError> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    lib_pal::init_logging(level);

    match cli.command {
        Commands::Convert(args) => {
            let path = filemanager::convert_image(&args)?;
            println!("File saved: {}", path.display());
        }
        Commands::Restore { input, output } => {
            filemanager::restore_image(&input, &output)?;
            println!("Image saved: {}", output.display());
        }
    }

    Ok(())
}
