use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pa-waste-processor")]
#[command(about = "Normalize PA well waste reports and chart disposal methods")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Only log warnings and hide progress"
    )]
    pub quiet: bool,
}

/// Options shared by every command that loads a report
#[derive(Args, Debug, Clone, Default)]
pub struct InputOptions {
    #[arg(
        short,
        long,
        help = "Waste report CSV export [default: \"Well Waste 2018.csv\"]"
    )]
    pub input_file: Option<PathBuf>,

    #[arg(short, long, help = "Settings file [default: pa-waste.toml if present]")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Text encoding label of the input file [default: iso-8859-1]")]
    pub encoding: Option<String>,

    #[arg(long, help = "Memory-map the input file instead of buffered reads")]
    pub mmap: bool,

    #[arg(long)]
    pub max_workers: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize the report and render disposal-method charts
    Process {
        #[command(flatten)]
        input: InputOptions,

        #[arg(short, long, help = "Chart output directory [default: output]")]
        output_dir: Option<PathBuf>,

        #[arg(long, help = "Write the normalized table to this CSV file")]
        normalized_output: Option<PathBuf>,

        #[arg(long, help = "Write frequencies and the integrity report as JSON")]
        summary_json: Option<PathBuf>,

        #[arg(long, default_value = "false")]
        no_charts: bool,
    },

    /// Load and normalize the report, then print the integrity report only
    Validate {
        #[command(flatten)]
        input: InputOptions,
    },
}
