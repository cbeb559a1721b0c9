use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "huebook")]
#[command(version)]
#[command(about = "Color palette reference with image scanning and favorites")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Colors document (overrides config)
    #[arg(long, global = true)]
    pub(crate) colors: Option<PathBuf>,

    /// Swatches document (overrides config)
    #[arg(long, global = true)]
    pub(crate) swatches: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List catalog colors
    Colors {
        /// Only colors from this swatch collection
        #[arg(short, long)]
        collection: Option<u32>,
    },
    /// List swatch collections
    Swatches,
    /// List color combinations, or show one by id
    Combinations {
        /// Combination id to show
        id: Option<u32>,
    },
    /// Extract the dominant colors of an image
    Scan {
        /// Path to the image
        path: PathBuf,

        /// Maximum palette size
        #[arg(short = 'k', long)]
        max_colors: Option<usize>,

        /// Save the extracted palette as a favorite combination
        #[arg(long)]
        save: bool,
    },
    /// Sample the color under a point in an image
    Pick {
        /// Path to the image
        path: PathBuf,

        /// Horizontal position in the viewport, 0.0 to 1.0
        #[arg(short = 'x', long, default_value = "0.5")]
        x: f64,

        /// Vertical position in the viewport, 0.0 to 1.0
        #[arg(short = 'y', long, default_value = "0.5")]
        y: f64,

        /// Viewport size as WIDTHxHEIGHT (defaults to the image size)
        #[arg(long)]
        viewport: Option<String>,

        /// Save the sampled color as a favorite
        #[arg(long)]
        save: bool,
    },
    /// Manage favorites
    Fav {
        #[command(subcommand)]
        action: FavAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum FavAction {
    /// List favorites
    List {
        /// Filter by source: catalog or scanner
        #[arg(short, long)]
        source: Option<String>,

        /// Filter by kind: color or combination
        #[arg(short, long)]
        kind: Option<String>,
    },
    /// Toggle a catalog color favorite
    Color {
        /// Catalog color id
        id: u32,
    },
    /// Toggle a catalog combination favorite
    Combination {
        /// Combination id
        id: u32,
    },
    /// Toggle a scanned-color favorite by hex value
    Scanned {
        /// Hex color, e.g. "#FF5733"
        hex: String,
    },
    /// Remove a favorite by its key
    Remove {
        /// Identity key, as printed by `fav list`
        key: String,
    },
}
