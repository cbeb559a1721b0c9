use anyhow::Result;
use clap::Parser;

use super::{Cli, Commands, FavAction};
use crate::commands::*;
use crate::config::Config;

pub(crate) async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?;
    let colors_path = cli.colors.unwrap_or_else(|| config.colors_path());
    let swatches_path = cli.swatches.unwrap_or_else(|| config.swatches_path());

    match cli.command {
        Commands::Colors { collection } => {
            cmd_colors(&colors_path, &swatches_path, collection)?;
        }
        Commands::Swatches => {
            cmd_swatches(&colors_path, &swatches_path)?;
        }
        Commands::Combinations { id } => {
            cmd_combinations(&colors_path, &swatches_path, id)?;
        }
        Commands::Scan {
            path,
            max_colors,
            save,
        } => {
            let max_colors = max_colors.unwrap_or(config.scan.max_colors);
            cmd_scan(&path, max_colors, save).await?;
        }
        Commands::Pick {
            path,
            x,
            y,
            viewport,
            save,
        } => {
            cmd_pick(&path, x, y, viewport.as_deref(), save)?;
        }
        Commands::Fav { action } => match action {
            FavAction::List { source, kind } => {
                cmd_fav_list(source.as_deref(), kind.as_deref())?;
            }
            FavAction::Color { id } => {
                cmd_fav_color(&colors_path, &swatches_path, id)?;
            }
            FavAction::Combination { id } => {
                cmd_fav_combination(&colors_path, &swatches_path, id)?;
            }
            FavAction::Scanned { hex } => {
                cmd_fav_scanned(&hex)?;
            }
            FavAction::Remove { key } => {
                cmd_fav_remove(&key)?;
            }
        },
    }

    Ok(())
}
