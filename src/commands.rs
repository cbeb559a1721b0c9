use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::catalog::{Catalog, CatalogMapper};
use crate::color::{self, TextColor};
use crate::config::Config;
use crate::favorites::{FavoriteItem, FavoriteKind, FavoriteSource, Favorites, JsonFileStore};
use crate::scan::sample::{self, Viewport};
use crate::scan::session::ScanSession;
use crate::scan::SampledColor;

fn load_catalog(colors_path: &Path, swatches_path: &Path) -> Catalog {
    Catalog::load(colors_path, swatches_path, &CatalogMapper)
}

fn open_favorites() -> Favorites {
    Favorites::load(Box::new(JsonFileStore::new(JsonFileStore::default_path())))
}

pub fn cmd_colors(
    colors_path: &Path,
    swatches_path: &Path,
    collection: Option<u32>,
) -> Result<()> {
    let catalog = load_catalog(colors_path, swatches_path);

    if catalog.colors.is_empty() {
        eprintln!("No catalog colors found at: {}", colors_path.display());
        eprintln!(
            "Point `catalog.colors_path` in {} at a colors document.",
            Config::config_path().display()
        );
        return Ok(());
    }

    let colors: Vec<_> = match collection {
        Some(id) => catalog.colors_in_collection(id),
        None => catalog.colors.iter().collect(),
    };

    if colors.is_empty() {
        println!("No colors in collection {}.", collection.unwrap_or_default());
        return Ok(());
    }

    let favorites = open_favorites();
    for color in colors {
        let marker = if favorites.is_favorite_color(color.id) {
            "*"
        } else {
            " "
        };
        println!(
            "{:>4} {} {}  {:<24} {}  {}",
            color.id,
            marker,
            color.hex,
            color.name,
            color.rgb_label(),
            color.cmyk_label()
        );
    }

    Ok(())
}

pub fn cmd_swatches(colors_path: &Path, swatches_path: &Path) -> Result<()> {
    let catalog = load_catalog(colors_path, swatches_path);

    if catalog.swatches.is_empty() {
        eprintln!("No swatches found at: {}", swatches_path.display());
        return Ok(());
    }

    for swatch in &catalog.swatches {
        let count = catalog.colors_in_collection(swatch.id).len();
        println!("{:>4}  {:<40} {} colors", swatch.id, swatch.description, count);
    }

    Ok(())
}

pub fn cmd_combinations(
    colors_path: &Path,
    swatches_path: &Path,
    id: Option<u32>,
) -> Result<()> {
    let catalog = load_catalog(colors_path, swatches_path);

    match id {
        Some(id) => {
            let Some(combo) = catalog.combination(id) else {
                bail!("No combination with id {}", id);
            };
            println!("Combination {}:", combo.id);
            for color in &combo.colors {
                println!("  {}  {:<24} {}", color.hex, color.name, color.cmyk_label());
            }
        }
        None => {
            if catalog.combinations.is_empty() {
                println!("No combinations in the catalog.");
                return Ok(());
            }
            let favorites = open_favorites();
            for combo in &catalog.combinations {
                let marker = if favorites.is_favorite_combination(combo.id) {
                    "*"
                } else {
                    " "
                };
                let names: Vec<&str> = combo.colors.iter().map(|c| c.name.as_str()).collect();
                println!("{:>4} {} {}", combo.id, marker, names.join(", "));
            }
        }
    }

    Ok(())
}

pub async fn cmd_scan(path: &Path, max_colors: usize, save: bool) -> Result<()> {
    let image = image::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let bitmap = crate::bitmap::Bitmap::from_image(&image);

    let (mut session, mut rx) = ScanSession::new(max_colors);
    session.submit(bitmap);
    let result = rx
        .recv()
        .await
        .context("Extraction task ended without a result")?;
    session.apply(result);

    if session.palette().is_empty() {
        println!("No meaningful colors found (image may be transparent or near black/white).");
        return Ok(());
    }

    for color in session.palette() {
        println!("{}", describe_sample(color));
    }

    if save {
        let favorites = open_favorites();
        let item = FavoriteItem::ScannedCombination {
            colors: session.palette().to_vec(),
        };
        let key = item.identity_key();
        let thumbnail = encode_thumbnail(&image).ok();
        if favorites.toggle_with_thumbnail(item, thumbnail) {
            println!("Saved palette as favorite: {}", key);
        } else {
            println!("Removed favorite palette: {}", key);
        }
    }

    Ok(())
}

/// Small PNG preview attached to saved palettes.
fn encode_thumbnail(image: &image::DynamicImage) -> Result<Vec<u8>> {
    let thumb = image.thumbnail(64, 64);
    let mut buf = Vec::new();
    thumb.write_to(
        &mut std::io::Cursor::new(&mut buf),
        image::ImageFormat::Png,
    )?;
    Ok(buf)
}

pub fn cmd_pick(
    path: &Path,
    x: f64,
    y: f64,
    viewport: Option<&str>,
    save: bool,
) -> Result<()> {
    let image = image::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let bitmap = crate::bitmap::Bitmap::from_image(&image);

    let viewport = match viewport {
        Some(spec) => parse_viewport(spec)?,
        None => Viewport {
            width: f64::from(bitmap.width()),
            height: f64::from(bitmap.height()),
        },
    };

    let Some(sample) = sample::sample_point(&bitmap, viewport, x, y) else {
        println!("Point ({x}, {y}) falls outside the image (letterbox margin).");
        return Ok(());
    };

    println!("{}", describe_sample(&sample));

    if save {
        let favorites = open_favorites();
        let item = FavoriteItem::ScannedColor {
            color: sample.clone(),
        };
        let key = item.identity_key();
        if favorites.toggle(item) {
            println!("Saved color as favorite: {}", key);
        } else {
            println!("Removed favorite color: {}", key);
        }
    }

    Ok(())
}

pub fn cmd_fav_list(source: Option<&str>, kind: Option<&str>) -> Result<()> {
    let source = source.map(parse_source).transpose()?;
    let kind = kind.map(parse_kind).transpose()?;

    let favorites = open_favorites();
    let entries = favorites.list(source, kind);

    if entries.is_empty() {
        println!("No favorites yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{:<48} {}", entry.key, describe_item(&entry.item));
    }

    Ok(())
}

pub fn cmd_fav_color(colors_path: &Path, swatches_path: &Path, id: u32) -> Result<()> {
    let catalog = load_catalog(colors_path, swatches_path);
    let Some(color) = catalog.color(id) else {
        bail!("No catalog color with id {}", id);
    };

    let favorites = open_favorites();
    if favorites.toggle(FavoriteItem::CatalogColor { color_id: id }) {
        println!("Added favorite: {} {}", color.hex, color.name);
    } else {
        println!("Removed favorite: {} {}", color.hex, color.name);
    }

    Ok(())
}

pub fn cmd_fav_combination(colors_path: &Path, swatches_path: &Path, id: u32) -> Result<()> {
    let catalog = load_catalog(colors_path, swatches_path);
    let Some(combo) = catalog.combination(id) else {
        bail!("No combination with id {}", id);
    };

    let names: Vec<&str> = combo.colors.iter().map(|c| c.name.as_str()).collect();
    let favorites = open_favorites();
    if favorites.toggle(FavoriteItem::CatalogCombination { combination_id: id }) {
        println!("Added favorite combination {}: {}", id, names.join(", "));
    } else {
        println!("Removed favorite combination {}: {}", id, names.join(", "));
    }

    Ok(())
}

pub fn cmd_fav_scanned(hex: &str) -> Result<()> {
    let (r, g, b, _) = crate::color::parse_hex(hex)?;
    let sample = SampledColor::new(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        0.0,
    );

    let favorites = open_favorites();
    let item = FavoriteItem::ScannedColor {
        color: sample.clone(),
    };
    if favorites.toggle(item) {
        println!("Added favorite: {} {}", sample.hex, sample.rgb_label());
    } else {
        println!("Removed favorite: {} {}", sample.hex, sample.rgb_label());
    }

    Ok(())
}

pub fn cmd_fav_remove(key: &str) -> Result<()> {
    let favorites = open_favorites();
    if favorites.remove(key) {
        println!("Removed favorite: {}", key);
    } else {
        println!("No favorite with key: {}", key);
    }

    Ok(())
}

fn describe_sample(sample: &SampledColor) -> String {
    let (r, g, b) = sample.rgb8();
    let text = match color::contrasting_text_color(sample.rgb.0, sample.rgb.1, sample.rgb.2) {
        TextColor::Black => "dark text",
        TextColor::White => "light text",
    };
    if sample.percentage > 0.0 {
        format!(
            "{}  {:>5.1}%  {}  {}  ({})",
            sample.hex,
            sample.percentage,
            color::rgb_label(r, g, b),
            sample.cmyk,
            text
        )
    } else {
        format!(
            "{}  {}  {}  ({})",
            sample.hex,
            color::rgb_label(r, g, b),
            sample.cmyk,
            text
        )
    }
}

fn describe_item(item: &FavoriteItem) -> String {
    match item {
        FavoriteItem::CatalogColor { color_id } => format!("catalog color {}", color_id),
        FavoriteItem::CatalogCombination { combination_id } => {
            format!("catalog combination {}", combination_id)
        }
        FavoriteItem::ScannedColor { color } => {
            let (r, g, b) = color::parse_hex_or_placeholder(&color.hex);
            format!("scanned color {}", color::rgb_label(r, g, b))
        }
        FavoriteItem::ScannedCombination { colors } => {
            let hexes: Vec<&str> = colors.iter().map(|c| c.hex.as_str()).collect();
            format!("scanned palette [{}]", hexes.join(" "))
        }
    }
}

fn parse_viewport(spec: &str) -> Result<Viewport> {
    let Some((w, h)) = spec.split_once(['x', 'X']) else {
        bail!("Viewport must be WIDTHxHEIGHT, got: {}", spec);
    };
    let width: f64 = w.trim().parse().context("Bad viewport width")?;
    let height: f64 = h.trim().parse().context("Bad viewport height")?;
    if width <= 0.0 || height <= 0.0 {
        bail!("Viewport dimensions must be positive");
    }
    Ok(Viewport { width, height })
}

fn parse_source(s: &str) -> Result<FavoriteSource> {
    match s {
        "catalog" => Ok(FavoriteSource::Catalog),
        "scanner" => Ok(FavoriteSource::Scanner),
        other => bail!("Unknown source '{}', expected catalog or scanner", other),
    }
}

fn parse_kind(s: &str) -> Result<FavoriteKind> {
    match s {
        "color" => Ok(FavoriteKind::Color),
        "combination" => Ok(FavoriteKind::Combination),
        other => bail!("Unknown kind '{}', expected color or combination", other),
    }
}
