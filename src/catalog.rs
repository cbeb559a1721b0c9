//! The static color catalog: named reference colors and their swatch
//! collections, loaded once at startup and immutable afterwards.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::color;
use crate::combination::{self, Combination};

/// One named catalog color.
///
/// The display hex is derived from the RGB triple at mapping time (and
/// CMYK on demand) so the representations cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogColor {
    pub id: u32,
    pub collection_id: u32,
    pub name: String,
    pub rgb: (u8, u8, u8),
    pub hex: String,
    pub combination_ids: BTreeSet<u32>,
}

impl CatalogColor {
    pub fn cmyk(&self) -> (u8, u8, u8, u8) {
        color::rgb_to_cmyk(self.rgb.0, self.rgb.1, self.rgb.2)
    }

    pub fn cmyk_label(&self) -> String {
        color::cmyk_label(self.rgb.0, self.rgb.1, self.rgb.2)
    }

    pub fn rgb_label(&self) -> String {
        color::rgb_label(self.rgb.0, self.rgb.1, self.rgb.2)
    }
}

/// A swatch collection header from the swatches document.
#[derive(Debug, Clone, Deserialize)]
pub struct Swatch {
    pub id: u32,
    pub description: String,
}

/// Raw record from the colors document.
///
/// Older schema revisions also carry a `cmyk_array`; serde drops unknown
/// fields, and CMYK is always recomputed from `rgb_array` instead of
/// trusted.
#[derive(Debug, Clone, Deserialize)]
pub struct ColorRecord {
    pub id: u32,
    pub collection_id: u32,
    pub name: String,
    #[serde(default)]
    pub hex: String,
    #[serde(rename = "rgb_array")]
    pub rgb: [u8; 3],
    pub combinations: Vec<u32>,
}

/// Maps raw catalog records into domain colors.
pub trait ColorMapper {
    fn map(&self, record: &ColorRecord) -> CatalogColor;

    fn map_all(&self, records: &[ColorRecord]) -> Vec<CatalogColor> {
        records.iter().map(|r| self.map(r)).collect()
    }
}

/// Production mapper: derives the hex from `rgb_array` and keeps the
/// combination ids as a set.
pub struct CatalogMapper;

impl ColorMapper for CatalogMapper {
    fn map(&self, record: &ColorRecord) -> CatalogColor {
        let [r, g, b] = record.rgb;
        let hex = color::rgb_to_hex(r, g, b);

        let stored = record.hex.trim_start_matches('#');
        if !stored.is_empty() && !stored.eq_ignore_ascii_case(&hex[1..]) {
            warn!(
                id = record.id,
                stored = %record.hex,
                derived = %hex,
                "catalog hex disagrees with rgb_array, using derived value"
            );
        }

        CatalogColor {
            id: record.id,
            collection_id: record.collection_id,
            name: record.name.clone(),
            rgb: (r, g, b),
            hex,
            combination_ids: record.combinations.iter().copied().collect(),
        }
    }
}

/// The loaded catalog plus its derived combination index. Built once,
/// then shared read-only.
#[derive(Debug, Default)]
pub struct Catalog {
    pub swatches: Vec<Swatch>,
    pub colors: Vec<CatalogColor>,
    pub combinations: Vec<Combination>,
}

#[derive(Deserialize)]
struct ColorsDocument {
    colors: Vec<ColorRecord>,
}

impl Catalog {
    /// Load both catalog documents and build the combination index.
    ///
    /// Malformed or missing documents degrade to an empty catalog: the
    /// caller runs with no content instead of failing.
    pub fn load(colors_path: &Path, swatches_path: &Path, mapper: &dyn ColorMapper) -> Self {
        let swatches = read_swatches(swatches_path);
        let records = read_colors(colors_path);
        let colors = mapper.map_all(&records);
        let combinations = combination::build(&colors);
        Self {
            swatches,
            colors,
            combinations,
        }
    }

    pub fn color(&self, id: u32) -> Option<&CatalogColor> {
        self.colors.iter().find(|c| c.id == id)
    }

    pub fn combination(&self, id: u32) -> Option<&Combination> {
        self.combinations.iter().find(|c| c.id == id)
    }

    /// Colors belonging to one swatch collection.
    pub fn colors_in_collection(&self, collection_id: u32) -> Vec<&CatalogColor> {
        self.colors
            .iter()
            .filter(|c| c.collection_id == collection_id)
            .collect()
    }
}

fn read_swatches(path: &Path) -> Vec<Swatch> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "swatches document unavailable");
            return Vec::new();
        }
    };
    match serde_json::from_str(&data) {
        Ok(swatches) => swatches,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "malformed swatches document");
            Vec::new()
        }
    }
}

fn read_colors(path: &Path) -> Vec<ColorRecord> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "colors document unavailable");
            return Vec::new();
        }
    };
    match serde_json::from_str::<ColorsDocument>(&data) {
        Ok(doc) => doc.colors,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "malformed colors document");
            Vec::new()
        }
    }
}
