//! System font lookup shared by the raster backends.
//!
//! Families resolve against the system font database once per process and
//! stay cached, misses included. There is no bundled fallback face:
//! callers fall back to approximate metrics when a family cannot be
//! resolved.

use std::collections::HashMap;
use std::fs;
use std::sync::{Mutex, OnceLock};

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::{point as rt_point, Font, Scale};
use tracing::warn;

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        db
    })
}

/// Resolves a family name to a cached font face.
pub fn lookup(family: &str) -> Option<&'static Font<'static>> {
    static CACHE: OnceLock<Mutex<HashMap<String, Option<&'static Font<'static>>>>> =
        OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    if let Some(cached) = cache
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .get(family)
    {
        return *cached;
    }

    let loaded: Option<&'static Font<'static>> = match load_from_system(family) {
        Some(font) => Some(Box::leak(Box::new(font))),
        None => {
            warn!(family, "font family not found, using approximate metrics");
            None
        }
    };

    cache
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .insert(family.to_string(), loaded);
    loaded
}

fn load_from_system(family: &str) -> Option<Font<'static>> {
    let families: Vec<Family<'_>> = match family.trim() {
        "" | "Sans" => vec![Family::SansSerif],
        "Serif" => vec![Family::Serif],
        "Monospace" => vec![Family::Monospace],
        other => vec![Family::Name(other)],
    };

    let query = Query {
        families: &families,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;

    match &face.source {
        fontdb::Source::File(path) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::Binary(bytes) => Font::try_from_vec(bytes.as_ref().as_ref().to_vec()),
    }
}

/// Pixel extents of `text` at the given size: glyph metrics when the
/// family resolves, the average-advance approximation otherwise.
pub fn measure(family: &str, size: f64, text: &str) -> (f64, f64) {
    match lookup(family) {
        Some(font) => {
            let scale = Scale::uniform(size as f32);
            let v_metrics = font.v_metrics(scale);
            let width = font
                .layout(text, scale, rt_point(0.0, 0.0))
                .last()
                .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
                .unwrap_or(0.0);
            (
                f64::from(width),
                f64::from(v_metrics.ascent - v_metrics.descent),
            )
        }
        None => approx_extents(size, text),
    }
}

/// Extents estimate assuming an average glyph advance of 0.6 em.
pub fn approx_extents(size: f64, text: &str) -> (f64, f64) {
    (text.chars().count() as f64 * size * 0.6, size)
}

/// Rasterizes `text` with its baseline origin at `(x, y)`, feeding
/// coverage samples to `plot` as `(px, py, coverage)`. Returns `false`
/// when the family cannot be resolved, in which case nothing is drawn.
pub fn draw_glyphs(
    family: &str,
    size: f64,
    x: f64,
    y: f64,
    text: &str,
    mut plot: impl FnMut(i32, i32, f32),
) -> bool {
    let Some(font) = lookup(family) else {
        return false;
    };
    let scale = Scale::uniform(size as f32);
    for glyph in font.layout(text, scale, rt_point(x as f32, y as f32)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, coverage| {
                plot(bb.min.x + gx as i32, bb.min.y + gy as i32, coverage);
            });
        }
    }
    true
}
