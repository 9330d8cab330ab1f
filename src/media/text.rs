// SPDX-License-Identifier: MPL-2.0
//! Text overlay rendering.
//!
//! Overlays are laid out as a small SVG `<text>` document and rendered with
//! `resvg`. Lines wrap at word boundaries once they exceed the configured
//! maximum width. The rendered block is measured and its center becomes the
//! pivot for the overlay's rotation and scale.

use crate::domain::editing::TextOverlay;
use crate::domain::geometry::{Offset, Size};
use resvg::usvg;
use resvg::usvg::fontdb::{Database, Family};
use std::sync::Arc;
use tiny_skia::{Pixmap, Transform};

/// Line spacing as a multiple of the font size.
const LINE_HEIGHT: f32 = 1.2;

/// Families preferred for generic `sans-serif` text, most wanted first.
const PREFERRED_FAMILIES: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Arial",
    "Helvetica",
    "FreeSans",
];

/// Generic CSS family names the renderer understands.
const GENERIC_FAMILIES: &[&str] = &["serif", "sans-serif", "cursive", "fantasy", "monospace"];

fn has_family(fontdb: &Database, name: &str) -> bool {
    fontdb
        .faces()
        .any(|face| face.families.iter().any(|(family, _)| family == name))
}

/// Points every generic family without an installed face at one that is
/// installed.
///
/// `sans-serif` always resolves to the first installed entry of
/// [`PREFERRED_FAMILIES`], or else to any installed family. Returns the
/// family used, or `None` if the database holds no faces.
pub fn resolve_generic_families(fontdb: &mut Database) -> Option<String> {
    let fallback = PREFERRED_FAMILIES
        .iter()
        .find(|name| has_family(fontdb, name))
        .map(|name| (*name).to_string())
        .or_else(|| {
            fontdb
                .faces()
                .find_map(|face| face.families.first().map(|(family, _)| family.clone()))
        })?;

    fontdb.set_sans_serif_family(fallback.clone());
    if !has_family(fontdb, fontdb.family_name(&Family::Serif)) {
        fontdb.set_serif_family(fallback.clone());
    }
    if !has_family(fontdb, fontdb.family_name(&Family::Monospace)) {
        fontdb.set_monospace_family(fallback.clone());
    }
    if !has_family(fontdb, fontdb.family_name(&Family::Cursive)) {
        fontdb.set_cursive_family(fallback.clone());
    }
    if !has_family(fontdb, fontdb.family_name(&Family::Fantasy)) {
        fontdb.set_fantasy_family(fallback.clone());
    }
    Some(fallback)
}

/// Font settings shared by every overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f32,
    pub max_width: f32,
}

/// Lays out and paints text overlays.
#[derive(Clone)]
pub struct TextRenderer {
    style: TextStyle,
    fontdb: Arc<Database>,
}

impl std::fmt::Debug for TextRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRenderer")
            .field("style", &self.style)
            .field("fonts", &self.fontdb.len())
            .finish()
    }
}

impl TextRenderer {
    /// Creates a renderer using the fonts installed on the system.
    ///
    /// Generic families are mapped onto installed faces, see
    /// [`resolve_generic_families`].
    #[must_use]
    pub fn new(style: TextStyle) -> Self {
        let mut fontdb = Database::new();
        fontdb.load_system_fonts();
        match resolve_generic_families(&mut fontdb) {
            Some(family) => log::debug!(
                "loaded {} system font faces, sans-serif is {family:?}",
                fontdb.len()
            ),
            None => log::warn!("no system fonts found, text overlays will not be drawn"),
        }
        Self::with_fontdb(style, Arc::new(fontdb))
    }

    /// Creates a renderer over an existing font database.
    #[must_use]
    pub fn with_fontdb(style: TextStyle, fontdb: Arc<Database>) -> Self {
        Self { style, fontdb }
    }

    #[must_use]
    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Returns `true` if at least one font face is available.
    #[must_use]
    pub fn has_fonts(&self) -> bool {
        !self.fontdb.is_empty()
    }

    /// Size of the laid-out text block, or `None` if nothing would be drawn.
    #[must_use]
    pub fn measure(&self, overlay: &TextOverlay) -> Option<Size> {
        self.layout(overlay).map(|(_, bbox)| Size::new(bbox.width(), bbox.height()))
    }

    /// Paints `overlay` onto `canvas`.
    ///
    /// The text block is centered at the canvas center plus the overlay
    /// offset, then rotated and scaled about its own center.
    pub fn draw(&self, canvas: &mut Pixmap, canvas_size: Size, overlay: &TextOverlay) {
        let Some((tree, bbox)) = self.layout(overlay) else {
            log::debug!("text overlay {:?} has nothing to draw", overlay.id);
            return;
        };
        let anchor = canvas_size.center() + overlay.offset;
        let pivot = Offset::new(bbox.x() + bbox.width() / 2.0, bbox.y() + bbox.height() / 2.0);
        let transform = Transform::from_translate(anchor.x, anchor.y)
            .pre_rotate(overlay.rotation.degrees())
            .pre_scale(overlay.scale, overlay.scale)
            .pre_translate(-pivot.x, -pivot.y);
        resvg::render(&tree, transform, &mut canvas.as_mut());
    }

    fn layout(&self, overlay: &TextOverlay) -> Option<(usvg::Tree, usvg::Rect)> {
        if overlay.is_blank() || !self.has_fonts() {
            return None;
        }
        let lines = self.wrap(&overlay.text);
        let color = overlay.color;
        let svg = self.svg_document(&lines, (color.r, color.g, color.b), color.opacity());
        let tree = self.parse(&svg)?;
        let bbox = tree.root().bounding_box();
        if bbox.width() <= 0.0 || bbox.height() <= 0.0 {
            log::warn!(
                "no glyphs for text overlay {:?} in font family {:?}",
                overlay.id,
                self.style.font_family
            );
            return None;
        }
        Some((tree, bbox))
    }

    /// Greedy word wrap against the maximum width. Explicit newlines are
    /// kept; runs of spaces collapse to one.
    fn wrap(&self, text: &str) -> Vec<String> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let mut line = String::new();
            for word in paragraph.split_whitespace() {
                if line.is_empty() {
                    line.push_str(word);
                    continue;
                }
                let candidate = format!("{line} {word}");
                if self.line_width(&candidate).is_some_and(|w| w > self.style.max_width) {
                    lines.push(std::mem::replace(&mut line, word.to_string()));
                } else {
                    line = candidate;
                }
            }
            lines.push(line);
        }
        lines
    }

    fn line_width(&self, line: &str) -> Option<f32> {
        let svg = self.svg_document(&[line.to_string()], (0, 0, 0), 1.0);
        let tree = self.parse(&svg)?;
        Some(tree.root().bounding_box().width())
    }

    /// Font family list for the `<text>` element. Named families fall back
    /// to `sans-serif` when they are not installed.
    fn family_list(&self) -> String {
        let family = self.style.font_family.trim();
        if family.is_empty() {
            return "sans-serif".to_string();
        }
        if GENERIC_FAMILIES.contains(&family) {
            return family.to_string();
        }
        format!("'{}', sans-serif", family.replace('\'', ""))
    }

    fn svg_document(&self, lines: &[String], rgb: (u8, u8, u8), opacity: f32) -> String {
        let families = self.family_list();
        let family = quick_xml::escape::escape(families.as_str());
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"><text font-family="{family}" font-size="{size}" fill="rgb({r},{g},{b})" fill-opacity="{opacity}">"#,
            size = self.style.font_size,
            r = rgb.0,
            g = rgb.1,
            b = rgb.2,
        );
        let advance = self.style.font_size * LINE_HEIGHT;
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            #[allow(clippy::cast_precision_loss)]
            let y = advance * (i as f32 + 1.0);
            svg.push_str(&format!(
                r#"<tspan x="0" y="{y}">{}</tspan>"#,
                quick_xml::escape::escape(line.as_str())
            ));
        }
        svg.push_str("</text></svg>");
        svg
    }

    fn parse(&self, svg: &str) -> Option<usvg::Tree> {
        let mut options = usvg::Options::default();
        options.fontdb = Arc::clone(&self.fontdb);
        match usvg::Tree::from_str(svg, &options) {
            Ok(tree) => Some(tree),
            Err(err) => {
                log::warn!("failed to lay out text overlay: {err}");
                None
            }
        }
    }
}
