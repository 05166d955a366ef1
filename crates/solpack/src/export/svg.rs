//! SVG snapshot of a settled layout.
//!
//! The document is drawn bottom to top: background, backdrop, links, bodies,
//! labels and caption. Everything is in canvas coordinates.

use std::{fs::File, io::Write};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use solpack_core::{apply_stroke, body::Body, color::Color, geometry::Bounds};

use super::{Error, Exporter};
use crate::scene::{Layout, SceneStyle};

const FONT_FAMILY: &str = "sans-serif";
const LABEL_FONT_SIZE: f32 = 11.0;
/// Horizontal gap between a body's edge and its label
const LABEL_GAP: f32 = 5.0;
/// Baseline shift that centres a label on its body
const LABEL_BASELINE: f32 = 4.0;

/// Writes layouts to an SVG file.
#[derive(Debug, Clone)]
pub struct Svg {
    file_name: String,
}

impl Svg {
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
        }
    }

    /// Renders `layout` into an in-memory document.
    pub fn render_layout(layout: &Layout) -> Document {
        let style = layout.style();
        let canvas = style.canvas();

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    canvas.min_x(),
                    canvas.min_y(),
                    canvas.width(),
                    canvas.height()
                ),
            )
            .set("width", canvas.width())
            .set("height", canvas.height());

        if let Some(background) = style.background() {
            doc = doc.add(Self::render_background(canvas, background));
        }

        if let Some(backdrop) = style.backdrop() {
            let circle = svg_element::Circle::new()
                .set("cx", backdrop.center().x())
                .set("cy", backdrop.center().y())
                .set("r", backdrop.radius())
                .set("fill", backdrop.fill().to_string())
                .set("fill-opacity", backdrop.fill().alpha());
            doc = doc.add(apply_stroke!(circle, backdrop.stroke()));
        }

        doc = doc.add(Self::render_links(layout));

        let mut bodies = svg_element::Group::new().set("class", "bodies");
        for body in layout.bodies() {
            bodies = bodies.add(Self::render_body(body, style));
        }
        doc = doc.add(bodies);

        let mut labels = svg_element::Group::new()
            .set("class", "labels")
            .set("font-family", FONT_FAMILY)
            .set("font-size", LABEL_FONT_SIZE)
            .set("fill", style.label_color().to_string())
            .set("fill-opacity", style.label_color().alpha());
        for body in layout.bodies().iter().filter(|b| style.is_labeled(b.id())) {
            let position = body.position();
            labels = labels.add(
                svg_element::Text::new(body.id().name())
                    .set("x", position.x() + body.radius() + LABEL_GAP)
                    .set("y", position.y() + LABEL_BASELINE),
            );
        }
        doc = doc.add(labels);

        if let Some(caption) = style.caption() {
            doc = doc.add(
                svg_element::Text::new(caption.text())
                    .set("x", caption.position().x())
                    .set("y", caption.position().y())
                    .set("text-anchor", "middle")
                    .set("font-family", FONT_FAMILY)
                    .set("font-size", caption.font_size())
                    .set("fill", caption.color().to_string())
                    .set("fill-opacity", caption.color().alpha()),
            );
        }

        debug!(bodies = layout.bodies().len(), links = style.links().len(); "SVG document rendered");
        doc
    }

    fn render_background(canvas: Bounds, background: Color) -> svg_element::Rectangle {
        svg_element::Rectangle::new()
            .set("x", canvas.min_x())
            .set("y", canvas.min_y())
            .set("width", canvas.width())
            .set("height", canvas.height())
            .set("fill", background.to_string())
            .set("fill-opacity", background.alpha())
    }

    fn render_links(layout: &Layout) -> svg_element::Group {
        let mut group = svg_element::Group::new().set("class", "links");
        for link in layout.style().links() {
            let (Some(source), Some(target)) =
                (layout.body(link.source()), layout.body(link.target()))
            else {
                debug!(source:% = link.source(), target:% = link.target(); "Link endpoint not in layout, skipped");
                continue;
            };
            let line = svg_element::Line::new()
                .set("x1", source.position().x())
                .set("y1", source.position().y())
                .set("x2", target.position().x())
                .set("y2", target.position().y());
            group = group.add(apply_stroke!(line, link.stroke()));
        }
        group
    }

    fn render_body(body: &Body, style: &SceneStyle) -> svg_element::Circle {
        let fill = style.fill(body.id());
        let circle = svg_element::Circle::new()
            .set("cx", body.position().x())
            .set("cy", body.position().y())
            .set("r", body.radius())
            .set("data-name", body.id().name())
            .set("fill", fill.to_string())
            .set("fill-opacity", fill.alpha());
        apply_stroke!(circle, style.body_stroke())
    }

    /// Writes an SVG document to the configured file.
    fn write_document(&self, doc: &Document) -> Result<(), Error> {
        info!(file_name = self.file_name.as_str(); "Creating SVG file");
        let mut f = match File::create(&self.file_name) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name = self.file_name.as_str(), err:% = err; "Failed to create SVG file");
                return Err(Error::Io(err));
            }
        };

        if let Err(err) = write!(f, "{doc}") {
            error!(file_name = self.file_name.as_str(), err:% = err; "Failed to write SVG content");
            return Err(Error::Io(err));
        }

        Ok(())
    }
}

impl Exporter for Svg {
    fn export_layout(&mut self, layout: &Layout) -> Result<(), Error> {
        if layout.bodies().iter().any(|body| !body.position().is_finite()) {
            return Err(Error::Render("layout has non-finite positions".to_string()));
        }
        let doc = Self::render_layout(layout);
        self.write_document(&doc)
    }
}
