//! The visible surface and the shapes placed on it.
//!
//! A [`Surface`] owns every [`Shape`]. Other components hold a [`ShapeHandle`]
//! and go through the surface to move or recolor it. Operations on a handle the
//! surface does not know are logged as [`SurfaceError::InvalidShapeState`] and
//! otherwise ignored; nothing here returns an error to the caller.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Color;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("invalid shape state: {handle} {reason}")]
    InvalidShapeState { handle: ShapeHandle, reason: String },
}

/// Reference to a shape owned by a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ShapeHandle(Uuid);

impl std::fmt::Display for ShapeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "shape-{}", self.0)
    }
}

/// An absolutely positioned square.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    pub size: f64,
    /// Horizontal offset from the origin, in pixels.
    pub position: f64,
    pub color: Color,
}

impl Shape {
    /// Inline style for the element, pixel based.
    pub fn style(&self) -> String {
        format!(
            "position: absolute; top: 0px; left: {}px; width: {}px; height: {}px; background-color: {};",
            self.position, self.size, self.size, self.color
        )
    }
}

#[derive(Debug, Default)]
pub struct Surface {
    shapes: HashMap<ShapeHandle, Shape>,
    /// Top-level visible elements, in insertion order.
    children: Vec<ShapeHandle>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a square at the origin. It is not visible until inserted.
    pub fn create(&mut self, size: f64, color: Color) -> ShapeHandle {
        let handle = ShapeHandle(Uuid::new_v4());
        self.shapes.insert(
            handle,
            Shape {
                size,
                position: 0.0,
                color,
            },
        );
        handle
    }

    /// Make a shape visible as a new top-level element.
    pub fn insert_into_surface(&mut self, handle: ShapeHandle) {
        if self.shapes.contains_key(&handle) && !self.children.contains(&handle) {
            self.children.push(handle);
        }

        if !self.is_visible(handle) {
            let err = SurfaceError::InvalidShapeState {
                handle,
                reason: "is not present on the surface after insertion".to_string(),
            };
            tracing::error!("{}", err);
        }
    }

    pub fn set_position(&mut self, handle: ShapeHandle, offset: f64) {
        match self.shape_mut(handle) {
            Ok(shape) => shape.position = offset,
            Err(e) => tracing::error!("{}", e),
        }
    }

    pub fn set_color(&mut self, handle: ShapeHandle, color: Color) {
        match self.shape_mut(handle) {
            Ok(shape) => shape.color = color,
            Err(e) => tracing::error!("{}", e),
        }
    }

    pub fn shape(&self, handle: ShapeHandle) -> Option<&Shape> {
        self.shapes.get(&handle)
    }

    pub fn is_visible(&self, handle: ShapeHandle) -> bool {
        self.shapes.contains_key(&handle) && self.children.contains(&handle)
    }

    /// Visible shapes in insertion order.
    pub fn visible_shapes(&self) -> impl Iterator<Item = &Shape> + '_ {
        self.children.iter().filter_map(|h| self.shapes.get(h))
    }

    /// True when nothing has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Markup for every visible element, one per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for handle in &self.children {
            if let Some(shape) = self.shapes.get(handle) {
                let _ = writeln!(out, "<div id=\"{}\" style=\"{}\"></div>", handle, shape.style());
            }
        }
        out
    }

    fn shape_mut(&mut self, handle: ShapeHandle) -> Result<&mut Shape, SurfaceError> {
        self.shapes
            .get_mut(&handle)
            .ok_or_else(|| SurfaceError::InvalidShapeState {
                handle,
                reason: "does not exist".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Log sink for asserting on emitted diagnostics.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn with_captured_logs(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        logs.contents()
    }

    #[test]
    fn created_shape_starts_at_origin_and_hidden() {
        let mut surface = Surface::new();
        let handle = surface.create(100.0, Color::Black);

        let shape = surface.shape(handle).unwrap();
        assert_eq!(shape.position, 0.0);
        assert_eq!(shape.size, 100.0);
        assert_eq!(shape.color, Color::Black);
        assert!(!surface.is_visible(handle));
        assert!(surface.is_empty());
    }

    #[test]
    fn insert_makes_shape_visible_once() {
        let mut surface = Surface::new();
        let handle = surface.create(100.0, Color::Black);

        surface.insert_into_surface(handle);
        surface.insert_into_surface(handle);

        assert!(surface.is_visible(handle));
        assert_eq!(surface.render().lines().count(), 1);
    }

    #[test]
    fn foreign_handle_is_ignored() {
        let mut other = Surface::new();
        let foreign = other.create(100.0, Color::Black);

        let mut surface = Surface::new();
        surface.insert_into_surface(foreign);
        surface.set_position(foreign, 50.0);
        surface.set_color(foreign, Color::Red);

        assert!(surface.is_empty());
        assert!(surface.shape(foreign).is_none());
        assert_eq!(other.shape(foreign).unwrap().color, Color::Black);
    }

    #[test]
    fn failed_insertion_logs_invalid_shape_state() {
        let mut other = Surface::new();
        let foreign = other.create(100.0, Color::Black);
        let mut surface = Surface::new();

        let output = with_captured_logs(|| surface.insert_into_surface(foreign));

        assert!(output.contains("ERROR"));
        assert!(output.contains("invalid shape state"));
        assert!(output.contains("is not present on the surface after insertion"));
        assert!(output.contains(&foreign.to_string()));
    }

    #[test]
    fn updates_to_unknown_shapes_log_invalid_shape_state() {
        let mut other = Surface::new();
        let foreign = other.create(100.0, Color::Black);
        let mut surface = Surface::new();

        let output = with_captured_logs(|| {
            surface.set_position(foreign, 10.0);
            surface.set_color(foreign, Color::Red);
        });

        assert_eq!(output.matches("invalid shape state").count(), 2);
        assert!(output.contains("does not exist"));
    }

    #[test]
    fn valid_insertion_logs_nothing() {
        let mut surface = Surface::new();
        let handle = surface.create(100.0, Color::Black);

        let output = with_captured_logs(|| surface.insert_into_surface(handle));

        assert!(!output.contains("ERROR"));
    }

    #[test]
    fn set_color_is_idempotent() {
        let mut surface = Surface::new();
        let handle = surface.create(100.0, Color::Black);
        surface.set_color(handle, Color::Green);
        surface.set_color(handle, Color::Green);
        assert_eq!(surface.shape(handle).unwrap().color, Color::Green);
    }

    #[test]
    fn render_uses_pixel_styles() {
        let mut surface = Surface::new();
        let handle = surface.create(100.0, Color::Black);
        surface.insert_into_surface(handle);
        surface.set_position(handle, 42.5);
        surface.set_color(handle, Color::Blue);

        let html = surface.render();
        assert!(html.contains("position: absolute;"));
        assert!(html.contains("left: 42.5px;"));
        assert!(html.contains("width: 100px; height: 100px;"));
        assert!(html.contains("background-color: blue;"));
    }
}
