//! SVG rendering of frames.
//!
//! Each draw command becomes one `<polygon>`, emitted in command order, so
//! the painter order of the frame is preserved by document order.

use std::fs;
use std::path::Path;

use crate::color::Rgb;
use crate::frame::Frame;
use crate::output::OutputError;

/// Renders a frame into a standalone SVG document.
pub fn render_svg(frame: &Frame, width: f64, height: f64, background: Option<Rgb>) -> String {
    let mut doc = String::with_capacity(128 + frame.commands.len() * 96);

    doc.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = width,
        h = height
    ));
    if let Some(bg) = background {
        doc.push_str(&format!(
            "  <rect width=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
            width, height, bg
        ));
    }

    for command in &frame.commands {
        let points = command
            .points
            .iter()
            .map(|p| format!("{:.3},{:.3}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        doc.push_str(&format!(
            "  <polygon points=\"{}\" fill=\"{}\"/>\n",
            points, command.color
        ));
    }

    doc.push_str("</svg>\n");
    doc
}

/// Renders a frame and writes it to `path`.
pub fn write_svg(
    path: &Path,
    frame: &Frame,
    width: f64,
    height: f64,
    background: Option<Rgb>,
) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_svg(frame, width, height, background))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{DrawCommand, FaceKind, ScreenPoint};
    use tempfile::tempdir;

    fn two_quad_frame() -> Frame {
        let mut frame = Frame::new(1, 1.0);
        let quad = [
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(4.0, 0.0),
            ScreenPoint::new(4.0, 2.5),
            ScreenPoint::new(0.0, 2.5),
        ];
        frame.commands.push(DrawCommand::new(
            FaceKind::Roof,
            Rgb::new(0xd6, 0x52, 0x26),
            1,
            0,
            quad,
        ));
        frame.commands.push(DrawCommand::new(
            FaceKind::FrontWall,
            Rgb::new(0xff, 0xe0, 0xb3),
            1,
            0,
            quad,
        ));
        frame
    }

    #[test]
    fn test_one_polygon_per_command() {
        let svg = render_svg(&two_quad_frame(), 640.0, 480.0, None);
        assert_eq!(svg.matches("<polygon").count(), 2);
        assert!(!svg.contains("<rect"));
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_polygons_keep_command_order() {
        let svg = render_svg(&two_quad_frame(), 640.0, 480.0, None);
        let roof = svg.find("#d65226").unwrap();
        let wall = svg.find("#ffe0b3").unwrap();
        assert!(roof < wall);
        assert!(svg.contains("0.000,0.000 4.000,0.000 4.000,2.500 0.000,2.500"));
    }

    #[test]
    fn test_background_rect() {
        let svg = render_svg(&Frame::new(1, 1.0), 10.0, 10.0, Some(Rgb::new(0, 0, 0)));
        assert!(svg.contains("<rect width=\"10\" height=\"10\" fill=\"#000000\"/>"));
    }

    #[test]
    fn test_write_svg_creates_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshots").join("frame.svg");
        write_svg(&path, &two_quad_frame(), 64.0, 48.0, None).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("<polygon").count(), 2);
    }
}
