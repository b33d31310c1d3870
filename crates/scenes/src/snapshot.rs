//! Writes the current frame of a scene to an SVG file.

use crate::svg::to_svg_document;
use crate::Scene;
use fieldfx_core::FieldError;
use std::path::Path;

/// Renders `scene`'s current frame and writes it to `path`.
///
/// Returns `FieldError::Disposed` for a torn-down scene or `FieldError::Io`
/// on write failure.
pub fn write_svg(scene: &dyn Scene, path: &Path) -> Result<(), FieldError> {
    let frame = scene.frame()?;
    let doc = to_svg_document(&frame, scene.size());
    std::fs::write(path, doc).map_err(|e| FieldError::Io(format!("{}: {e}", path.display())))?;
    log::debug!("wrote {} snapshot to {}", scene.name(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SceneKind;
    use serde_json::json;

    #[test]
    fn writes_hero_grid_snapshot() {
        let mut scene = SceneKind::from_name("hero-grid", 100.0, 60.0, 1, &json!({})).unwrap();
        scene.renderer_mut().set_pointer(40.0, 20.0).unwrap();
        scene.renderer_mut().tick(1.0 / 60.0).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hero.svg");

        write_svg(&scene, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("<polyline").count(), 13 + 21);
        assert!(text.contains("<circle"));
    }

    #[test]
    fn identical_runs_write_identical_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut outputs = Vec::new();
        for name in ["a.svg", "b.svg"] {
            let mut scene =
                SceneKind::from_name("skills-graph", 900.0, 520.0, 3, &json!({})).unwrap();
            for i in 0..30 {
                let r = scene.renderer_mut();
                r.set_pointer(200.0 + i as f64 * 5.0, 150.0).unwrap();
                r.tick(1.0 / 60.0).unwrap();
            }
            let path = dir.path().join(name);
            write_svg(&scene, &path).unwrap();
            outputs.push(std::fs::read(&path).unwrap());
        }
        assert_eq!(outputs[0], outputs[1]);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let scene = SceneKind::from_name("hero-grid", 100.0, 60.0, 1, &json!({})).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("hero.svg");
        assert!(matches!(write_svg(&scene, &path), Err(FieldError::Io(_))));
    }
}
