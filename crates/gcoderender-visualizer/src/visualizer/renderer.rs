//! Seam to an external rendering backend

use gcoderender_core::Result;

use super::model::ToolpathModel;

/// A backend that draws a parsed toolpath
///
/// Implementations upload [`ToolpathModel::vertex_buffer`] and
/// [`ToolpathModel::index_buffer`] (see `as_bytes`), frame the camera on
/// [`ToolpathModel::scene_bounds`] and draw once per
/// [`ToolpathModel::draw_instances`] transform.
pub trait ToolpathRenderer {
    fn render(&mut self, model: &ToolpathModel) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gcode::ToolpathParser;

    /// Records what a GPU backend would upload
    #[derive(Default)]
    struct RecordingRenderer {
        uploaded_bytes: usize,
        draw_calls: usize,
    }

    impl ToolpathRenderer for RecordingRenderer {
        fn render(&mut self, model: &ToolpathModel) -> Result<()> {
            self.uploaded_bytes +=
                model.vertex_buffer().as_bytes().len() + model.index_buffer().as_bytes().len();
            self.draw_calls += model.draw_instances(200.0).len();
            Ok(())
        }
    }

    #[test]
    fn test_renderer_receives_model() {
        let model = ToolpathParser::default()
            .parse_str("M605 S3\nG1 X10 Y0 E1\n")
            .unwrap();
        let mut renderer = RecordingRenderer::default();
        renderer.render(&model).unwrap();

        assert_eq!(renderer.uploaded_bytes, 12 * 6 * 4 + 36 * 4);
        assert_eq!(renderer.draw_calls, 2);
    }
}
