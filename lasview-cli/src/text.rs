//! Text stand-ins for the rendering surface and clipboard.
//!
//! The CLI has no 3-D view; the surface records what would be drawn so the
//! browse loop can echo it.

use lasview_core::{
    Clipboard, ClipboardError, DisplayStyle, MeasurementMarker, PointCloudRecord, RenderSurface,
};

/// Records draw calls as printable lines.
#[derive(Debug, Default)]
pub struct TextSurface {
    events: Vec<String>,
    lines: usize,
}

impl TextSurface {
    /// Takes every event recorded since the last call.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.events)
    }

    /// Number of measurement lines currently drawn.
    pub fn line_count(&self) -> usize {
        self.lines
    }
}

fn fmt_marker(marker: &MeasurementMarker) -> String {
    format!(
        "({:.3}, {:.3}, {:.6}) -> ({:.3}, {:.3}, {:.6})",
        marker.from.x, marker.from.y, marker.from.z, marker.to.x, marker.to.y, marker.to.z
    )
}

impl RenderSurface for TextSurface {
    fn clear(&mut self) {
        self.lines = 0;
    }

    fn add_cloud(&mut self, record: &PointCloudRecord, style: DisplayStyle) {
        let colouring = match style {
            DisplayStyle::Attribute => record.color_mode().to_string(),
            DisplayStyle::Uniform => "uniform".to_string(),
        };
        self.events.push(format!(
            "  draw {} ({} points, {colouring})",
            record.file_name(),
            record.len()
        ));
    }

    fn add_line(&mut self, marker: &MeasurementMarker) {
        self.lines += 1;
        self.events.push(format!("  line {}", fmt_marker(marker)));
    }

    fn remove_line(&mut self, marker: &MeasurementMarker) {
        self.lines = self.lines.saturating_sub(1);
        self.events.push(format!("  remove line {}", fmt_marker(marker)));
    }

    fn reset_camera(&mut self) {}
}

/// Keeps the last copied text; the browse loop prints it.
#[derive(Debug, Default)]
pub struct EchoClipboard {
    pub last: Option<String>,
}

impl Clipboard for EchoClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.last = Some(text.to_string());
        Ok(())
    }
}
