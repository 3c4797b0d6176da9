//! Batch export writers.

use std::io::Write;

use lasview_core::ExportRow;

/// Writes rows as CSV. The coordinate column is quoted since it holds a comma.
pub fn write_csv<W: Write>(rows: &[ExportRow], out: &mut W) -> std::io::Result<()> {
    writeln!(out, "file_name,detection_id,coordinates,point_count")?;
    for row in rows {
        writeln!(
            out,
            "{},{},\"{}\",{}",
            row.file_name,
            row.detection_id.as_deref().unwrap_or(""),
            row.coordinates,
            row.point_count
        )?;
    }
    out.flush()
}

/// Writes rows as a pretty-printed JSON array.
pub fn write_json<W: Write>(rows: &[ExportRow], out: &mut W) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *out, rows)?;
    writeln!(out).map_err(serde_json::Error::io)
}
