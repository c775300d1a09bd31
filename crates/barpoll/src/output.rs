use std::io::Write;

use anyhow::{Context, Result};
use status_render::RenderedStatus;

/// Write a status as a single json line, and flush it right away so the bar picks it up.
pub fn write_status<W: Write>(out: &mut W, status: &RenderedStatus) -> Result<()> {
    serde_json::to_writer(&mut *out, status).context("Failed to serialize status")?;
    out.write_all(b"\n").context("Failed to write status line")?;
    out.flush().context("Failed to flush stdout")
}
