pub mod formatter;
pub mod html;

pub use formatter::{
    format_breakdown, format_count, format_csv, format_leaderboard_table, format_stars,
    should_use_colors, DERIVED_COLUMNS,
};
pub use html::{badge_class, render_html, render_html_with_notice};

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

/// Write rendered output to a file atomically
///
/// Uses atomic-write-file so a reader (e.g. a static web server) never sees
/// a half-written page.
pub fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    file.commit()
        .with_context(|| format!("Failed to save {}", path.display()))?;

    Ok(())
}
