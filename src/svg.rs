//! Output writer: wrap composed path-data in minimal SVG documents and
//! write one file per icon.

use std::fs;
use std::io;
use std::path::Path;

use crate::CompiledIcon;
use crate::log::debug;

/// Wrap path-data in a minimal single-path SVG document: 16x16 canvas,
/// filled black, no stroke.
pub fn document(path_data: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="utf-8" ?>"#,
            r#"<svg baseProfile="tiny" height="16px" version="1.2" width="16px" "#,
            r#"viewBox="0 0 16 16" xmlns="http://www.w3.org/2000/svg" "#,
            r#"xmlns:ev="http://www.w3.org/2001/xml-events" "#,
            r#"xmlns:xlink="http://www.w3.org/1999/xlink"><defs />"#,
            r#"<path d="{}" fill="black" stroke="none" /></svg>"#,
        ),
        path_data
    )
}

/// Write `<name>.svg` for every icon with non-empty path-data, creating
/// the directory if needed. Returns how many files were written.
pub fn write_icons(directory: &Path, icons: &[CompiledIcon]) -> io::Result<usize> {
    fs::create_dir_all(directory)?;
    let mut written = 0;
    for icon in icons {
        if icon.path_data.is_empty() {
            debug!("icon `{}` produced no geometry, skipping", icon.name);
            continue;
        }
        let file = directory.join(format!("{}.svg", icon.name));
        fs::write(&file, document(&icon.path_data))?;
        debug!("wrote `{}`", file.display());
        written += 1;
    }
    Ok(written)
}
