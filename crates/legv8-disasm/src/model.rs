use anyhow::Result;
use std::path::Path;

use legv8_rs::memory::load_words;

#[derive(Debug, Clone)]
pub struct Image {
    pub name: String,
    pub words: Vec<u32>,
}

pub fn load_image(path: &Path) -> Result<Image> {
    let words = load_words(path)?;
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    Ok(Image { name, words })
}

/// Raw word as binary and hex, e.g. for `--trace`.
pub fn trace_line(raw32: u32) -> String {
    format!("{raw32:032b} {raw32:#010x}")
}
