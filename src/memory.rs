use std::path::Path;

use anyhow::{Context, Result};

/// Split `bytes` into big-endian 32-bit words. A trailing partial word is
/// dropped.
pub fn be_words(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks_exact(4)
        .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

pub fn load_words(path: &Path) -> Result<Vec<u32>> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    if bytes.len() % 4 != 0 {
        tracing::warn!(len = bytes.len(), "ignoring trailing partial word");
    }
    Ok(be_words(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_are_big_endian() {
        let bytes = [0x8B, 0x03, 0x00, 0x41, 0x14, 0, 0, 2];
        assert_eq!(be_words(&bytes), vec![0x8B03_0041, 0x1400_0002]);
    }

    #[test]
    fn partial_tail_is_dropped() {
        assert_eq!(be_words(&[0xFF, 0xE0, 0, 0, 0xAA, 0xBB]), vec![0xFFE0_0000]);
        assert!(be_words(&[1, 2, 3]).is_empty());
    }

    #[test]
    fn load_reads_file() {
        let path = std::env::temp_dir().join("_legv8_load_words.bin");
        std::fs::write(&path, [0x14u8, 0, 0, 1, 0xFF]).unwrap();
        assert_eq!(load_words(&path).unwrap(), vec![0x1400_0001]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_missing_file_errors() {
        assert!(load_words(Path::new("/nonexistent/legv8.bin")).is_err());
    }
}
