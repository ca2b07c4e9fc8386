//! Line source for corpus files: plain text or zstd-compressed (`.zst`).
//! The whole file is materialized before extraction starts, so I/O errors never leave a
//! half-built corpus behind.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use zstd::stream::read::Decoder;

pub fn is_zst(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("zst"))
}

fn open_source(path: &Path) -> Result<Box<dyn Read>> {
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    if is_zst(path) {
        let mut decoder = Decoder::new(f)
            .with_context(|| format!("zstd decoder for {}", path.display()))?;
        // Large windows show up in archived dumps.
        decoder.window_log_max(31)?;
        Ok(Box::new(decoder))
    } else {
        Ok(Box::new(f))
    }
}

/// Read every line of `path`. Strips trailing `\r?\n`; blank lines are kept for extraction
/// to skip.
pub fn read_lines(path: &Path, read_buf_bytes: usize) -> Result<Vec<String>> {
    let src = open_source(path)?;
    let mut reader = BufReader::with_capacity(read_buf_bytes.max(8 * 1024), src);

    let mut lines = Vec::new();
    let mut buf = String::with_capacity(16 * 1024);
    loop {
        buf.clear();
        let n = reader
            .read_line(&mut buf)
            .with_context(|| format!("read {} (line {})", path.display(), lines.len() + 1))?;
        if n == 0 {
            break;
        }
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') { buf.pop(); }
        }
        lines.push(buf.clone());
    }
    Ok(lines)
}
