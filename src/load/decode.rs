// src/load/decode.rs

use anyhow::{anyhow, bail, Context, Result};
use encoding_rs::{Encoding, UTF_8};
use std::{fs, path::Path};
use tracing::{debug, instrument};

/// Look up an encoding by its WHATWG label (`shift_jis`, `utf-8`, ...).
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| anyhow!("unknown text encoding {:?}", label))
}

/// Decode `bytes` as `encoding`. A leading BOM overrides `encoding`.
/// Malformed input is an error rather than a string full of U+FFFD.
pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        bail!("input is not valid {}", used.name());
    }
    Ok(text.into_owned())
}

/// Read a whole file and decode it.
#[instrument(level = "debug", skip(path, encoding), fields(path = %path.display(), encoding = encoding.name()))]
pub fn read_decoded(path: &Path, encoding: &'static Encoding) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    debug!(bytes = bytes.len(), "read file");
    decode_bytes(&bytes, encoding).with_context(|| format!("decoding {}", path.display()))
}

/// Read a UTF-8 file (with or without BOM).
pub fn read_utf8(path: &Path) -> Result<String> {
    read_decoded(path, UTF_8)
}
