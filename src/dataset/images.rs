use crate::dataset::cell::Cell;
use base64::{Engine as _, engine::general_purpose};
use std::error::Error;
use std::path::{Path, PathBuf};

/// Picks the image entry of a row's `images` value.
///
/// A list yields its first entry and a record is used directly. Only the
/// first image of a multi-image row is ever looked at.
pub fn first_image(images: &Cell) -> Option<&Cell> {
    match images {
        Cell::List(entries) => entries.first(),
        Cell::Record(_) => Some(images),
        _ => None,
    }
}

/// Raw image bytes of a payload; text payloads are base64-decoded
pub fn decode_payload(payload: &Cell) -> Result<Vec<u8>, Box<dyn Error>> {
    match payload {
        Cell::Bytes(bytes) => Ok(bytes.clone()),
        Cell::Text(text) => Ok(general_purpose::STANDARD.decode(text.trim())?),
        other => Err(format!("unsupported image payload: {}", other.kind()).into()),
    }
}

/// Writes the image held by `record` to `{dir}/{file_stem}.jpg`.
///
/// The record must carry both a `bytes` payload and a `path` entry.
pub fn save_image(record: &Cell, file_stem: &str, dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let (Some(payload), Some(_)) = (record.get("bytes"), record.get("path")) else {
        return Err(format!("incomplete image record, keys: {:?}", record.keys()).into());
    };

    let data = decode_payload(payload)?;
    let target = dir.join(format!("{}.jpg", file_stem));
    std::fs::write(&target, data)?;
    Ok(target)
}
