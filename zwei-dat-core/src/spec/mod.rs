mod entry;
mod header;

pub use entry::*;
pub use header::*;

/// Strip the trailing NUL padding from a fixed-width name slot.
pub fn trim_padding(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    &bytes[..end]
}
