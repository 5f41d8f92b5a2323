use crate::error::{EzError, Result};
use std::io::Write;

pub const MAGIC_TAG: &[u8; 7] = b"EZView2";
/// Tag plus zero fill.
pub const MAGIC_LEN: usize = 32;

pub fn magic_block() -> [u8; MAGIC_LEN] {
    let mut block = [0u8; MAGIC_LEN];
    block[..MAGIC_TAG.len()].copy_from_slice(MAGIC_TAG);
    block
}

pub fn write_magic(mut w: impl Write) -> std::io::Result<()> {
    w.write_all(&magic_block())
}

/// Checks the leading magic block of a capture buffer.
pub fn check_magic(buf: &[u8]) -> Result<()> {
    let block = buf.get(..MAGIC_LEN).ok_or(EzError::TruncatedInput {
        have: buf.len(),
        need: MAGIC_LEN,
    })?;
    let (tag, fill) = block.split_at(MAGIC_TAG.len());
    if tag != MAGIC_TAG || fill.iter().any(|&b| b != 0) {
        return Err(EzError::BadMagic {
            found: hex::encode(block),
        });
    }
    Ok(())
}
