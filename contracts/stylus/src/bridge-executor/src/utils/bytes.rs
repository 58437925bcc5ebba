//! Minimal big-endian parsing helpers for the packed proposal batch.

use alloc::vec::Vec;

use stylus_sdk::alloy_primitives::FixedBytes;

use crate::errors::DecodeError;

fn take<'a>(bytes: &'a [u8], i: &mut usize, len: usize) -> Result<&'a [u8], DecodeError> {
    let end = i.checked_add(len).ok_or(DecodeError::Truncated)?;
    if bytes.len() < end {
        return Err(DecodeError::Truncated);
    }
    let out = &bytes[*i..end];
    *i = end;
    Ok(out)
}

pub fn read_u8(bytes: &[u8], i: &mut usize) -> Result<u8, DecodeError> {
    Ok(take(bytes, i, 1)?[0])
}

pub fn read_u32_be(bytes: &[u8], i: &mut usize) -> Result<u32, DecodeError> {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(take(bytes, i, 4)?);
    Ok(u32::from_be_bytes(buf))
}

pub fn read_u64_be(bytes: &[u8], i: &mut usize) -> Result<u64, DecodeError> {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(take(bytes, i, 8)?);
    Ok(u64::from_be_bytes(buf))
}

pub fn read_b32(bytes: &[u8], i: &mut usize) -> Result<FixedBytes<32>, DecodeError> {
    Ok(FixedBytes::from_slice(take(bytes, i, 32)?))
}

pub fn read_vec(bytes: &[u8], i: &mut usize, len: usize) -> Result<Vec<u8>, DecodeError> {
    Ok(take(bytes, i, len)?.to_vec())
}
