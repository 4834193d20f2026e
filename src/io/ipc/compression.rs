//! The compression of q IPC bodies.
//!
//! A compressed body starts with the length of the whole uncompressed message (header
//! included) as an `i32` in the message's byte order, followed by a stream of units in
//! groups of eight. Each group starts with a flag byte whose bit `i` tells whether unit `i`
//! is a literal byte (clear) or a copy (set). A copy is two bytes, `[index, extra]`: it
//! reproduces `2 + extra` bytes of previous output starting at the position stored in slot
//! `index` of a 256-entry table. The table maps `byte[p] ^ byte[p + 1]` to the last
//! position `p` with that hash, and is maintained identically by both sides.
use crate::endianess::Endianness;
use crate::error::{QError, Result};
use crate::types::NativeType;

use super::HEADER_LENGTH;

const UNSET: usize = usize::MAX;
// the longest copy is 2 + 255 bytes
const MAX_EXTRA: usize = 255;

/// Compresses `body` (a message body without its header) into a little endian
/// compressed body.
pub fn compress(body: &[u8]) -> Vec<u8> {
    match compress_body(body, Endianness::Little, None) {
        Some(compressed) => compressed,
        None => unreachable!("compression without a limit always completes"),
    }
}

/// Decompresses a little endian compressed body into the message body.
/// # Errors
/// Iff `data` is not a valid compressed body.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_body(data, Endianness::Little)
}

/// Compresses `body` with the uncompressed length written in `endianness`.
///
/// When `limit` is set, compression is abandoned (returning `None`) as soon as the whole
/// compressed message (header included) would be longer than `limit` bytes.
pub fn compress_body(body: &[u8], endianness: Endianness, limit: Option<usize>) -> Option<Vec<u8>> {
    let total = body.len() + HEADER_LENGTH;
    let mut out = Vec::with_capacity(limit.unwrap_or(total) / 2 + 16);
    (total as i32).encode(&mut out, endianness);

    let mut table = [UNSET; 256];
    // position of the last literal and its hash, inserted into the table one unit late
    let mut pending: Option<(usize, usize)> = None;
    let mut flag_position = 0;
    let mut flags = 0u8;
    let mut bit = 0u8;
    let mut hash = 0usize;

    let y = body;
    let t = y.len();
    let mut s = 0;
    while s < t {
        if bit == 0 {
            if let Some(limit) = limit {
                // room for a full group of copies
                if HEADER_LENGTH + out.len() + 17 > limit {
                    return None;
                }
            }
            flag_position = out.len();
            out.push(0);
            flags = 0;
            bit = 1;
        }

        let mut is_literal = s + 3 > t;
        let mut p = UNSET;
        if !is_literal {
            hash = (y[s] ^ y[s + 1]) as usize;
            p = table[hash];
            is_literal = p == UNSET || y[s] != y[p];
        }
        if let Some((h0, s0)) = pending.take() {
            table[h0] = s0;
        }

        if is_literal {
            pending = Some((hash, s));
            out.push(y[s]);
            s += 1;
        } else {
            table[hash] = s;
            flags |= bit;
            p += 2;
            s += 2;
            let start = s;
            let end = std::cmp::min(s + MAX_EXTRA, t);
            while s < end && y[p] == y[s] {
                s += 1;
                p += 1;
            }
            out.push(hash as u8);
            out.push((s - start) as u8);
        }
        out[flag_position] = flags;
        bit <<= 1;
    }
    log::trace!(
        "compressed {} body bytes into {} bytes",
        body.len(),
        out.len()
    );
    Some(out)
}

/// Decompresses `data`, a compressed body whose uncompressed length is in `endianness`,
/// into the message body.
/// # Errors
/// Fails with `CorruptCompressedBody` iff the declared length is shorter than a header, the
/// stream ends before the declared length is produced or a copy refers to bytes not
/// yet produced or beyond the declared length.
pub fn decompress_body(data: &[u8], endianness: Endianness) -> Result<Vec<u8>> {
    if data.len() < 4 {
        return Err(QError::corrupt(0, "missing uncompressed length"));
    }
    let total = i32::decode(&data[..4], endianness);
    if total < HEADER_LENGTH as i32 {
        return Err(QError::corrupt(
            0,
            &format!("uncompressed length {} is shorter than a header", total),
        ));
    }
    let len = total as usize - HEADER_LENGTH;
    // each input byte yields at most 2 + 255 bytes
    if len > (data.len() - 4).saturating_mul(MAX_EXTRA + 2) {
        return Err(QError::corrupt(
            0,
            &format!(
                "uncompressed length {} is not reachable from {} bytes",
                len,
                data.len()
            ),
        ));
    }
    let mut dst = vec![0u8; len];

    let mut table = [UNSET; 256];
    let mut d = 4;
    let mut s = 0;
    let mut p = 0;
    let mut flags = 0u8;
    let mut bit = 0u8;
    while s < len {
        if bit == 0 {
            flags = *data
                .get(d)
                .ok_or_else(|| QError::corrupt(d, "stream ended before the declared length"))?;
            d += 1;
            bit = 1;
        }
        if flags & bit != 0 {
            let (index, extra) = match (data.get(d), data.get(d + 1)) {
                (Some(index), Some(extra)) => (*index as usize, *extra as usize),
                _ => return Err(QError::corrupt(d, "stream ended within a copy")),
            };
            let r = table[index];
            if r == UNSET || r + 1 >= s {
                return Err(QError::corrupt(d, "copy of bytes not yet produced"));
            }
            if s + 2 + extra > len {
                return Err(QError::corrupt(d, "copy beyond the declared length"));
            }
            // byte by byte: the source may overlap the destination
            for m in 0..2 + extra {
                dst[s + m] = dst[r + m];
            }
            d += 2;
            s += 2;
            while p + 1 < s {
                table[(dst[p] ^ dst[p + 1]) as usize] = p;
                p += 1;
            }
            s += extra;
            p = s;
        } else {
            dst[s] = *data
                .get(d)
                .ok_or_else(|| QError::corrupt(d, "stream ended before the declared length"))?;
            d += 1;
            s += 1;
            while p + 1 < s {
                table[(dst[p] ^ dst[p + 1]) as usize] = p;
                p += 1;
            }
        }
        bit <<= 1;
    }
    Ok(dst)
}
