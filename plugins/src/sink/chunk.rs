//! GELF UDP framing: optional zlib compression and chunking.
use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;

pub const CHUNK_MAGIC: [u8; 2] = [0x1e, 0x0f];
pub const CHUNK_HEADER_LEN: usize = 12;
/// Collectors discard messages split into more chunks than this.
pub const MAX_CHUNKS: usize = 128;

pub fn zlib(payload: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut enc = ZlibEncoder::new(Vec::with_capacity(payload.len() / 2), Compression::default());
    enc.write_all(payload)?;
    enc.finish()
}

pub fn message_id() -> [u8; 8] {
    let uuid = uuid::Uuid::new_v4();
    let mut id = [0u8; 8];
    id.copy_from_slice(&uuid.as_bytes()[..8]);
    id
}

/// Splits `data` into datagrams carrying at most `max_chunk_size` body bytes.
///
/// Data that fits is sent as-is, without a chunk header. Returns `None` when
/// the data would need more than [`MAX_CHUNKS`] chunks.
pub fn chunk(data: &[u8], max_chunk_size: usize, id: [u8; 8]) -> Option<Vec<Vec<u8>>> {
    let max_chunk_size = max_chunk_size.max(1);
    if data.len() <= max_chunk_size {
        return Some(vec![data.to_vec()]);
    }

    let parts = data.chunks(max_chunk_size);
    let count = parts.len();
    if count > MAX_CHUNKS {
        return None;
    }

    let datagrams = parts
        .enumerate()
        .map(|(seq, body)| {
            let mut dgram = Vec::with_capacity(CHUNK_HEADER_LEN + body.len());
            dgram.extend_from_slice(&CHUNK_MAGIC);
            dgram.extend_from_slice(&id);
            dgram.push(seq as u8);
            dgram.push(count as u8);
            dgram.extend_from_slice(body);
            dgram
        })
        .collect();
    Some(datagrams)
}
