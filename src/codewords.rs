//! Data bitstream construction, block splitting and interleaving.

use crate::reed_solomon::ReedSolomonEncoder;
use crate::version::Version;

const MODE_BYTE: u32 = 0b0100;
const PAD_BYTES: [u32; 2] = [0xec, 0x11];

/// An append-only sequence of bits, packed MSB-first into bytes.
#[derive(Clone, Debug, Default)]
pub struct BitBuffer {
    data: Vec<u8>,
    length: usize,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            data: Vec::with_capacity((bits + 7) / 8),
            length: 0,
        }
    }

    /// Packs whole bytes, MSB-first.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            data: bytes.to_vec(),
            length: bytes.len() * 8,
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Appends the low `len` bits of `val`, most significant first.
    pub fn append_bits(&mut self, val: u32, len: u8) {
        assert!(len <= 31 && (val >> len) == 0);
        for i in (0..len).rev() {
            let shift: u8 = 7 - ((self.length & 7) as u8);
            let bit: u8 = ((val >> i) as u8) & 1;
            if shift == 7 {
                self.data.push(bit << shift);
            } else if let Some(last) = self.data.last_mut() {
                *last |= bit << shift;
            }
            self.length += 1;
        }
    }

    /// Returns the bit at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<bool> {
        (index < self.length).then(|| (self.data[index >> 3] >> (7 - (index & 7))) & 1 != 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.length).map(move |i| (self.data[i >> 3] >> (7 - (i & 7))) & 1 != 0)
    }

    /// The packed bytes; a trailing partial byte is zero-filled.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// One block of data codewords with its EC codewords.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub data: Vec<u8>,
    pub ec: Vec<u8>,
}

/// Builds exactly `max_data_bytes` data codewords for `payload` in byte mode.
///
/// Payloads beyond the version's capacity are cut off at the capacity, keeping the
/// header; the character count keeps its low bits only.
pub fn data_codewords(payload: &[u8], version: Version) -> Vec<u8> {
    let capacity = version.profile().max_data_bytes;
    let capacity_bits = capacity * 8;
    let count_bits = version.char_count_bits();
    let count_mask = (1usize << count_bits) - 1;

    let mut bb = BitBuffer::with_capacity(capacity_bits.max(12 + payload.len() * 8));
    bb.append_bits(MODE_BYTE, 4);
    bb.append_bits((payload.len() & count_mask) as u32, count_bits);
    for &b in payload {
        bb.append_bits(u32::from(b), 8);
    }

    // Terminator, then pad up to a byte
    let terminator = capacity_bits.saturating_sub(bb.len()).min(4);
    bb.append_bits(0, terminator as u8);
    let filler = bb.len().wrapping_neg() & 7;
    bb.append_bits(0, filler as u8);

    for &pad in PAD_BYTES.iter().cycle() {
        if bb.len() >= capacity_bits {
            break;
        }
        bb.append_bits(pad, 8);
    }

    let mut bytes = bb.into_bytes();
    bytes.truncate(capacity);
    bytes
}

/// Splits data codewords into the version's blocks and computes each block's EC bytes.
///
/// The last `max_data_bytes % num_blocks` blocks are one byte longer.
pub fn split_blocks(data: &[u8], version: Version) -> Vec<Block> {
    let profile = version.profile();
    let num_blocks = profile.num_blocks;
    let short_len = profile.max_data_bytes / num_blocks;
    let num_short = num_blocks - profile.max_data_bytes % num_blocks;
    let rs = ReedSolomonEncoder::new(profile.ec_bytes_per_block);

    let mut rest = data;
    let mut blocks = Vec::with_capacity(num_blocks);
    for i in 0..num_blocks {
        let len = (short_len + usize::from(i >= num_short)).min(rest.len());
        let (chunk, tail) = rest.split_at(len);
        blocks.push(Block {
            data: chunk.to_vec(),
            ec: rs.encode(chunk),
        });
        rest = tail;
    }
    blocks
}

/// Interleaves block bytes column-wise, all data bytes first, then all EC bytes.
pub fn interleave(blocks: &[Block]) -> Vec<u8> {
    let total: usize = blocks.iter().map(|b| b.data.len() + b.ec.len()).sum();
    let mut result = Vec::with_capacity(total);
    let data: Vec<&[u8]> = blocks.iter().map(|b| b.data.as_slice()).collect();
    let ec: Vec<&[u8]> = blocks.iter().map(|b| b.ec.as_slice()).collect();
    for columns in [data, ec] {
        let longest = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        for j in 0..longest {
            result.extend(columns.iter().filter_map(|c| c.get(j)));
        }
    }
    result
}

/// Runs the full assembly: data codewords, blocks with EC, interleaving.
pub fn assemble(payload: &[u8], version: Version) -> BitBuffer {
    let data = data_codewords(payload, version);
    let blocks = split_blocks(&data, version);
    BitBuffer::from_bytes(&interleave(&blocks))
}
