//! Multi-block decoding on the rayon pool.
//!
//! Blocks never share model state, so each worker thread keeps one decoder
//! and resets it between blocks.

use rayon::prelude::*;

use super::decoder::Rans0Decoder;
use super::params::ModelParams;
use super::Result;

/// One compressed block and the length it decodes to.
#[derive(Debug, Clone, Copy)]
pub struct BlockRef<'a> {
    pub compressed: &'a [u8],
    pub expected_len: usize,
}

impl<'a> BlockRef<'a> {
    pub fn new(compressed: &'a [u8], expected_len: usize) -> Self {
        Self {
            compressed,
            expected_len,
        }
    }
}

/// Decode independent blocks in parallel. Results keep input order.
pub fn decode_blocks(params: &ModelParams, blocks: &[BlockRef<'_>]) -> Vec<Result<Vec<u8>>> {
    log::debug!(
        "decoding {} order-0 blocks on {} threads",
        blocks.len(),
        rayon::current_num_threads()
    );
    blocks
        .par_iter()
        .map_init(
            || Rans0Decoder::new(params.clone()),
            |decoder, block| {
                decoder.reset()?;
                decoder.decode_block(block.compressed, block.expected_len)
            },
        )
        .collect()
}
