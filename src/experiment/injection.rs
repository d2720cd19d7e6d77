//! Synthetic channel errors

use rand::Rng;

/// Flip single bits at random byte positions of every block
///
/// Each of the `errors_per_block` draws picks a byte of the block and sets it
/// to its pristine value with one bit inverted. Drawing the same byte twice
/// leaves one flipped bit, never a restored byte, so a block ends up with at
/// most `errors_per_block` corrupted bytes. The final block may be short.
pub fn inject_bit_errors<R: Rng + ?Sized>(
    rng: &mut R,
    buffer: &mut [u8],
    block_length: usize,
    errors_per_block: usize,
) {
    if block_length == 0 || errors_per_block == 0 {
        return;
    }

    for block in buffer.chunks_mut(block_length) {
        let pristine = block.to_vec();
        for _ in 0..errors_per_block {
            let position = rng.random_range(0..block.len());
            let bit = rng.random_range(0..8u32);
            block[position] = pristine[position] ^ (1 << bit);
        }
    }
}
