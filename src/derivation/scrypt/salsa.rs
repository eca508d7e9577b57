//! Salsa20/8 core and the scrypt BlockMix.

/// Salsa20/8 core applied in place (four double rounds, then the feed-forward).
pub(crate) fn salsa20_8(b: &mut [u32; 16]) {
    let mut x = *b;

    macro_rules! quarter {
        ($a:expr, $b:expr, $c:expr, $d:expr) => {
            x[$b] ^= x[$a].wrapping_add(x[$d]).rotate_left(7);
            x[$c] ^= x[$b].wrapping_add(x[$a]).rotate_left(9);
            x[$d] ^= x[$c].wrapping_add(x[$b]).rotate_left(13);
            x[$a] ^= x[$d].wrapping_add(x[$c]).rotate_left(18);
        };
    }

    for _ in 0..4 {
        // Columns.
        quarter!(0, 4, 8, 12);
        quarter!(5, 9, 13, 1);
        quarter!(10, 14, 2, 6);
        quarter!(15, 3, 7, 11);
        // Rows.
        quarter!(0, 1, 2, 3);
        quarter!(5, 6, 7, 4);
        quarter!(10, 11, 8, 9);
        quarter!(15, 12, 13, 14);
    }

    for (word, mixed) in b.iter_mut().zip(x.iter()) {
        *word = word.wrapping_add(*mixed);
    }
}

/// BlockMix_{Salsa20/8, r}: `input` and `output` are `2r` 64-byte blocks
/// as `32r` words. Even-indexed results go to the first half of `output`,
/// odd-indexed ones to the second half.
pub(crate) fn block_mix(input: &[u32], output: &mut [u32], r: usize) {
    let mut x = [0u32; 16];
    x.copy_from_slice(&input[(2 * r - 1) * 16..2 * r * 16]);

    for (i, block) in input.chunks_exact(16).enumerate() {
        x.iter_mut().zip(block).for_each(|(x, b)| *x ^= b);
        salsa20_8(&mut x);

        let slot = (i / 2) + (i % 2) * r;
        output[slot * 16..(slot + 1) * 16].copy_from_slice(&x);
    }
}
