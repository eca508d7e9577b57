use super::K256;

#[inline(always)]
pub fn small_sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline(always)]
pub fn small_sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

#[inline(always)]
pub fn big_sigma0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

#[inline(always)]
pub fn big_sigma1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

#[inline(always)]
pub fn ch(e: u32, f: u32, g: u32) -> u32 {
    (e & f) ^ ((!e) & g)
}

#[inline(always)]
pub fn maj(a: u32, b: u32, c: u32) -> u32 {
    (a & b) ^ (a & c) ^ (b & c)
}

/// Expands schedule word `i` in the 16-word rolling window.
#[inline(always)]
fn schedule(w: &mut [u32; 16], i: usize) -> u32 {
    if i >= 16 {
        let next = w[(i - 16) & 15]
            .wrapping_add(small_sigma0(w[(i - 15) & 15]))
            .wrapping_add(w[(i - 7) & 15])
            .wrapping_add(small_sigma1(w[(i - 2) & 15]));
        w[i & 15] = next;
    }
    w[i & 15]
}

#[inline(always)]
fn round(v: &mut [u32; 8], wi: u32, ki: u32) {
    let [a, b, c, d, e, f, g, h] = *v;

    let t1 = h
        .wrapping_add(big_sigma1(e))
        .wrapping_add(ch(e, f, g))
        .wrapping_add(wi)
        .wrapping_add(ki);
    let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));

    *v = [t1.wrapping_add(t2), a, b, c, d.wrapping_add(t1), e, f, g];
}

/// Runs the 64 rounds over one block's message words and folds the result
/// into `state`.
#[cfg(not(feature = "speed"))]
pub fn all_rounds(state: &mut [u32; 8], mut w: [u32; 16]) {
    let mut v = *state;

    for i in 0..64 {
        let wi = schedule(&mut w, i);
        round(&mut v, wi, K256[i]);
    }

    for (s, x) in state.iter_mut().zip(v) {
        *s = s.wrapping_add(x);
    }
}

/// Unrolled variant of the 64 rounds, eight at a time.
#[cfg(feature = "speed")]
pub fn all_rounds(state: &mut [u32; 8], mut w: [u32; 16]) {
    let mut v = *state;

    macro_rules! eight_rounds {
        ($base:expr) => {
            for i in $base..$base + 8 {
                let wi = schedule(&mut w, i);
                round(&mut v, wi, K256[i]);
            }
        };
    }

    eight_rounds!(0);
    eight_rounds!(8);
    eight_rounds!(16);
    eight_rounds!(24);
    eight_rounds!(32);
    eight_rounds!(40);
    eight_rounds!(48);
    eight_rounds!(56);

    for (s, x) in state.iter_mut().zip(v) {
        *s = s.wrapping_add(x);
    }
}
