use hex_literal::hex;
use nebula_hash::hash::ripemd160::{Ripemd160Codec, Ripemd160Hasher};
use nebula_hash::hash::{Hasher, StreamingHasher, ripemd160};
use ripemd::Digest;

fn expect_ripemd160_eq(input: &[u8], expected: &[u8; 20]) {
    let got = ripemd160(input);

    assert_eq!(
        &got, expected,
        "Digest mismatch for input {:?}\nExpected {:?}\nGot      {:?}",
        input, expected, got,
    );
}

// -------------------------------------------------------
// 1. OFFICIAL VECTOR TESTS
// -------------------------------------------------------

#[test]
fn ripemd160_empty_vector() {
    expect_ripemd160_eq(b"", &hex!("9c1185a5c5e9fc54612808977ee8f548b2258d31"));
}

#[test]
fn ripemd160_abc_vector() {
    expect_ripemd160_eq(b"abc", &hex!("8eb208f7e05d987a9b044a8e98c6b087f15a0bfc"));
}

#[test]
fn ripemd160_message_digest_vector() {
    expect_ripemd160_eq(
        b"message digest",
        &hex!("5d0689ef49d2fae572b881b123a85ffa21595f36"),
    );
}

#[test]
fn ripemd160_alphabet_vector() {
    expect_ripemd160_eq(
        b"abcdefghijklmnopqrstuvwxyz",
        &hex!("f71c27109c692c1b56bbdceb5b9d2865b3708dbc"),
    );
}

// -------------------------------------------------------
// 2. REFERENCE COMPARISON
// -------------------------------------------------------

#[test]
fn ripemd160_matches_reference_around_padding_boundaries() {
    for len in [1usize, 55, 56, 57, 63, 64, 65, 128, 1000] {
        let buf: Vec<u8> = (0..len).map(|i| (i ^ 0x3c) as u8).collect();
        let expected = ripemd::Ripemd160::digest(&buf);
        assert_eq!(ripemd160(&buf)[..], expected[..], "length {len}");
    }
}

#[test]
fn ripemd160_streaming_matches_oneshot() {
    let buf = vec![0xA5u8; 777];
    let mut hasher: Ripemd160Hasher = StreamingHasher::new(Ripemd160Codec::default());
    for piece in buf.chunks(63) {
        hasher.update(piece).unwrap();
    }
    assert_eq!(hasher.finalize_vec().unwrap(), ripemd160(&buf));
}
