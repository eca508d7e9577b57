use hex_literal::hex;
use nebula_hash::Error;
use nebula_hash::hash::sha256::Sha256Hasher;
use nebula_hash::hash::{Hasher, sha224, sha256};
use sha2::Digest;

fn expect_sha256_eq(input: &[u8], expected: &[u8; 32]) {
    let got = sha256(input);

    assert_eq!(
        &got, expected,
        "Digest mismatch for input {:?}\nExpected {:?}\nGot      {:?}",
        input, expected, got,
    );
}

fn streamed(input: &[u8], chunk: usize) -> Vec<u8> {
    let mut hasher = Sha256Hasher::sha256();
    for piece in input.chunks(chunk.max(1)) {
        hasher.update(piece).unwrap();
    }
    hasher.finalize_vec().unwrap()
}

// -------------------------------------------------------
// 1. OFFICIAL VECTOR TESTS
// -------------------------------------------------------

#[test]
fn sha256_empty_vector() {
    expect_sha256_eq(
        &[],
        &hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"),
    );
}

#[test]
fn sha256_abc_vector() {
    expect_sha256_eq(
        b"abc",
        &hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"),
    );
}

#[test]
fn sha256_two_block_vector() {
    expect_sha256_eq(
        b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq",
        &hex!("248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1"),
    );
}

#[test]
fn sha256_million_a() {
    let buf = vec![b'a'; 1_000_000];
    expect_sha256_eq(
        &buf,
        &hex!("cdc76e5c9914fb9281a1c7e284d73e67f1809a48a497200e046d39ccc7112cd0"),
    );
}

#[test]
fn sha224_vectors() {
    assert_eq!(
        sha224(b""),
        hex!("d14a028c2a3a2bc9476102bb288234c415a2b01f828ea62ac5b3e42f")
    );
    assert_eq!(
        sha224(b"abc"),
        hex!("23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7")
    );
}

// -------------------------------------------------------
// 2. PADDING BOUNDARIES (55, 56, 63, 64, 65 BYTES)
// -------------------------------------------------------

#[test]
fn sha256_matches_reference_around_padding_boundaries() {
    for len in [0usize, 1, 54, 55, 56, 57, 63, 64, 65, 119, 120, 127, 128, 129] {
        let buf: Vec<u8> = (0..len).map(|i| (i * 7) as u8).collect();
        let expected = sha2::Sha256::digest(&buf);
        assert_eq!(sha256(&buf)[..], expected[..], "length {len}");

        let expected = sha2::Sha224::digest(&buf);
        assert_eq!(sha224(&buf)[..], expected[..], "length {len}");
    }
}

#[test]
fn sha256_incremental_lengths() {
    let mut buf = Vec::with_capacity(300);
    for i in 0..300 {
        buf.push(i as u8);
        assert_eq!(sha256(&buf)[..], sha2::Sha256::digest(&buf)[..]);
    }
}

// -------------------------------------------------------
// 3. STREAMING
// -------------------------------------------------------

#[test]
fn sha256_streaming_matches_oneshot() {
    let buf: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();
    let expected = sha256(&buf);

    for chunk in [1, 3, 63, 64, 65, 127, 128, 1000] {
        assert_eq!(streamed(&buf, chunk), expected, "chunk size {chunk}");
    }
}

// -------------------------------------------------------
// 4. FINALIZE POLICY
// -------------------------------------------------------

#[test]
fn sha256_rejects_use_after_finalize() {
    let mut hasher = Sha256Hasher::sha256();
    hasher.update(b"abc").unwrap();
    let mut out = [0u8; 32];
    assert_eq!(hasher.finalize_into(&mut out).unwrap(), 32);

    assert_eq!(hasher.update(b"more"), Err(Error::AlreadyFinalized));
    assert_eq!(hasher.finalize_into(&mut out), Err(Error::AlreadyFinalized));

    hasher.reset();
    hasher.update(b"abc").unwrap();
    assert_eq!(hasher.finalize_vec().unwrap(), sha256(b"abc"));
}

#[test]
fn sha256_short_output_buffer_is_rejected_without_finalizing() {
    let mut hasher = Sha256Hasher::sha256();
    hasher.update(b"abc").unwrap();

    let mut short = [0u8; 16];
    assert!(matches!(
        hasher.finalize_into(&mut short),
        Err(Error::InvalidParameter(_))
    ));
    assert!(!hasher.is_finalized());
    assert_eq!(hasher.finalize_vec().unwrap(), sha256(b"abc"));
}
