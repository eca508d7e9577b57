use hex_literal::hex;
use nebula_hash::hash::keccak::{
    KeccakHasher, SHA3_SUFFIX, SHAKE_SUFFIX, keccak512, sha3_224, sha3_384, sha3_512,
};
use nebula_hash::hash::{Hasher, keccak256, sha3_256};
use sha3::Digest;

fn shake256_reference(input: &[u8], out: &mut [u8]) {
    use sha3::digest::{ExtendableOutput, Update, XofReader};

    let mut shake = sha3::Shake256::default();
    Update::update(&mut shake, input);
    shake.finalize_xof().read(out);
}

fn expect_sha3_256_eq(input: &[u8], expected: &[u8; 32]) {
    let got = sha3_256(input);

    assert_eq!(
        &got, expected,
        "Digest mismatch for input {:?}\nExpected {:?}\nGot      {:?}",
        input, expected, got,
    );
}

// -------------------------------------------------------
// 1. FIPS 202 AND KECCAK VECTORS
// -------------------------------------------------------

#[test]
fn sha3_256_empty_vector() {
    expect_sha3_256_eq(
        b"",
        &hex!("a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"),
    );
}

#[test]
fn sha3_256_abc_vector() {
    expect_sha3_256_eq(
        b"abc",
        &hex!("3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"),
    );
}

#[test]
fn sha3_512_abc_vector() {
    assert_eq!(
        sha3_512(b"abc"),
        hex!(
            "b751850b1a57168a5693cd924b6b096e08f621827444f70d884f5d0240d2712e"
            "10e116e9192af3c91a7ec57647e3934057340b4cf408d5a56592f8274eec53f0"
        )
    );
}

#[test]
fn keccak256_empty_vector() {
    assert_eq!(
        keccak256(b""),
        hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
    );
}

#[test]
fn shake128_empty_vector() {
    let mut hasher = KeccakHasher::shake128(32).unwrap();
    assert_eq!(
        hasher.finalize_vec().unwrap(),
        hex!("7f9c2ba4e88f827d616045507605853ed73b8093f6efbc88eb1a6eacfa66ef26")
    );
}

// -------------------------------------------------------
// 2. REFERENCE COMPARISON ACROSS RATES
// -------------------------------------------------------

#[test]
fn sha3_family_matches_reference_around_rate_boundaries() {
    // Rates: 144 (224), 136 (256), 104 (384), 72 (512).
    for len in [0usize, 71, 72, 73, 103, 104, 105, 135, 136, 137, 143, 144, 145, 300] {
        let buf: Vec<u8> = (0..len).map(|i| i as u8).collect();
        assert_eq!(
            sha3_224(&buf)[..],
            sha3::Sha3_224::digest(&buf)[..],
            "len {len}"
        );
        assert_eq!(
            sha3_256(&buf)[..],
            sha3::Sha3_256::digest(&buf)[..],
            "len {len}"
        );
        assert_eq!(
            sha3_384(&buf)[..],
            sha3::Sha3_384::digest(&buf)[..],
            "len {len}"
        );
        assert_eq!(
            sha3_512(&buf)[..],
            sha3::Sha3_512::digest(&buf)[..],
            "len {len}"
        );
        assert_eq!(
            keccak256(&buf)[..],
            sha3::Keccak256::digest(&buf)[..],
            "len {len}"
        );
        assert_eq!(
            keccak512(&buf)[..],
            sha3::Keccak512::digest(&buf)[..],
            "len {len}"
        );
    }
}

#[test]
fn shake256_long_output_matches_reference() {
    let input = b"nebula shake";
    let mut expected = vec![0u8; 500];
    shake256_reference(input, &mut expected);

    let mut hasher = KeccakHasher::shake256(500).unwrap();
    hasher.update(input).unwrap();
    assert_eq!(hasher.finalize_vec().unwrap(), expected);
}

// -------------------------------------------------------
// 3. XOF SEEK
// -------------------------------------------------------

#[test]
fn shake256_reader_seeks_without_restarting() {
    let input = b"seekable";
    let mut expected = vec![0u8; 700];
    shake256_reference(input, &mut expected);

    let mut hasher = KeccakHasher::shake256(32).unwrap();
    hasher.update(input).unwrap();
    let mut reader = hasher.xof_reader().unwrap();

    let mut tail = [0u8; 100];
    reader.seek(550);
    reader.read(&mut tail);
    assert_eq!(tail[..], expected[550..650]);
    assert_eq!(reader.position(), 650);

    // Backwards across several rate blocks.
    let mut head = [0u8; 140];
    reader.seek(3);
    reader.read(&mut head);
    assert_eq!(head[..], expected[3..143]);
}

// -------------------------------------------------------
// 4. FINALIZE WITH PADDING AND REPLAY
// -------------------------------------------------------

#[test]
fn finalize_padded_selects_the_domain() {
    let mut as_sha3 = KeccakHasher::keccak(256).unwrap();
    as_sha3.update(b"abc").unwrap();
    let mut out = [0u8; 32];
    as_sha3.finalize_padded(SHA3_SUFFIX, &mut out).unwrap();
    assert_eq!(out, sha3_256(b"abc"));

    let mut as_shake = KeccakHasher::keccak(256).unwrap();
    let mut shake = [0u8; 32];
    as_shake.finalize_padded(SHAKE_SUFFIX, &mut shake).unwrap();
    let mut expected = [0u8; 32];
    shake256_reference(b"", &mut expected);
    assert_eq!(shake, expected);
}

#[test]
fn finalized_sponge_replays_and_ignores_updates() {
    let mut hasher = KeccakHasher::sha3(256).unwrap();
    hasher.update(b"abc").unwrap();
    let first = hasher.finalize_vec().unwrap();

    hasher.update(b"ignored").unwrap();
    let second = hasher.finalize_vec().unwrap();

    // The suffix of a finalized sponge can no longer change.
    let mut third = [0u8; 32];
    hasher.finalize_padded(SHAKE_SUFFIX, &mut third).unwrap();

    assert_eq!(first, sha3_256(b"abc"));
    assert_eq!(first, second);
    assert_eq!(first, third);
}

#[test]
fn keccak_rejects_unknown_widths() {
    assert!(KeccakHasher::sha3(128).is_err());
    assert!(KeccakHasher::sha3(300).is_err());
    assert!(KeccakHasher::shake128(0).is_err());
}
