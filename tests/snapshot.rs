use nebula_hash::Error;
use nebula_hash::checksum::{Adler32, Crc32, Xxh3_128};
use nebula_hash::hash::blake2::{Blake2Params, Blake2bHasher, Blake2sHasher};
use nebula_hash::hash::blake3::Blake3Hasher;
use nebula_hash::hash::keccak::KeccakHasher;
use nebula_hash::hash::ripemd160::{Ripemd160Codec, Ripemd160Hasher};
use nebula_hash::hash::sha256::Sha256Hasher;
use nebula_hash::hash::sha512::Sha512Hasher;
use nebula_hash::hash::sm3::{Sm3Codec, Sm3Hasher};
use nebula_hash::hash::{Hasher, StateSnapshot, StreamingHasher};

fn message(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 131 + 7) as u8).collect()
}

fn rejected<H: StateSnapshot>(bytes: &[u8]) -> bool {
    matches!(H::restore(bytes), Err(Error::MalformedState))
}

/// Hashes `data` in one go, then again with a snapshot/restore at every
/// split point, and expects identical digests.
fn expect_resume_eq<H, F>(name: &str, make: F, data: &[u8], splits: &[usize])
where
    H: Hasher + StateSnapshot,
    F: Fn() -> H,
{
    let mut whole = make();
    whole.update(data).unwrap();
    let expected = whole.finalize_vec().unwrap();

    for &split in splits {
        let mut first = make();
        first.update(&data[..split]).unwrap();
        let bytes = first.snapshot();

        let mut resumed = H::restore(&bytes).unwrap();
        assert_eq!(resumed.snapshot(), bytes, "{name}: re-snapshot at {split}");
        resumed.update(&data[split..]).unwrap();
        assert_eq!(
            resumed.finalize_vec().unwrap(),
            expected,
            "{name}: resumed at {split}"
        );
    }
}

const SPLITS: [usize; 10] = [0, 1, 63, 64, 65, 127, 128, 136, 1024, 2049];

// -------------------------------------------------------
// 1. RESUME MATCHES UNINTERRUPTED HASHING
// -------------------------------------------------------

#[test]
fn md_family_resumes() {
    let data = message(3000);
    expect_resume_eq("sha224", Sha256Hasher::sha224, &data, &SPLITS);
    expect_resume_eq("sha256", Sha256Hasher::sha256, &data, &SPLITS);
    expect_resume_eq("sha384", Sha512Hasher::sha384, &data, &SPLITS);
    expect_resume_eq("sha512", Sha512Hasher::sha512, &data, &SPLITS);
    expect_resume_eq(
        "ripemd160",
        || -> Ripemd160Hasher { StreamingHasher::new(Ripemd160Codec::default()) },
        &data,
        &SPLITS,
    );
    expect_resume_eq(
        "sm3",
        || -> Sm3Hasher { StreamingHasher::new(Sm3Codec::default()) },
        &data,
        &SPLITS,
    );
}

#[test]
fn keccak_family_resumes() {
    let data = message(3000);
    expect_resume_eq(
        "sha3-256",
        || KeccakHasher::sha3(256).unwrap(),
        &data,
        &SPLITS,
    );
    expect_resume_eq(
        "keccak-512",
        || KeccakHasher::keccak(512).unwrap(),
        &data,
        &SPLITS,
    );
    expect_resume_eq(
        "shake128",
        || KeccakHasher::shake128(200).unwrap(),
        &data,
        &SPLITS,
    );
}

#[test]
fn blake2_resumes_across_lazy_boundaries() {
    let data = message(3000);
    expect_resume_eq(
        "blake2b",
        || Blake2bHasher::blake2b(&Blake2Params::new(64)).unwrap(),
        &data,
        &SPLITS,
    );
    expect_resume_eq(
        "blake2b keyed",
        || Blake2bHasher::blake2b(&Blake2Params::keyed(32, b"snapshot key")).unwrap(),
        &data,
        &SPLITS,
    );
    expect_resume_eq(
        "blake2s",
        || Blake2sHasher::blake2s(&Blake2Params::new(32)).unwrap(),
        &data,
        &SPLITS,
    );
}

#[test]
fn blake3_resumes_mid_tree() {
    let data = message(9 * 1024 + 5);
    let splits = [0, 1, 64, 1023, 1024, 1025, 2048, 3072, 4096, 8193];
    expect_resume_eq("blake3", Blake3Hasher::new, &data, &splits);
    expect_resume_eq(
        "blake3 keyed",
        || Blake3Hasher::new_keyed(&[0x42; 32]),
        &data,
        &splits,
    );
    expect_resume_eq(
        "blake3 xof",
        || Blake3Hasher::new().with_output_len(100).unwrap(),
        &data,
        &splits,
    );
}

#[test]
fn checksums_resume() {
    let data = message(3000);
    let splits = [0, 1, 15, 16, 31, 32, 240, 241, 1024];
    expect_resume_eq("adler32", Adler32::new, &data, &splits);
    expect_resume_eq("crc32", Crc32::ieee, &data, &splits);
    expect_resume_eq("xxh3-128", || Xxh3_128::new(9), &data, &splits);
}

// -------------------------------------------------------
// 2. FINALIZED STATE SURVIVES A ROUND TRIP
// -------------------------------------------------------

#[test]
fn finalized_flag_is_restored() {
    let mut sha = Sha256Hasher::sha256();
    sha.update(b"abc").unwrap();
    sha.finalize_vec().unwrap();

    let mut restored = Sha256Hasher::restore(&sha.snapshot()).unwrap();
    assert!(restored.is_finalized());
    assert_eq!(restored.update(b"more"), Err(Error::AlreadyFinalized));

    let mut blake = Blake2bHasher::blake2b(&Blake2Params::new(32)).unwrap();
    blake.update(b"abc").unwrap();
    let digest = blake.finalize_vec().unwrap();

    let mut restored = Blake2bHasher::restore(&blake.snapshot()).unwrap();
    assert_eq!(restored.finalize_vec().unwrap(), digest);
}

// -------------------------------------------------------
// 3. MALFORMED SNAPSHOTS
// -------------------------------------------------------

#[test]
fn snapshots_only_restore_into_their_algorithm() {
    let mut sha = Sha256Hasher::sha256();
    sha.update(b"cross algorithm").unwrap();
    let bytes = sha.snapshot();

    assert!(rejected::<Sha512Hasher>(&bytes));
    assert!(rejected::<Sm3Hasher>(&bytes));
    assert!(rejected::<Blake3Hasher>(&bytes));
    assert!(rejected::<Crc32>(&bytes));
}

#[test]
fn damaged_snapshots_are_rejected() {
    let mut blake = Blake3Hasher::new();
    blake.update(&message(2500)).unwrap();
    let bytes = blake.snapshot();

    // Truncated anywhere.
    for len in [0, 1, 3, 4, bytes.len() / 2, bytes.len() - 1] {
        assert!(
            rejected::<Blake3Hasher>(&bytes[..len]),
            "truncated to {len}"
        );
    }

    // Trailing data.
    let mut longer = bytes.clone();
    longer.push(0);
    assert!(rejected::<Blake3Hasher>(&longer));

    // Wrong magic and wrong format version.
    let mut bad_magic = bytes.clone();
    bad_magic[0] ^= 0xff;
    assert!(rejected::<Blake3Hasher>(&bad_magic));

    let mut bad_version = bytes.clone();
    bad_version[2] = bad_version[2].wrapping_add(1);
    assert!(rejected::<Blake3Hasher>(&bad_version));
}

#[test]
fn invalid_finalized_flag_is_rejected() {
    let sha = Sha256Hasher::sha256();
    let mut bytes = sha.snapshot();
    let last = bytes.len() - 1;
    bytes[last] = 2;
    assert!(rejected::<Sha256Hasher>(&bytes));
}

#[cfg(target_pointer_width = "64")]
#[test]
fn xof_lengths_beyond_u32_are_restored() {
    let len = (1usize << 33) + 5;

    let mut blake3 = Blake3Hasher::new().with_output_len(len).unwrap();
    blake3.update(b"abc").unwrap();
    let restored = Blake3Hasher::restore(&blake3.snapshot()).unwrap();
    assert_eq!(restored.output_len(), len);

    let mut shake = KeccakHasher::shake256(len).unwrap();
    shake.update(b"abc").unwrap();
    let restored = KeccakHasher::restore(&shake.snapshot()).unwrap();
    assert_eq!(restored.output_len(), len);

    // Digests of a shorter stream still agree after the round trip.
    let mut short = KeccakHasher::shake256(64).unwrap();
    short.update(b"abc").unwrap();
    let mut resumed = KeccakHasher::restore(&short.snapshot()).unwrap();
    assert_eq!(
        resumed.finalize_vec().unwrap(),
        short.finalize_vec().unwrap()
    );
}
