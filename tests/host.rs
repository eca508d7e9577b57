use hex_literal::hex;
use nebula_hash::Error;
use nebula_hash::checksum::xxh3_64;
use nebula_hash::derivation::argon2::{Argon2Params, argon2id};
use nebula_hash::derivation::scrypt::{ScryptParams, scrypt};
use nebula_hash::hash::blake2::{Blake2Params, Blake2bHasher};
use nebula_hash::hash::blake3::{blake3, blake3_keyed, blake3_xof};
use nebula_hash::hash::keccak::{keccak256, sha3_256};
use nebula_hash::hash::{Hasher, sha256, sha512};
use nebula_hash::host::{Algorithm, HashHost, INITIAL_SCRATCH, MemoryHardHost, STAGING_LEN};

/// Stages `data`, absorbs it and finalizes with `final_param`.
fn digest(host: &mut HashHost, data: &[u8], final_param: u32) -> Vec<u8> {
    host.write(data).unwrap();
    host.update(data.len()).unwrap();
    let len = host.finalize(final_param).unwrap();
    host.output(len).to_vec()
}

// -------------------------------------------------------
// 1. HASH SESSIONS
// -------------------------------------------------------

#[test]
fn crc32_through_the_staging_buffer() {
    let mut host = HashHost::new(Algorithm::Crc32).unwrap();
    host.write(b"123456789").unwrap();
    let len = host.calculate(9, 0xEDB8_8320, 0).unwrap();
    assert_eq!(host.output(len), 0xCBF4_3926u32.to_be_bytes());
}

#[test]
fn legacy_hashes_and_xxh3_64_through_the_staging_buffer() {
    let mut host = HashHost::new(Algorithm::Md5).unwrap();
    assert_eq!(
        digest(&mut host, b"abc", 0),
        hex!("900150983cd24fb0d6963f7d28e17f72")
    );

    let mut host = HashHost::new(Algorithm::Sha1).unwrap();
    assert_eq!(
        digest(&mut host, b"abc", 0),
        hex!("a9993e364706816aba3e25717850c26c9cd0d89d")
    );

    let mut host = HashHost::new(Algorithm::Md4).unwrap();
    assert_eq!(
        digest(&mut host, b"abc", 0),
        hex!("a448017aaf21d8525fc10ae87aa6729d")
    );

    let mut host = HashHost::new(Algorithm::Xxh3_64).unwrap();
    host.write(b"abc").unwrap();
    let len = host.calculate(3, 7, 0).unwrap();
    assert_eq!(host.output(len), xxh3_64(b"abc", 7).to_be_bytes());
}

#[test]
fn sha2_widths_come_from_the_init_word() {
    let mut host = HashHost::new(Algorithm::Sha256).unwrap();
    assert_eq!(host.init_param(), 256);
    assert_eq!(
        digest(&mut host, b"abc", 0),
        hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
    );

    host.init(224).unwrap();
    assert_eq!(
        digest(&mut host, b"abc", 0),
        hex!("23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7")
    );

    let mut host = HashHost::new(Algorithm::Sha512).unwrap();
    assert_eq!(digest(&mut host, b"abc", 0), sha512(b"abc"));
}

#[test]
fn keccak_suffix_is_chosen_at_finalization() {
    let mut host = HashHost::new(Algorithm::Keccak).unwrap();

    host.init(256).unwrap();
    assert_eq!(digest(&mut host, b"abc", 0x06), sha3_256(b"abc"));

    host.init(256).unwrap();
    assert_eq!(digest(&mut host, b"abc", 0), keccak256(b"abc"));

    host.init(256).unwrap();
    host.write(b"abc").unwrap();
    host.update(3).unwrap();
    assert!(matches!(host.finalize(0x106), Err(Error::InvalidParameter(_))));
}

#[test]
fn keyed_blake2b_reads_its_key_from_staging() {
    let key = b"host staged key";
    let mut host = HashHost::new(Algorithm::Blake2b).unwrap();
    host.write(key).unwrap();
    host.init(((key.len() as u64) << 16) | 256).unwrap();

    let mut expected = Blake2bHasher::blake2b(&Blake2Params::keyed(32, key)).unwrap();
    expected.update(b"payload").unwrap();

    assert_eq!(
        digest(&mut host, b"payload", 0),
        expected.finalize_vec().unwrap()
    );
}

#[test]
fn blake3_modes() {
    let mut host = HashHost::new(Algorithm::Blake3).unwrap();
    assert_eq!(digest(&mut host, b"abc", 0), blake3(b"abc"));

    host.init(0).unwrap();
    let long = digest(&mut host, b"abc", 100);
    let mut expected = [0u8; 100];
    blake3_xof(b"abc", &mut expected);
    assert_eq!(long, expected);

    let key = [0x5a; 32];
    host.write(&key).unwrap();
    host.init(32).unwrap();
    assert_eq!(digest(&mut host, b"abc", 0), blake3_keyed(&key, b"abc"));

    assert!(matches!(host.init(16), Err(Error::InvalidParameter(_))));
}

#[test]
fn reuse_follows_the_algorithm_policy() {
    let mut host = HashHost::new(Algorithm::Sha256).unwrap();
    digest(&mut host, b"abc", 0);
    assert_eq!(host.finalize(0), Err(Error::AlreadyFinalized));

    host.init(256).unwrap();
    assert_eq!(digest(&mut host, b"abc", 0), sha256(b"abc"));
}

// -------------------------------------------------------
// 2. SESSION STATE
// -------------------------------------------------------

#[test]
fn state_moves_between_hosts() {
    let data: Vec<u8> = (0..500u32).map(|i| i as u8).collect();

    let mut first = HashHost::new(Algorithm::Sha256).unwrap();
    first.write(&data[..200]).unwrap();
    first.update(200).unwrap();
    let state = first.get_state();

    let mut second = HashHost::new(Algorithm::Sha256).unwrap();
    second.set_state(&state).unwrap();
    assert_eq!(digest(&mut second, &data[200..], 0), sha256(&data));
}

#[test]
fn foreign_state_is_rejected_and_session_kept() {
    let foreign = HashHost::new(Algorithm::Sha512).unwrap().get_state();

    let mut host = HashHost::new(Algorithm::Sha256).unwrap();
    host.write(b"ab").unwrap();
    host.update(2).unwrap();
    assert_eq!(host.set_state(&foreign), Err(Error::MalformedState));
    assert_eq!(digest(&mut host, b"c", 0), sha256(b"abc"));
}

#[test]
fn invalid_init_keeps_the_current_session() {
    let mut host = HashHost::new(Algorithm::Sha256).unwrap();
    host.write(b"ab").unwrap();
    host.update(2).unwrap();

    assert!(matches!(host.init(300), Err(Error::InvalidParameter(_))));
    assert_eq!(host.init_param(), 256);
    assert_eq!(digest(&mut host, b"c", 0), sha256(b"abc"));

    let mut crc = HashHost::new(Algorithm::Crc32).unwrap();
    assert!(matches!(crc.init(1 << 32), Err(Error::InvalidParameter(_))));
    assert!(matches!(crc.init(0x1234), Err(Error::InvalidParameter(_))));
}

#[test]
fn lengths_beyond_the_staging_buffer_are_rejected() {
    let mut host = HashHost::new(Algorithm::Adler32).unwrap();
    assert_eq!(host.buffer().len(), STAGING_LEN);
    assert!(matches!(host.update(STAGING_LEN + 1), Err(Error::InvalidParameter(_))));
    assert!(matches!(host.write(&vec![0u8; STAGING_LEN + 1]), Err(Error::InvalidParameter(_))));
    host.update(STAGING_LEN).unwrap();
}

// -------------------------------------------------------
// 3. MEMORY-HARD SESSIONS
// -------------------------------------------------------

fn stage(host: &mut MemoryHardHost, password: &[u8], salt: &[u8]) {
    let buffer = host.buffer().unwrap();
    buffer[..password.len()].copy_from_slice(password);
    buffer[password.len()..password.len() + salt.len()].copy_from_slice(salt);
}

#[test]
fn scrypt_through_the_staging_buffer() {
    let params = ScryptParams::new(4, 1, 1, 64);
    let mut host = MemoryHardHost::scrypt(params).unwrap();
    assert_eq!(host.committed_bytes(), 0);

    stage(&mut host, b"password", b"NaCl");
    assert_eq!(host.committed_bytes(), INITIAL_SCRATCH);

    let len = host.calculate(8, 4).unwrap();
    assert_eq!(len, 64);
    let key = host.buffer().unwrap()[..len].to_vec();
    assert_eq!(key, scrypt(b"password", b"NaCl", &params).unwrap());
    assert_eq!(host.committed_bytes(), INITIAL_SCRATCH);
}

#[test]
fn argon2_through_the_staging_buffer() {
    let params = Argon2Params {
        mem_kib: 64,
        time: 2,
        lanes: 2,
        ..Argon2Params::default()
    };
    let mut host = MemoryHardHost::argon2(params.clone()).unwrap();
    stage(&mut host, b"password", b"somesalt");

    let len = host.calculate(8, 8).unwrap();
    let key = host.buffer().unwrap()[..len].to_vec();
    assert_eq!(key, argon2id(b"password", b"somesalt", &params).unwrap());
}

#[test]
fn memory_hard_errors() {
    let mut host = MemoryHardHost::scrypt(ScryptParams::new(4, 1, 1, 32)).unwrap();
    assert!(matches!(host.calculate(STAGING_LEN, 1), Err(Error::InvalidParameter(_))));

    let mut host = MemoryHardHost::argon2(Argon2Params {
        mem_kib: 8,
        time: 1,
        ..Argon2Params::default()
    })
    .unwrap();
    stage(&mut host, b"pw", b"short");
    assert!(matches!(host.calculate(2, 5), Err(Error::InvalidParameter(_))));

    assert!(MemoryHardHost::scrypt(ScryptParams::new(4, 0, 1, 32)).is_err());
}
