use hex_literal::hex;
use nebula_hash::Error;
use nebula_hash::derivation::pbkdf2::{pbkdf2, pbkdf2_sha256, pbkdf2_sha512};
use nebula_hash::hash::Hasher;
use nebula_hash::mac::{HmacRipemd160, HmacSha3, HmacSha256, HmacSha512, hmac_sha256, hmac_sha512};
use sha3::Digest;

fn expect_hmac_sha256_eq(key: &[u8], message: &[u8], expected: &[u8; 32]) {
    let got = hmac_sha256(key, message);

    assert_eq!(
        &got, expected,
        "Tag mismatch for message {:?}\nExpected {:?}\nGot      {:?}",
        message, expected, got,
    );
}

/// Textbook HMAC-SHA3-256 built on the reference crate.
fn reference_hmac_sha3_256(key: &[u8], message: &[u8]) -> Vec<u8> {
    const RATE: usize = 136;

    let mut block = [0u8; RATE];
    if key.len() > RATE {
        block[..32].copy_from_slice(&sha3::Sha3_256::digest(key));
    } else {
        block[..key.len()].copy_from_slice(key);
    }

    let ipad: Vec<u8> = block.iter().map(|b| b ^ 0x36).collect();
    let opad: Vec<u8> = block.iter().map(|b| b ^ 0x5c).collect();

    let mut inner = sha3::Sha3_256::new();
    inner.update(&ipad);
    inner.update(message);
    let inner = inner.finalize();

    let mut outer = sha3::Sha3_256::new();
    outer.update(&opad);
    outer.update(inner);
    outer.finalize().to_vec()
}

// -------------------------------------------------------
// 1. RFC 4231 (HMAC-SHA-2)
// -------------------------------------------------------

#[test]
fn hmac_sha256_rfc4231_case_1() {
    expect_hmac_sha256_eq(
        &[0x0b; 20],
        b"Hi There",
        &hex!("b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7"),
    );
}

#[test]
fn hmac_sha256_rfc4231_case_2() {
    expect_hmac_sha256_eq(
        b"Jefe",
        b"what do ya want for nothing?",
        &hex!("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"),
    );
}

#[test]
fn hmac_sha256_rfc4231_long_key() {
    expect_hmac_sha256_eq(
        &[0xaa; 131],
        b"Test Using Larger Than Block-Size Key - Hash Key First",
        &hex!("60e431591ee0b67f0d8a26aacbf5b77f8e0bc6213728c5140546040f0ee37f54"),
    );
}

#[test]
fn hmac_sha512_rfc4231_case_1() {
    assert_eq!(
        hmac_sha512(&[0x0b; 20], b"Hi There"),
        hex!(
            "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cde"
            "daa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854"
        )
    );
}

#[test]
fn hmac_sha224_and_sha384_rfc4231_case_1() {
    let mut mac = HmacSha256::sha224(&[0x0b; 20]);
    mac.update(b"Hi There").unwrap();
    assert_eq!(
        mac.finalize_vec().unwrap(),
        hex!("896fb1128abbdf196832107cd49df33f47b4b1169912ba4f53684b22")
    );

    let mut mac = HmacSha512::sha384(&[0x0b; 20]);
    mac.update(b"Hi There").unwrap();
    assert_eq!(
        mac.finalize_vec().unwrap(),
        hex!(
            "afd03944d84895626b0825f4ab46907f15f9dadbe4101ec682aa034c7cebc59c"
            "faea9ea9076ede7f4af152e8b2fa9cb6"
        )
    );
}

// -------------------------------------------------------
// 2. OTHER HASHES
// -------------------------------------------------------

#[test]
fn hmac_ripemd160_rfc2286_case_1() {
    let mut mac = HmacRipemd160::ripemd160(&[0x0b; 20]);
    mac.update(b"Hi There").unwrap();
    assert_eq!(
        mac.finalize_vec().unwrap(),
        hex!("24cb4bd67d20fc1a5d2ed7732dcc39377f0a5668")
    );
}

#[test]
fn hmac_sha3_matches_textbook_construction() {
    for key_len in [0usize, 20, 136, 137, 200] {
        let key = vec![0x4bu8; key_len];
        let mut mac = HmacSha3::sha3(256, &key).unwrap();
        mac.update(b"sponge keyed with a padded block").unwrap();
        assert_eq!(
            mac.finalize_vec().unwrap(),
            reference_hmac_sha3_256(&key, b"sponge keyed with a padded block"),
            "key length {key_len}"
        );
    }

    assert!(HmacSha3::sha3(128, b"key").is_err());
}

// -------------------------------------------------------
// 3. STREAMING AND RESET
// -------------------------------------------------------

#[test]
fn hmac_streaming_and_reset() {
    let mut mac = HmacSha256::sha256(b"key");
    mac.update(b"The quick brown fox ").unwrap();
    mac.update(b"jumps over the lazy dog").unwrap();
    let tag = mac.finalize_vec().unwrap();
    assert_eq!(
        tag,
        hex!("f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8")
    );

    assert_eq!(mac.update(b"x"), Err(Error::AlreadyFinalized));

    mac.reset();
    mac.update(b"The quick brown fox jumps over the lazy dog").unwrap();
    assert_eq!(mac.finalize_vec().unwrap(), tag);
}

// -------------------------------------------------------
// 4. PBKDF2
// -------------------------------------------------------

#[test]
fn pbkdf2_sha256_known_vectors() {
    let mut out = [0u8; 32];

    pbkdf2_sha256(b"password", b"salt", 1, &mut out).unwrap();
    assert_eq!(
        out,
        hex!("120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b")
    );

    pbkdf2_sha256(b"password", b"salt", 2, &mut out).unwrap();
    assert_eq!(
        out,
        hex!("ae4d0c95af6b46d32d0adff928f06dd02a303f8ef3c251dfd6e2d85a95474c43")
    );

    pbkdf2_sha256(b"password", b"salt", 4096, &mut out).unwrap();
    assert_eq!(
        out,
        hex!("c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a")
    );
}

#[test]
fn pbkdf2_sha256_multi_block_output() {
    // RFC 7914 §11.
    let mut out = [0u8; 64];
    pbkdf2_sha256(b"passwd", b"salt", 1, &mut out).unwrap();
    assert_eq!(
        out,
        hex!(
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc"
            "49ca9cccf179b645991664b39d77ef317c71b845b1e30bd509112041d3a19783"
        )
    );
}

#[test]
fn pbkdf2_sha512_known_vector() {
    let mut out = [0u8; 64];
    pbkdf2_sha512(b"password", b"salt", 1, &mut out).unwrap();
    assert_eq!(
        out,
        hex!(
            "867f70cf1ade02cff3752599a3a53dc4af34c7a669815ae5d513554e1c8cf252"
            "c02d470a285a0501bad999bfe943c08f050235d7d68b1da55e63f73b60a57fce"
        )
    );
}

#[test]
fn pbkdf2_truncated_output_is_a_prefix() {
    let mut long = [0u8; 50];
    let mut short = [0u8; 7];
    let mac = HmacSha256::sha256(b"pw");
    pbkdf2(&mac, b"salt", 3, &mut long).unwrap();
    pbkdf2(&mac, b"salt", 3, &mut short).unwrap();
    assert_eq!(short[..], long[..7]);
}

#[test]
fn pbkdf2_rejects_invalid_parameters() {
    let mut out = [0u8; 16];
    assert!(matches!(
        pbkdf2_sha256(b"pw", b"salt", 0, &mut out),
        Err(Error::InvalidParameter(_))
    ));
    assert!(matches!(
        pbkdf2_sha256(b"pw", b"salt", 1, &mut []),
        Err(Error::InvalidParameter(_))
    ));
}
