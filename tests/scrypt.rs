use hex_literal::hex;
use nebula_hash::Error;
use nebula_hash::derivation::scrypt::{Scrypt, ScryptParamError, ScryptParams, scrypt};
use nebula_hash::primitives::MemoryRegion;

// -------------------------------------------------------
// 1. RFC 7914 TEST VECTORS
// -------------------------------------------------------

#[test]
fn scrypt_rfc7914_empty_inputs() {
    let params = ScryptParams::new(4, 1, 1, 64);
    let result = scrypt(b"", b"", &params).unwrap();
    assert_eq!(
        result,
        hex!(
            "77d6576238657b203b19ca42c18a0497f16b4844e3074ae8dfdffa3fede21442"
            "fcd0069ded0948f8326a753a0fc81f17e8d3e0fb2e0d3628cf35e20c38d18906"
        )
    );
}

#[test]
fn scrypt_rfc7914_password_nacl() {
    let params = ScryptParams::new(10, 8, 16, 64);
    let result = scrypt(b"password", b"NaCl", &params).unwrap();
    assert_eq!(
        result,
        hex!(
            "fdbabe1c9d3472007856e7190d01e9fe7c6ad7cbc8237830e77376634b373162"
            "2eaf30d92e22a3886ff109279d9830dac727afb94a83ee6d8360cbdfa2cc0640"
        )
    );
}

#[test]
fn shorter_output_is_a_prefix() {
    let long = scrypt(b"", b"", &ScryptParams::new(4, 1, 1, 64)).unwrap();
    let short = scrypt(b"", b"", &ScryptParams::new(4, 1, 1, 16)).unwrap();
    assert_eq!(short[..], long[..16]);
}

// -------------------------------------------------------
// 2. ENGINE REUSE AND MEMORY
// -------------------------------------------------------

#[test]
fn engine_reuse_is_deterministic() {
    let mut engine = Scrypt::new(ScryptParams::new(6, 2, 2, 32)).unwrap();
    assert_eq!(engine.committed_bytes(), 0);

    let first = engine.derive(b"password", b"salt").unwrap();
    let committed = engine.committed_bytes();
    let second = engine.derive(b"password", b"salt").unwrap();

    assert_eq!(first, second);
    assert_eq!(committed, 64 * 1024);
    assert_eq!(engine.committed_bytes(), committed);
}

#[test]
fn derive_into_ignores_configured_length() {
    let mut engine = Scrypt::new(ScryptParams::new(4, 1, 1, 64)).unwrap();
    let mut out = [0u8; 20];
    engine.derive_into(b"", b"", &mut out).unwrap();
    assert_eq!(out[..4], hex!("77d65762"));

    assert_eq!(
        engine.derive_into(b"", b"", &mut []),
        Err(Error::InvalidParameter("scrypt output length"))
    );
}

#[test]
fn memory_ceiling_reports_out_of_memory() {
    // N = 2^10, r = 8 needs 1 MiB of table.
    let params = ScryptParams::new(10, 8, 1, 32);
    let mut engine = Scrypt::with_memory(params, MemoryRegion::with_limit(512 * 1024)).unwrap();

    assert!(matches!(
        engine.derive(b"password", b"salt"),
        Err(Error::OutOfMemory { .. })
    ));
    assert_eq!(engine.committed_bytes(), 0);
}

#[test]
fn changes_with_each_input() {
    let params = ScryptParams::new(5, 1, 1, 32);
    let base = scrypt(b"password", b"salt", &params).unwrap();

    assert_ne!(base, scrypt(b"Password", b"salt", &params).unwrap());
    assert_ne!(base, scrypt(b"password", b"Salt", &params).unwrap());
    assert_ne!(
        base,
        scrypt(b"password", b"salt", &ScryptParams::new(6, 1, 1, 32)).unwrap()
    );
    assert_ne!(
        base,
        scrypt(b"password", b"salt", &ScryptParams::new(5, 2, 1, 32)).unwrap()
    );
    assert_ne!(
        base,
        scrypt(b"password", b"salt", &ScryptParams::new(5, 1, 2, 32)).unwrap()
    );
}

// -------------------------------------------------------
// 3. PARAMETER VALIDATION
// -------------------------------------------------------

#[test]
fn invalid_parameters_are_rejected() {
    let cases = [
        (ScryptParams::new(0, 1, 1, 32), ScryptParamError::CostNotPowerOfTwo),
        (
            ScryptParams {
                cost: 24,
                ..ScryptParams::default()
            },
            ScryptParamError::CostNotPowerOfTwo,
        ),
        (ScryptParams::new(16, 1, 1, 32), ScryptParamError::CostTooLarge),
        (ScryptParams::new(4, 0, 1, 32), ScryptParamError::BlockSizeZero),
        (ScryptParams::new(4, 1, 0, 32), ScryptParamError::ParallelismZero),
        (
            ScryptParams::new(4, 1 << 15, 1 << 15, 32),
            ScryptParamError::ParallelismTooLarge,
        ),
        (ScryptParams::new(4, 1, 1, 0), ScryptParamError::OutputLengthZero),
    ];

    for (params, expected) in cases {
        assert_eq!(params.validate(), Err(expected), "{params:?}");
        assert!(matches!(Scrypt::new(params), Err(Error::InvalidParameter(_))));
    }
}

#[test]
fn default_params_are_valid() {
    let params = ScryptParams::default();
    assert_eq!(params.validate(), Ok(()));
    assert_eq!(params.cost, 1 << 14);
    assert_eq!(params.block_bytes(), 1024);
    assert_eq!(params.scratch_bytes(), Some(16 * 1024 * 1024));
}
