use hex_literal::hex;
use nebula_hash::Error;
use nebula_hash::derivation::argon2::{
    Argon2, Argon2ParamError, Argon2Params, Argon2Variant, Schedule, argon2, argon2d, argon2i,
    argon2id,
};
use nebula_hash::primitives::MemoryRegion;

/// RFC 9106 §5 inputs shared by the three variants.
fn rfc9106_params(variant: Argon2Variant) -> Argon2Params {
    Argon2Params {
        mem_kib: 32,
        lanes: 4,
        time: 3,
        tag_len: 32,
        variant,
        secret: Some(vec![0x03u8; 8]),
        associated_data: Some(vec![0x04u8; 12]),
    }
}

const RFC_PASSWORD: [u8; 32] = [0x01; 32];
const RFC_SALT: [u8; 16] = [0x02; 16];

fn small_params(mem_kib: u32, lanes: u32, time: u32, tag_len: usize) -> Argon2Params {
    Argon2Params {
        mem_kib,
        lanes,
        time,
        tag_len,
        variant: Argon2Variant::Argon2id,
        secret: None,
        associated_data: None,
    }
}

// -------------------------------------------------------
// 1. RFC 9106 TEST VECTORS
// -------------------------------------------------------

#[test]
fn argon2d_rfc9106_test_vector() {
    let params = rfc9106_params(Argon2Variant::Argon2d);
    let result = argon2d(&RFC_PASSWORD, &RFC_SALT, &params).unwrap();
    assert_eq!(
        result,
        hex!("512b391b6f1162975371d30919734294f868e3be3984f3c1a13a4db9fabe4acb"),
        "Argon2d output does not match RFC 9106 test vector"
    );
}

#[test]
fn argon2i_rfc9106_test_vector() {
    let params = rfc9106_params(Argon2Variant::Argon2i);
    let result = argon2i(&RFC_PASSWORD, &RFC_SALT, &params).unwrap();
    assert_eq!(
        result,
        hex!("c814d9d1dc7f37aa13f0d77f2494bda1c8de6b016dd388d29952a4c4672b6ce8"),
        "Argon2i output does not match RFC 9106 test vector"
    );
}

#[test]
fn argon2id_rfc9106_test_vector() {
    let params = rfc9106_params(Argon2Variant::Argon2id);
    let result = argon2id(&RFC_PASSWORD, &RFC_SALT, &params).unwrap();
    assert_eq!(
        result,
        hex!("0d640df58d78766c08c037a34a8b53c9d01ef0452d75b65eb52520e96b01e659"),
        "Argon2id output does not match RFC 9106 test vector"
    );
}

#[test]
fn variant_helpers_override_params_variant() {
    let params = rfc9106_params(Argon2Variant::Argon2i);
    let with_d = rfc9106_params(Argon2Variant::Argon2d);
    assert_eq!(
        argon2d(&RFC_PASSWORD, &RFC_SALT, &params).unwrap(),
        argon2(&RFC_PASSWORD, &RFC_SALT, &with_d).unwrap()
    );
}

// -------------------------------------------------------
// 2. SLICE BARRIER
// -------------------------------------------------------

#[test]
fn interleaved_segments_change_the_output() {
    let params = rfc9106_params(Argon2Variant::Argon2id);
    let mut engine = Argon2::new(params).unwrap();

    let ordered = engine
        .hash_with_schedule(&RFC_PASSWORD, &RFC_SALT, Schedule::SliceBarrier)
        .unwrap();
    let interleaved = engine
        .hash_with_schedule(&RFC_PASSWORD, &RFC_SALT, Schedule::LaneMajor)
        .unwrap();

    assert_eq!(
        ordered,
        hex!("0d640df58d78766c08c037a34a8b53c9d01ef0452d75b65eb52520e96b01e659")
    );
    assert_ne!(ordered, interleaved);
}

#[test]
fn single_lane_has_no_barrier_to_break() {
    let mut engine = Argon2::new(small_params(64, 1, 2, 32)).unwrap();
    let ordered = engine
        .hash_with_schedule(b"password", b"saltsalt", Schedule::SliceBarrier)
        .unwrap();
    let lane_major = engine
        .hash_with_schedule(b"password", b"saltsalt", Schedule::LaneMajor)
        .unwrap();
    assert_eq!(ordered, lane_major);
}

// -------------------------------------------------------
// 3. DETERMINISM AND INPUT SENSITIVITY
// -------------------------------------------------------

#[test]
fn argon2id_is_deterministic() {
    let params = small_params(32, 4, 3, 32);
    let a = argon2id(b"password", b"saltsalt", &params).unwrap();
    let b = argon2id(b"password", b"saltsalt", &params).unwrap();
    assert_eq!(a, b);
}

#[test]
fn engine_reuse_is_deterministic() {
    let mut engine = Argon2::new(small_params(256, 2, 2, 32)).unwrap();
    let first = engine.hash(b"password", b"saltsalt").unwrap();
    let committed = engine.committed_bytes();
    let second = engine.hash(b"password", b"saltsalt").unwrap();

    assert_eq!(first, second);
    assert_eq!(engine.committed_bytes(), committed);
    assert!(committed >= 256 * 1024);
}

#[test]
fn argon2id_changes_with_salt() {
    let params = small_params(32, 4, 3, 32);
    let a = argon2id(b"password", b"saltAAAA", &params).unwrap();
    let b = argon2id(b"password", b"saltBBBB", &params).unwrap();
    assert_ne!(a, b);
}

#[test]
fn argon2id_simple_vectors() {
    let params1 = small_params(32, 1, 1, 32);
    let result1 = argon2id(b"password", b"saltsalt", &params1).unwrap();
    assert_eq!(result1.len(), 32);

    let params2 = small_params(64, 2, 2, 32);
    let result2 = argon2id(b"password", b"saltsalt", &params2).unwrap();
    assert_ne!(result1, result2);

    let result3 = argon2id(b"different", b"saltsalt", &params1).unwrap();
    assert_ne!(result1, result3);
}

#[test]
fn requested_memory_enters_h0_even_when_rounded() {
    // 33 and 32 KiB lay out the same 32 blocks for 4 lanes.
    let a = argon2id(b"password", b"saltsalt", &small_params(32, 4, 1, 32)).unwrap();
    let b = argon2id(b"password", b"saltsalt", &small_params(33, 4, 1, 32)).unwrap();
    assert_ne!(a, b);
    assert_eq!(small_params(33, 4, 1, 32).memory_blocks(), 32);
}

// -------------------------------------------------------
// 4. TAG LENGTHS
// -------------------------------------------------------

#[test]
fn argon2id_minimum_params() {
    let result = argon2id(b"pass", b"saltsalt", &small_params(8, 1, 1, 4)).unwrap();
    assert_eq!(result.len(), 4);
}

#[test]
fn argon2id_various_tag_lengths() {
    for tag_len in [4usize, 16, 32, 64, 65, 128, 1000] {
        let out = argon2id(b"password", b"saltsalt", &small_params(32, 1, 1, tag_len)).unwrap();
        assert_eq!(out.len(), tag_len);
    }
}

// -------------------------------------------------------
// 5. PARAMETER VALIDATION
// -------------------------------------------------------

#[test]
fn invalid_parameters_are_rejected_before_any_work() {
    assert_eq!(
        small_params(32, 0, 1, 32).validate(),
        Err(Argon2ParamError::TooFewLanes)
    );
    assert_eq!(
        small_params(32, 1 << 24, 1, 32).validate(),
        Err(Argon2ParamError::TooManyLanes)
    );
    assert_eq!(
        small_params(32, 1, 0, 32).validate(),
        Err(Argon2ParamError::TooFewPasses)
    );
    assert_eq!(
        small_params(31, 4, 1, 32).validate(),
        Err(Argon2ParamError::MemoryTooSmall)
    );
    assert_eq!(
        small_params(32, 1, 1, 3).validate(),
        Err(Argon2ParamError::TagLengthInvalid)
    );

    assert!(matches!(
        Argon2::new(small_params(32, 1, 0, 32)),
        Err(Error::InvalidParameter(_))
    ));
}

#[test]
fn short_salt_is_rejected() {
    assert!(matches!(
        argon2id(b"password", b"short", &small_params(32, 1, 1, 32)),
        Err(Error::InvalidParameter("argon2 salt"))
    ));
}

#[test]
fn variant_type_codes_round_trip() {
    for variant in [
        Argon2Variant::Argon2d,
        Argon2Variant::Argon2i,
        Argon2Variant::Argon2id,
    ] {
        let code: u32 = variant.into();
        assert_eq!(Argon2Variant::try_from(code), Ok(variant));
    }
    assert!(Argon2Variant::try_from(3).is_err());
}

// -------------------------------------------------------
// 6. MEMORY
// -------------------------------------------------------

#[test]
fn memory_ceiling_reports_out_of_memory() {
    let region = MemoryRegion::with_limit(64 * 1024);
    let mut engine = Argon2::with_memory(small_params(128, 1, 1, 32), region).unwrap();

    assert!(matches!(
        engine.hash(b"password", b"saltsalt"),
        Err(Error::OutOfMemory { .. })
    ));
    assert_eq!(engine.committed_bytes(), 0);

    let region = MemoryRegion::with_limit(128 * 1024);
    let mut engine = Argon2::with_memory(small_params(128, 1, 1, 32), region).unwrap();
    assert_eq!(
        engine.hash(b"password", b"saltsalt").unwrap(),
        argon2id(b"password", b"saltsalt", &small_params(128, 1, 1, 32)).unwrap()
    );
}

#[test]
fn set_memory_size_grows_ahead_of_time() {
    let mut engine = Argon2::new(small_params(64, 1, 1, 32)).unwrap();
    assert_eq!(engine.committed_bytes(), 0);

    engine.set_memory_size(100 * 1024).unwrap();
    assert_eq!(engine.committed_bytes(), 128 * 1024);

    let tag = engine.hash(b"password", b"saltsalt").unwrap();
    assert_eq!(engine.committed_bytes(), 128 * 1024);
    assert_eq!(
        tag,
        argon2id(b"password", b"saltsalt", &small_params(64, 1, 1, 32)).unwrap()
    );
}

/// Recommended OWASP parameters (19 MiB, 2 passes).
#[test]
fn argon2id_recommended_params() {
    let params = Argon2Params {
        mem_kib: 19456,
        time: 2,
        ..Argon2Params::default()
    };

    let result = argon2id(b"my_secure_password", b"random_salt_16_b", &params).unwrap();
    assert_eq!(result.len(), 32);
}
