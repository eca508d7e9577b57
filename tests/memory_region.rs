use nebula_hash::Error;
use nebula_hash::primitives::{MemoryRegion, PAGE_SIZE, try_zeroed};

#[test]
fn growth_rounds_up_to_whole_pages() {
    let mut region: MemoryRegion<u32> = MemoryRegion::new();
    assert_eq!(region.committed_bytes(), 0);
    assert!(region.is_empty());

    region.set_memory_size(1).unwrap();
    assert_eq!(region.committed_bytes(), PAGE_SIZE);
    assert_eq!(region.len(), PAGE_SIZE / 4);

    region.set_memory_size(PAGE_SIZE + 1).unwrap();
    assert_eq!(region.committed_bytes(), 2 * PAGE_SIZE);
}

#[test]
fn growth_is_idempotent_and_monotonic() {
    let mut region: MemoryRegion<u64> = MemoryRegion::new();
    region.set_memory_size(3 * PAGE_SIZE).unwrap();
    region.as_mut_slice()[0] = 0xdead_beef;

    region.set_memory_size(3 * PAGE_SIZE).unwrap();
    region.set_memory_size(PAGE_SIZE).unwrap();
    region.set_memory_size(0).unwrap();

    assert_eq!(region.committed_bytes(), 3 * PAGE_SIZE);
    assert_eq!(region.as_slice()[0], 0xdead_beef);
}

#[test]
fn refused_growth_keeps_the_committed_size() {
    let mut region: MemoryRegion<u32> = MemoryRegion::with_limit(2 * PAGE_SIZE);
    region.set_memory_size(PAGE_SIZE).unwrap();

    assert_eq!(
        region.set_memory_size(2 * PAGE_SIZE + 1),
        Err(Error::OutOfMemory {
            requested: 2 * PAGE_SIZE + 1,
        })
    );
    assert_eq!(region.committed_bytes(), PAGE_SIZE);

    region.set_memory_size(2 * PAGE_SIZE).unwrap();
    assert_eq!(region.committed_bytes(), 2 * PAGE_SIZE);
}

#[test]
fn overflowing_requests_are_refused() {
    let mut region: MemoryRegion<u64> = MemoryRegion::new();
    assert!(matches!(
        region.set_memory_size(usize::MAX),
        Err(Error::OutOfMemory { .. })
    ));
    assert!(matches!(
        region.ensure_words(usize::MAX / 2),
        Err(Error::OutOfMemory { .. })
    ));
    assert_eq!(region.committed_bytes(), 0);
}

#[test]
fn ensure_words_counts_elements() {
    let mut region: MemoryRegion<u64> = MemoryRegion::new();
    region.ensure_words(10_000).unwrap();
    assert!(region.len() >= 10_000);
    assert_eq!(region.committed_bytes() % PAGE_SIZE, 0);
    assert_eq!(region.committed_bytes(), 2 * PAGE_SIZE);
}

#[test]
fn chunks_address_consecutive_runs() {
    let mut region: MemoryRegion<u32> = MemoryRegion::new();
    region.ensure_words(64).unwrap();
    region.chunk_mut(2, 16).fill(7);

    assert!(region.chunk(1, 16).iter().all(|&w| w == 0));
    assert!(region.chunk(2, 16).iter().all(|&w| w == 7));
    assert_eq!(region.as_slice()[32], 7);
    assert_eq!(region.as_slice()[31], 0);
}

#[test]
fn release_returns_to_empty() {
    let mut region: MemoryRegion<u32> = MemoryRegion::new();
    region.set_memory_size(4 * PAGE_SIZE).unwrap();
    region.release();
    assert_eq!(region.committed_bytes(), 0);

    region.set_memory_size(PAGE_SIZE).unwrap();
    assert!(region.as_slice().iter().all(|&w| w == 0));
}

#[test]
fn try_zeroed_reports_refusal_instead_of_aborting() {
    let buffer = try_zeroed::<u8>(4096).unwrap();
    assert_eq!(buffer.len(), 4096);
    assert!(buffer.iter().all(|&b| b == 0));

    assert_eq!(
        try_zeroed::<u8>(usize::MAX),
        Err(Error::OutOfMemory {
            requested: usize::MAX,
        })
    );
    assert_eq!(
        try_zeroed::<u64>(usize::MAX / 4),
        Err(Error::OutOfMemory {
            requested: usize::MAX,
        })
    );
}
