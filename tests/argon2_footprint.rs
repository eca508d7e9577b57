//! Heap accounting for Argon2 scratch memory. Kept in its own test binary
//! because it installs a counting global allocator.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};

use nebula_hash::derivation::argon2::{Argon2, Argon2Params, argon2id};
use nebula_hash::primitives::MemoryRegion;

struct Counting;

static CURRENT: AtomicUsize = AtomicUsize::new(0);
static PEAK: AtomicUsize = AtomicUsize::new(0);

unsafe impl GlobalAlloc for Counting {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            let now = CURRENT.fetch_add(layout.size(), Ordering::SeqCst) + layout.size();
            PEAK.fetch_max(now, Ordering::SeqCst);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        CURRENT.fetch_sub(layout.size(), Ordering::SeqCst);
    }
}

#[global_allocator]
static ALLOCATOR: Counting = Counting;

#[test]
fn region_at_exact_block_size_holds_all_scratch_memory() {
    let params = Argon2Params {
        mem_kib: 4096,
        time: 2,
        lanes: 4,
        ..Argon2Params::default()
    };
    let region_bytes = params.memory_blocks() as usize * 1024;

    let mut engine =
        Argon2::with_memory(params.clone(), MemoryRegion::with_limit(region_bytes)).unwrap();
    engine.set_memory_size(region_bytes).unwrap();

    // The first run also starts the thread pool.
    let expected = engine.hash(b"password", b"somesalt").unwrap();

    let baseline = CURRENT.load(Ordering::SeqCst);
    PEAK.store(baseline, Ordering::SeqCst);
    let tag = engine.hash(b"password", b"somesalt").unwrap();
    let extra = PEAK.load(Ordering::SeqCst) - baseline;

    assert_eq!(tag, expected);
    assert_eq!(engine.committed_bytes(), region_bytes);
    // A single segment is 256 KiB here; nothing close to that may live
    // outside the region.
    assert!(
        extra < 64 * 1024,
        "{extra} bytes allocated outside a {region_bytes}-byte region"
    );

    assert_eq!(tag, argon2id(b"password", b"somesalt", &params).unwrap());
}
