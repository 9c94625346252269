//! Byte-level heap accounting for benchmark runs.
//!
//! [`TrackingAllocator`] forwards to the system allocator and keeps a running
//! total of live bytes plus its high-water mark. A binary opts in with
//!
//! ```rust,ignore
//! #[global_allocator]
//! static GLOBAL: heap_sssp::benchmark::TrackingAllocator = heap_sssp::benchmark::TrackingAllocator;
//! ```
//!
//! The counters are process-wide: a window measured while other threads
//! allocate includes their bytes as well.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

static LIVE: AtomicUsize = AtomicUsize::new(0);
static PEAK: AtomicUsize = AtomicUsize::new(0);
static ACTIVE: AtomicBool = AtomicBool::new(false);

/// System allocator wrapper that counts live and peak bytes
pub struct TrackingAllocator;

fn grow(bytes: usize) {
    if !ACTIVE.load(Ordering::Relaxed) {
        ACTIVE.store(true, Ordering::Relaxed);
    }
    let live = LIVE.fetch_add(bytes, Ordering::Relaxed) + bytes;
    PEAK.fetch_max(live, Ordering::Relaxed);
}

fn shrink(bytes: usize) {
    LIVE.fetch_sub(bytes, Ordering::Relaxed);
}

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            grow(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc_zeroed(layout);
        if !ptr.is_null() {
            grow(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        shrink(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = System.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            if new_size >= layout.size() {
                grow(new_size - layout.size());
            } else {
                shrink(layout.size() - new_size);
            }
        }
        new_ptr
    }
}

/// True once a [`TrackingAllocator`] has served an allocation in this process
pub fn is_tracking() -> bool {
    ACTIVE.load(Ordering::Relaxed)
}

/// Bytes currently allocated through the tracking allocator
pub fn live_bytes() -> usize {
    LIVE.load(Ordering::Relaxed)
}

/// Runs `f` and returns how far the live byte count rose above its starting
/// value while `f` ran, or `None` when no tracking allocator is installed
pub fn measure_peak<T>(f: impl FnOnce() -> T) -> (T, Option<usize>) {
    if !is_tracking() {
        return (f(), None);
    }
    let baseline = LIVE.load(Ordering::Relaxed);
    PEAK.store(baseline, Ordering::Relaxed);
    let value = f();
    let peak = PEAK.load(Ordering::Relaxed).saturating_sub(baseline);
    (value, Some(peak))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untracked_process_reports_nothing() {
        // The unit test binary uses the system allocator directly.
        let (len, peak) = measure_peak(|| vec![0u8; 4096].len());
        assert_eq!(len, 4096);
        assert_eq!(peak, None);
        assert!(!is_tracking());
    }
}
