//! Peak heap measurement.
//!
//! [`PeakAlloc`] wraps the process' global allocator and keeps live/peak byte
//! counters. A [`ProfilingScope`] resets the peak to the live bytes when it
//! begins and reports how far above that baseline the heap went when it ends.
//!
//! The counters are process-wide, so only one scope may be active at a time.
//!
//! ```ignore
//! #[global_allocator]
//! static GLOBAL: PeakAlloc<std::alloc::System> = PeakAlloc::new(std::alloc::System);
//! ```

use std::alloc::GlobalAlloc;
use std::alloc::Layout;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use crate::error::ProfilingError;

static CURRENT: AtomicUsize = AtomicUsize::new(0);
static PEAK: AtomicUsize = AtomicUsize::new(0);
static ALLOCATIONS: AtomicUsize = AtomicUsize::new(0);
static ACTIVE: AtomicBool = AtomicBool::new(false);

/// A global allocator that tracks live and peak heap bytes.
#[derive(Debug)]
pub struct PeakAlloc<A> {
    inner: A,
}

impl<A> PeakAlloc<A> {
    pub const fn new(inner: A) -> Self {
        Self { inner }
    }
}

#[inline(always)]
fn grow(bytes: usize) {
    let now = CURRENT.fetch_add(bytes, Ordering::Relaxed) + bytes;
    PEAK.fetch_max(now, Ordering::Relaxed);
}

#[inline(always)]
fn shrink(bytes: usize) {
    CURRENT.fetch_sub(bytes, Ordering::Relaxed);
}

unsafe impl<A> GlobalAlloc for PeakAlloc<A>
where
    A: GlobalAlloc,
{
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { self.inner.alloc(layout) };
        if !ptr.is_null() {
            ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
            grow(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { self.inner.alloc_zeroed(layout) };
        if !ptr.is_null() {
            ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
            grow(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { self.inner.dealloc(ptr, layout) };
        shrink(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { self.inner.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
            let old_size = layout.size();
            if new_size >= old_size {
                grow(new_size - old_size);
            } else {
                shrink(old_size - new_size);
            }
        }
        new_ptr
    }
}

/// Bytes currently allocated through [`PeakAlloc`].
#[must_use]
pub fn current_bytes() -> usize {
    CURRENT.load(Ordering::Relaxed)
}

/// Whether a [`PeakAlloc`] is serving this process' allocations.
#[must_use]
pub fn allocator_installed() -> bool {
    ALLOCATIONS.load(Ordering::Relaxed) > 0
}

/// An exclusive peak-memory measurement window.
#[derive(Debug)]
pub struct ProfilingScope {
    baseline: usize,
    ended: bool,
}

impl ProfilingScope {
    /// Starts measuring.
    ///
    /// Fails when [`PeakAlloc`] is not the global allocator or when another
    /// scope is still active.
    pub fn begin() -> Result<Self, ProfilingError> {
        if !allocator_installed() {
            return Err(ProfilingError::AllocatorNotInstalled);
        }
        ACTIVE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ProfilingError::AlreadyActive)?;

        let baseline = CURRENT.load(Ordering::Relaxed);
        PEAK.store(baseline, Ordering::Relaxed);
        log::trace!("Profiling scope began with {baseline} live bytes");
        Ok(Self {
            baseline,
            ended: false,
        })
    }

    /// Peak bytes allocated above the baseline so far.
    #[must_use]
    pub fn peak(&self) -> usize {
        PEAK.load(Ordering::Relaxed).saturating_sub(self.baseline)
    }

    /// Stops measuring and returns the peak bytes above the baseline.
    pub fn end(mut self) -> Result<usize, ProfilingError> {
        self.ended = true;
        let peak = self.peak();
        ACTIVE
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ProfilingError::NotActive)?;
        log::trace!("Profiling scope ended with a peak of {peak} bytes");
        Ok(peak)
    }
}

impl Drop for ProfilingScope {
    fn drop(&mut self) {
        if !self.ended {
            ACTIVE.store(false, Ordering::Release);
        }
    }
}
