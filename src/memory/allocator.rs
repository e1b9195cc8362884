// src/memory/allocator.rs

//! Byte allocator interface for the duplicating string operations.
//!
//! `strdup`/`strndup` only need "give me `n` bytes or fail" and "take these
//! `n` bytes back". Alignment is 1 and nothing is zeroed.

use core::alloc::Layout;
use core::ptr::NonNull;
use linked_list_allocator::Heap;
use spin::Mutex;

/// Allocator consumed by `strdup`/`strndup`.
pub trait ByteAllocator {
    /// Allocate `size` bytes, or `None` when memory is exhausted.
    fn allocate(&self, size: usize) -> Option<NonNull<u8>>;

    /// Release an allocation.
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate(size)` on this same allocator and
    /// must not be released twice.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, size: usize);
}

impl<A: ByteAllocator + ?Sized> ByteAllocator for &A {
    fn allocate(&self, size: usize) -> Option<NonNull<u8>> {
        (**self).allocate(size)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, size: usize) {
        // SAFETY: forwarded from the caller.
        unsafe { (**self).deallocate(ptr, size) }
    }
}

/// Zero-sized requests still hand out a unique block.
#[inline]
fn byte_layout(size: usize) -> Option<Layout> {
    Layout::from_size_align(size.max(1), 1).ok()
}

/// Forwards to the kernel's `#[global_allocator]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalByteAllocator;

impl ByteAllocator for GlobalByteAllocator {
    fn allocate(&self, size: usize) -> Option<NonNull<u8>> {
        let layout = byte_layout(size)?;
        // SAFETY: layout has a non-zero size.
        NonNull::new(unsafe { alloc::alloc::alloc(layout) })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, size: usize) {
        if let Some(layout) = byte_layout(size) {
            // SAFETY: the caller guarantees ptr came from allocate(size),
            // which used this exact layout.
            unsafe { alloc::alloc::dealloc(ptr.as_ptr(), layout) };
        }
    }
}

/// First-fit heap over a caller-provided region, behind a spin lock.
pub struct HeapByteAllocator {
    heap: Mutex<Heap>,
}

impl HeapByteAllocator {
    /// Allocator with no backing memory; every request fails until
    /// [`HeapByteAllocator::init`] is called.
    pub fn empty() -> Self {
        Self {
            heap: Mutex::new(Heap::empty()),
        }
    }

    /// Allocator managing `size` bytes starting at `bottom`.
    ///
    /// # Safety
    ///
    /// The region must be valid, writable, unused by anything else, and
    /// must outlive the allocator. `size` must be large enough to hold the
    /// heap's bookkeeping (a few words).
    pub unsafe fn new(bottom: *mut u8, size: usize) -> Self {
        log::trace!("byte heap at {:p}, {} bytes", bottom, size);
        Self {
            // SAFETY: forwarded from the caller.
            heap: Mutex::new(unsafe { Heap::new(bottom, size) }),
        }
    }

    /// Hand a region to an empty allocator.
    ///
    /// # Safety
    ///
    /// Same contract as [`HeapByteAllocator::new`]; must only be called
    /// once, on an allocator created with [`HeapByteAllocator::empty`].
    pub unsafe fn init(&self, bottom: *mut u8, size: usize) {
        log::trace!("byte heap at {:p}, {} bytes", bottom, size);
        // SAFETY: forwarded from the caller.
        unsafe { self.heap.lock().init(bottom, size) };
    }

    /// Bytes managed by the heap.
    pub fn size(&self) -> usize {
        self.heap.lock().size()
    }

    /// Bytes currently handed out (including allocator rounding).
    pub fn used(&self) -> usize {
        self.heap.lock().used()
    }

    pub fn free(&self) -> usize {
        self.heap.lock().free()
    }
}

impl core::fmt::Debug for HeapByteAllocator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let heap = self.heap.lock();
        f.debug_struct("HeapByteAllocator")
            .field("size", &heap.size())
            .field("used", &heap.used())
            .finish()
    }
}

impl ByteAllocator for HeapByteAllocator {
    fn allocate(&self, size: usize) -> Option<NonNull<u8>> {
        let layout = byte_layout(size)?;
        self.heap.lock().allocate_first_fit(layout).ok()
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, size: usize) {
        if let Some(layout) = byte_layout(size) {
            // SAFETY: the caller guarantees ptr came from allocate(size) on
            // this heap, which used this exact layout.
            unsafe { self.heap.lock().deallocate(ptr, layout) };
        }
    }
}
