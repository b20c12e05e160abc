//! Physical memory management.

pub mod alloc;
pub mod page;
pub mod rangeset;

pub use self::alloc::buddy::BuddyAllocator;
pub use page::{FrameArena, Pfn, PAGE_BITS, PAGE_SIZE};
pub use rangeset::{Range, RangeSet};

use crate::unit;
use rangeset::Error as RangeSetError;

/// Errors that can happen while handing physical memory to the allocator.
#[derive(Debug)]
pub enum Error {
    /// Forwarded from the underlying [`RangeSet`] operation.
    RangeSet(RangeSetError),
    /// memory region lies outside the managed frame arena
    OutsideArena,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::RangeSet(e) => write!(f, "{}", e),
            Error::OutsideArena => f.write_str("memory region lies outside the managed frame arena"),
        }
    }
}

/// Hand the machine's free memory to the page allocator.
///
/// `available` holds the byte extents the platform reported as RAM and
/// `blocked` the extents that must never be allocated (the kernel image,
/// firmware, the boot stacks). Every remaining extent is trimmed to whole
/// pages and registered with the allocator.
///
/// Returns the number of pages that were made available.
pub fn populate(
    allocator: &mut BuddyAllocator,
    available: &[Range],
    blocked: &[Range],
) -> Result<u64, Error> {
    let mut memory = RangeSet::new();

    for &range in available {
        memory.insert(range).map_err(Error::RangeSet)?;
    }
    for &range in blocked {
        memory.remove_range(range).map_err(Error::RangeSet)?;
    }

    let mut added = 0;
    for &Range { start, end } in memory.iter() {
        let first_byte = alloc::align_up(start, PAGE_SIZE as u64);
        if first_byte > end {
            continue;
        }

        assert!(end < u64::MAX, "memory region must not reach the address limit");
        let page_count = (end + 1 - first_byte) >> PAGE_BITS;
        if page_count == 0 {
            continue;
        }

        let first = Pfn(first_byte >> PAGE_BITS);
        let last = Pfn(first.0 + page_count - 1);
        if !allocator.arena().contains(first) || !allocator.arena().contains(last) {
            return Err(Error::OutsideArena);
        }

        crate::debug!(
            "making {:#x}--{:#x} available for allocation",
            first.base_address(),
            last.base_address() + PAGE_SIZE as u64 - 1,
        );
        allocator.insert_free_pages(first, page_count);
        added += page_count;
    }

    crate::info!(
        "{} the physical memory allocator with {} of free memory",
        "initialized".green(),
        unit::bytes(added << PAGE_BITS),
    );

    Ok(added)
}
