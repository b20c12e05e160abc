//! Memory allocation APIs.

pub mod buddy;
pub use buddy::BuddyAllocator;

use crate::pmem::PAGE_BITS;
use crate::unit;
use bitflags::bitflags;
use core::fmt;

bitflags! {
    /// Behavior flags for [`BuddyAllocator::allocate_pages`].
    pub struct AllocFlags: u32 {
        /// Zero every byte of the block before handing it out.
        const ZERO = 1;
    }
}

/// Statistics for a memory allocator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocStats {
    /// The name of the allocator that collected these stats.
    pub name: &'static str,
    /// The number of pages currently sitting in the free lists.
    pub free: u64,
    /// The number of pages ever handed to this allocator.
    pub total: u64,
}

impl AllocStats {
    /// Create a new [`AllocStats`] instance for the given allocator name.
    pub const fn with_name(name: &'static str) -> Self {
        Self {
            name,
            free: 0,
            total: 0,
        }
    }
}

impl fmt::Display for AllocStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        self.name.chars().try_for_each(|_| write!(f, "~"))?;
        writeln!(f, "\nFree:  {}", unit::bytes(self.free << PAGE_BITS))?;
        writeln!(f, "Total: {}", unit::bytes(self.total << PAGE_BITS))?;
        Ok(())
    }
}

/// Align `addr` upwards to `align`, which must be a power of two.
pub fn align_up(addr: u64, align: u64) -> u64 {
    debug_assert!(align.is_power_of_two());
    (addr + align - 1) & !(align - 1)
}
