//! Adaptive page-size throttle
//!
//! Owned by a single extraction run. Once shrunk, the size only goes down:
//! unset -> 16 -> 8 -> 4 -> 2 -> 1, and stays at 1.

/// Size chosen on the first shrink when no page size was configured
pub const INITIAL_SHRINK_SIZE: u32 = 16;

/// Current `per_page` value for one resource extraction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageSizeThrottle {
    size: Option<u32>,
}

impl PageSizeThrottle {
    /// Start from the configured size; `None` (or 0) means the API default
    pub fn new(initial: Option<u32>) -> Self {
        Self {
            size: initial.filter(|&n| n > 0),
        }
    }

    /// The page size to request, if any
    pub fn current(&self) -> Option<u32> {
        self.size
    }

    /// Whether no further shrink is possible
    pub fn at_floor(&self) -> bool {
        self.size == Some(1)
    }

    /// Halve the page size, returning the new value
    pub fn shrink(&mut self) -> u32 {
        let next = match self.size {
            None => INITIAL_SHRINK_SIZE,
            Some(n) if n > 1 => n / 2,
            Some(_) => 1,
        };
        self.size = Some(next);
        next
    }
}
