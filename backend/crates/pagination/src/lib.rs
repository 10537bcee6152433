//! Page-number pagination primitives for backend collection endpoints.
//!
//! Pages are 1-indexed. A [`PageRequest`] turns a [`PageNumber`] and a
//! [`PageSize`] into a bounded window over an ordered collection:
//!
//! ```text
//! [(number - 1) * size, number * size)
//! ```
//!
//! The window is clipped to the collection bounds. Page numbers below one,
//! pages past the end of the collection, and offsets that overflow `usize`
//! all resolve to an empty page instead of an error.
//!
//! # Examples
//!
//! ```
//! use pagination::{PageNumber, PageRequest, PageSize};
//!
//! let items = [1, 2, 3, 4, 5, 6, 7];
//! let request = PageRequest::new(PageNumber::new(3), PageSize::DEFAULT);
//! assert_eq!(request.window(&items), &[7]);
//! ```

use std::num::{IntErrorKind, NonZeroUsize};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a [`PageSize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageSizeError {
    /// Page sizes must hold at least one item.
    #[error("page size must be greater than zero")]
    Zero,
}

/// Errors raised when parsing a [`PageNumber`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageNumberError {
    /// The raw value is not an integer literal.
    #[error("page number must be an integer (got {value:?})")]
    NotAnInteger {
        /// The rejected raw value.
        value: String,
    },
}

/// Number of items held by a single page.
///
/// ## Invariants
/// - Always greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// Three items per page.
    pub const DEFAULT: Self = Self(NonZeroUsize::MIN.saturating_add(2));

    /// Validate and wrap a page size.
    ///
    /// # Errors
    /// Returns [`PageSizeError::Zero`] when `value` is zero.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageSize, PageSizeError};
    ///
    /// assert_eq!(PageSize::new(10).map(PageSize::get), Ok(10));
    /// assert_eq!(PageSize::new(0), Err(PageSizeError::Zero));
    /// ```
    pub const fn new(value: usize) -> Result<Self, PageSizeError> {
        match NonZeroUsize::new(value) {
            Some(size) => Ok(Self(size)),
            None => Err(PageSizeError::Zero),
        }
    }

    /// Return the size as a plain integer.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for PageSize {
    type Error = PageSizeError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for usize {
    fn from(value: PageSize) -> Self {
        value.get()
    }
}

/// A 1-indexed page number.
///
/// Any `i64` is representable; values below one simply select no items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageNumber(i64);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(1);

    /// Wrap a raw page number.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Return the raw page number.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Parse a page number from a path or query segment.
    ///
    /// Integer literals outside the `i64` range saturate to `i64::MAX` or
    /// `i64::MIN`, which still resolve to an empty page.
    ///
    /// # Errors
    /// Returns [`PageNumberError::NotAnInteger`] when `raw` is not an integer
    /// literal.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageNumber;
    ///
    /// assert_eq!(PageNumber::parse("2").map(PageNumber::get), Ok(2));
    /// assert_eq!(PageNumber::parse("-4").map(PageNumber::get), Ok(-4));
    /// assert!(PageNumber::parse("two").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, PageNumberError> {
        match raw.trim().parse::<i64>() {
            Ok(value) => Ok(Self(value)),
            Err(err) => match err.kind() {
                IntErrorKind::PosOverflow => Ok(Self(i64::MAX)),
                IntErrorKind::NegOverflow => Ok(Self(i64::MIN)),
                _ => Err(PageNumberError::NotAnInteger {
                    value: raw.to_owned(),
                }),
            },
        }
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl FromStr for PageNumber {
    type Err = PageNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A page number paired with a page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PageRequest {
    number: PageNumber,
    size: PageSize,
}

impl PageRequest {
    /// Build a request for `number` with `size` items per page.
    #[must_use]
    pub const fn new(number: PageNumber, size: PageSize) -> Self {
        Self { number, size }
    }

    /// The requested page number.
    #[must_use]
    pub const fn number(&self) -> PageNumber {
        self.number
    }

    /// The requested page size.
    #[must_use]
    pub const fn size(&self) -> PageSize {
        self.size
    }

    /// Zero-based index of the first item on this page.
    ///
    /// Returns `None` when the page precedes the first item or when the
    /// offset does not fit in `usize`.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageNumber, PageRequest, PageSize};
    ///
    /// let second = PageRequest::new(PageNumber::new(2), PageSize::DEFAULT);
    /// assert_eq!(second.offset(), Some(3));
    /// let zeroth = PageRequest::new(PageNumber::new(0), PageSize::DEFAULT);
    /// assert_eq!(zeroth.offset(), None);
    /// ```
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        let index = self.number.get().checked_sub(1)?;
        let index = usize::try_from(index).ok()?;
        index.checked_mul(self.size.get())
    }

    /// Borrow the items that fall on this page.
    #[must_use]
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let Some(start) = self.offset() else {
            return &[];
        };
        let Some(rest) = items.get(start..) else {
            return &[];
        };
        rest.get(..self.size.get()).unwrap_or(rest)
    }

}
