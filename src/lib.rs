//! A fixed-length, bit-packed boolean array written in pure Rust.
//! `no_std` (needs `alloc`), no `unsafe`.
//!
//! [`BoolArray`] stores one boolean per index in a single bit of an owned
//! byte buffer, so `n` flags cost `ceil(n / 8)` bytes instead of `n`. Its
//! [features](#features) are listed below.
//!
//! # Examples
//! ```
//! use bool_array::BoolArray;
//!
//! let mut flags = BoolArray::new(10);
//! assert!(flags.none(true));
//! flags.on(&[3, 5])?;
//! assert_eq!(flags.get(3)?, true);
//! assert_eq!(flags.active(), [3, 5]);
//! assert_eq!(flags.first_with(false), Some(0));
//! # Ok::<(), bool_array::Error>(())
//! ```
//!
//! # Use Cases
//!
//! - Large sets of boolean flags addressed by integer index
//! - Membership masks whose length is only known at runtime
//! - Not meant to grow: the length is fixed when the array is created
//!
//! # Features
//!
//! - `#![no_std]` compatible (with `alloc`)
//! - Checked single-bit access: `get`, `set`, plus `on`, `off` and `flip` over
//!   slices of offsets
//! - Bulk mutation: `fill`, `clear`
//! - Scans: `first_with`, `any`, `none`, `count`, `active`, `inactive`
//! - Lazy iteration:
//!   - `iter()` (all bits as bools)
//!   - `iter_active()` (indices of set bits)
//!   - `iter_inactive()` (indices of unset bits)
//! - Set algebra returning fresh arrays: `union`, `intersect`, `invert`
//!   and the operators `&`, `|`, `!` on references

#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![no_std]

extern crate alloc;

mod array;
mod error;

pub use array::{BoolArray, Iter, IterActive, IterInactive, byte_count};
pub use error::{Error, Result};
