use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use core::iter::{FusedIterator, Iterator};
use core::ops::{BitAnd, BitOr, Index, Not};

use crate::error::{Error, Result};

/// Computes the number of bytes needed to store `length` bits.
///
/// # Examples
/// ```
/// use bool_array::byte_count;
///
/// assert_eq!(byte_count(0), 0);
/// assert_eq!(byte_count(8), 1);
/// assert_eq!(byte_count(9), 2);
/// ```
pub const fn byte_count(length: usize) -> usize {
    length.div_ceil(8)
}

/// A fixed-length array of booleans packed one per bit.
///
/// Index `i` lives in bit `i % 8` of byte `i / 8`, least significant bit
/// first. The bits of the last byte past `len()` are always kept unset, so
/// the derived `PartialEq` and `Hash` only see the logical contents.
#[derive(PartialEq, Eq, Hash, Clone, Default)]
pub struct BoolArray {
    len: usize,
    bytes: Box<[u8]>,
}

impl BoolArray {
    /// Creates an array of `length` bits, all unset.
    ///
    /// # Examples
    /// ```
    /// use bool_array::BoolArray;
    ///
    /// let bits = BoolArray::new(10);
    /// assert_eq!(bits.len(), 10);
    /// assert!(bits.none(true));
    /// ```
    pub fn new(length: usize) -> Self {
        Self {
            len: length,
            bytes: vec![0u8; byte_count(length)].into_boxed_slice(),
        }
    }

    /// Creates an array of `length` bits, all set to `value`.
    ///
    /// # Examples
    /// ```
    /// use bool_array::BoolArray;
    ///
    /// let bits = BoolArray::with_all(10, true);
    /// assert_eq!(bits.count(true), 10);
    /// ```
    pub fn with_all(length: usize, value: bool) -> Self {
        let mut bits = Self::new(length);
        bits.fill(value);
        bits
    }

    /// Returns the number of bits.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array holds no bits at all.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the value of the bit at `offset`.
    ///
    /// # Errors
    /// [`Error::IndexOutOfRange`] if `offset >= len()`.
    ///
    /// # Examples
    /// ```
    /// use bool_array::{BoolArray, Error};
    ///
    /// let mut bits = BoolArray::new(8);
    /// bits.set(1, true)?;
    /// assert_eq!(bits.get(1), Ok(true));
    /// assert_eq!(bits.get(0), Ok(false));
    /// assert_eq!(bits.get(8), Err(Error::IndexOutOfRange { index: 8, length: 8 }));
    /// # Ok::<(), Error>(())
    /// ```
    #[inline]
    pub fn get(&self, offset: usize) -> Result<bool> {
        self.check(offset)?;
        Ok(self.bit(offset))
    }

    /// Sets the bit at `offset` to `value`. No other bit is touched.
    ///
    /// # Errors
    /// [`Error::IndexOutOfRange`] if `offset >= len()`.
    ///
    /// # Examples
    /// ```
    /// use bool_array::BoolArray;
    ///
    /// let mut bits = BoolArray::new(8);
    /// bits.set(3, true)?;
    /// assert!(bits[3]);
    /// bits.set(3, false)?;
    /// assert!(!bits[3]);
    /// # Ok::<(), bool_array::Error>(())
    /// ```
    #[inline]
    pub fn set(&mut self, offset: usize, value: bool) -> Result<()> {
        self.check(offset)?;
        self.write(offset, value);
        Ok(())
    }

    /// Sets every bit in `offsets`.
    ///
    /// All offsets are checked before anything is written, so on error the
    /// array is left as it was.
    ///
    /// # Errors
    /// [`Error::IndexOutOfRange`] for the first offset `>= len()`.
    ///
    /// # Examples
    /// ```
    /// use bool_array::BoolArray;
    ///
    /// let mut bits = BoolArray::new(8);
    /// bits.on(&[3, 5])?;
    /// assert_eq!(bits.active(), [3, 5]);
    /// assert!(bits.on(&[1, 8]).is_err());
    /// assert!(!bits[1]);
    /// # Ok::<(), bool_array::Error>(())
    /// ```
    pub fn on(&mut self, offsets: &[usize]) -> Result<()> {
        self.check_all(offsets)?;
        for &offset in offsets {
            self.write(offset, true);
        }
        Ok(())
    }

    /// Unsets every bit in `offsets`.
    ///
    /// All offsets are checked before anything is written, so on error the
    /// array is left as it was.
    ///
    /// # Errors
    /// [`Error::IndexOutOfRange`] for the first offset `>= len()`.
    ///
    /// # Examples
    /// ```
    /// use bool_array::BoolArray;
    ///
    /// let mut bits = BoolArray::with_all(8, true);
    /// bits.off(&[3, 5])?;
    /// assert_eq!(bits.inactive(), [3, 5]);
    /// # Ok::<(), bool_array::Error>(())
    /// ```
    pub fn off(&mut self, offsets: &[usize]) -> Result<()> {
        self.check_all(offsets)?;
        for &offset in offsets {
            self.write(offset, false);
        }
        Ok(())
    }

    /// Toggles every bit in `offsets`, once per occurrence.
    ///
    /// An offset listed twice ends up unchanged. All offsets are checked
    /// before anything is written.
    ///
    /// # Errors
    /// [`Error::IndexOutOfRange`] for the first offset `>= len()`.
    ///
    /// # Examples
    /// ```
    /// use bool_array::BoolArray;
    ///
    /// let mut bits = BoolArray::new(8);
    /// bits.flip(&[3, 5, 6, 6])?;
    /// assert_eq!(bits.active(), [3, 5]);
    /// # Ok::<(), bool_array::Error>(())
    /// ```
    pub fn flip(&mut self, offsets: &[usize]) -> Result<()> {
        self.check_all(offsets)?;
        for &offset in offsets {
            let (row, col) = Self::idxs(offset);
            self.bytes[row] ^= 1 << col;
        }
        Ok(())
    }

    /// Sets every bit to `value`, a whole byte at a time.
    ///
    /// # Examples
    /// ```
    /// use bool_array::BoolArray;
    ///
    /// let mut bits = BoolArray::new(13);
    /// bits.fill(true);
    /// assert!(bits.none(false));
    /// assert_eq!(bits.count(true), 13);
    /// ```
    pub fn fill(&mut self, value: bool) {
        self.bytes.fill(if value { !0 } else { 0 });
        self.clean_unused_bits();
    }

    /// Unsets every bit. Same as `fill(false)`.
    pub fn clear(&mut self) {
        self.fill(false);
    }

    /// Returns the smallest index whose bit equals `value`, or `None` if
    /// there is none (always `None` for an empty array).
    ///
    /// Whole bytes that cannot match are skipped.
    ///
    /// # Examples
    /// ```
    /// use bool_array::BoolArray;
    ///
    /// let mut bits = BoolArray::new(8);
    /// bits.set(3, true)?;
    /// assert_eq!(bits.first_with(true), Some(3));
    /// assert_eq!(bits.first_with(false), Some(0));
    /// assert_eq!(BoolArray::new(8).first_with(true), None);
    /// # Ok::<(), bool_array::Error>(())
    /// ```
    pub fn first_with(&self, value: bool) -> Option<usize> {
        if value {
            self.iter_active().next()
        } else {
            self.iter_inactive().next()
        }
    }

    /// Returns `true` if at least one bit equals `value`.
    #[inline]
    pub fn any(&self, value: bool) -> bool {
        self.first_with(value).is_some()
    }

    /// Returns `true` if no bit equals `value`.
    #[inline]
    pub fn none(&self, value: bool) -> bool {
        !self.any(value)
    }

    /// Returns the number of bits equal to `value`.
    ///
    /// # Examples
    /// ```
    /// use bool_array::BoolArray;
    ///
    /// let bits = BoolArray::from(&[true, false, true][..]);
    /// assert_eq!(bits.count(true), 2);
    /// assert_eq!(bits.count(false), 1);
    /// ```
    pub fn count(&self, value: bool) -> usize {
        let ones: usize = self.bytes.iter().map(|b| b.count_ones() as usize).sum();
        if value { ones } else { self.len - ones }
    }

    /// Returns the indices of all set bits in ascending order.
    pub fn active(&self) -> Vec<usize> {
        self.iter_active().collect()
    }

    /// Returns the indices of all unset bits in ascending order.
    pub fn inactive(&self) -> Vec<usize> {
        self.iter_inactive().collect()
    }

    /// Returns an iterator over all bits as `bool`, from index 0 upwards.
    ///
    /// The iterator yields exactly `len()` items. Every call starts a new,
    /// independent traversal.
    ///
    /// # Examples
    /// ```
    /// use bool_array::BoolArray;
    ///
    /// let mut bits = BoolArray::new(4);
    /// bits.on(&[0, 2])?;
    /// let all: Vec<bool> = bits.iter().collect();
    /// assert_eq!(all, [true, false, true, false]);
    /// # Ok::<(), bool_array::Error>(())
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            bytes: &self.bytes,
            front: 0,
            back: self.len,
        }
    }

    /// Returns an iterator over the indices of all set bits, in ascending
    /// order.
    ///
    /// Runs in O(max(k, b)) where k is the number of set bits and b is the
    /// number of bytes.
    ///
    /// # Examples
    /// ```
    /// use bool_array::BoolArray;
    ///
    /// let bits = BoolArray::from(&[true, false, true, false, true][..]);
    /// let mut active = bits.iter_active();
    /// assert_eq!(active.next(), Some(0));
    /// assert_eq!(active.next(), Some(2));
    /// assert_eq!(active.next(), Some(4));
    /// assert_eq!(active.next(), None);
    /// ```
    #[inline]
    pub fn iter_active(&self) -> IterActive<'_> {
        IterActive(Positions::new(&self.bytes, self.len, 0))
    }

    /// Returns an iterator over the indices of all unset bits, in ascending
    /// order.
    ///
    /// # Examples
    /// ```
    /// use bool_array::BoolArray;
    ///
    /// let bits = BoolArray::from(&[true, false, true, false, true][..]);
    /// let inactive: Vec<usize> = bits.iter_inactive().collect();
    /// assert_eq!(inactive, [1, 3]);
    /// ```
    #[inline]
    pub fn iter_inactive(&self) -> IterInactive<'_> {
        IterInactive(Positions::new(&self.bytes, self.len, !0))
    }

    /// Returns a new array where each bit is set if it is set in either
    /// `self` or `other`.
    ///
    /// Neither operand is modified.
    ///
    /// # Errors
    /// [`Error::LengthMismatch`] if the lengths differ.
    ///
    /// # Examples
    /// ```
    /// use bool_array::BoolArray;
    ///
    /// let mut a = BoolArray::new(8);
    /// a.on(&[0, 2, 4, 6])?;
    /// let mut b = BoolArray::new(8);
    /// b.on(&[1, 3, 5, 7])?;
    /// assert!(a.union(&b)?.none(false));
    /// assert!(a.union(&BoolArray::new(9)).is_err());
    /// # Ok::<(), bool_array::Error>(())
    /// ```
    pub fn union(&self, other: &Self) -> Result<Self> {
        self.check_len(other)?;
        Ok(self.combine(other, |a, b| a | b))
    }

    /// Returns a new array where each bit is set only if it is set in both
    /// `self` and `other`.
    ///
    /// Neither operand is modified.
    ///
    /// # Errors
    /// [`Error::LengthMismatch`] if the lengths differ.
    ///
    /// # Examples
    /// ```
    /// use bool_array::BoolArray;
    ///
    /// let mut a = BoolArray::new(8);
    /// a.on(&[0, 3, 5, 6])?;
    /// let mut b = BoolArray::new(8);
    /// b.on(&[1, 3, 5, 7])?;
    /// assert_eq!(a.intersect(&b)?.active(), [3, 5]);
    /// # Ok::<(), bool_array::Error>(())
    /// ```
    pub fn intersect(&self, other: &Self) -> Result<Self> {
        self.check_len(other)?;
        Ok(self.combine(other, |a, b| a & b))
    }

    /// Returns a new array with every bit inverted.
    ///
    /// # Examples
    /// ```
    /// use bool_array::BoolArray;
    ///
    /// let mut bits = BoolArray::new(8);
    /// bits.on(&[0, 2, 4, 6])?;
    /// assert_eq!(bits.invert().active(), [1, 3, 5, 7]);
    /// # Ok::<(), bool_array::Error>(())
    /// ```
    pub fn invert(&self) -> Self {
        let mut result = Self {
            len: self.len,
            bytes: self.bytes.iter().map(|b| !b).collect(),
        };
        result.clean_unused_bits();
        result
    }

    #[inline]
    fn idxs(idx: usize) -> (usize, usize) {
        (idx >> 3, idx & 7)
    }

    #[inline]
    fn check(&self, offset: usize) -> Result<()> {
        if offset < self.len {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index: offset,
                length: self.len,
            })
        }
    }

    fn check_all(&self, offsets: &[usize]) -> Result<()> {
        offsets.iter().try_for_each(|&offset| self.check(offset))
    }

    fn check_len(&self, other: &Self) -> Result<()> {
        if self.len == other.len {
            Ok(())
        } else {
            Err(Error::LengthMismatch {
                left: self.len,
                right: other.len,
            })
        }
    }

    #[inline]
    fn bit(&self, offset: usize) -> bool {
        let (row, col) = Self::idxs(offset);
        self.bytes[row] & 1 << col != 0
    }

    #[inline]
    fn write(&mut self, offset: usize, value: bool) {
        let (row, col) = Self::idxs(offset);
        if value {
            self.bytes[row] |= 1 << col;
        } else {
            self.bytes[row] &= !(1 << col);
        }
    }

    // Caller has checked that the lengths match.
    fn combine(&self, other: &Self, op: impl Fn(u8, u8) -> u8) -> Self {
        Self {
            len: self.len,
            bytes: self
                .bytes
                .iter()
                .zip(other.bytes.iter())
                .map(|(a, b)| op(*a, *b))
                .collect(),
        }
    }

    fn clean_unused_bits(&mut self) {
        let bits_in_last = self.len % 8;
        if bits_in_last != 0 {
            if let Some(last) = self.bytes.last_mut() {
                *last &= (1u8 << bits_in_last) - 1;
            }
        }
    }
}

/// Panics if `offset >= len()`, like slice indexing. Use
/// [`BoolArray::get`] for the checked form.
impl Index<usize> for BoolArray {
    type Output = bool;

    fn index(&self, offset: usize) -> &Self::Output {
        assert!(offset < self.len, "Bit index {offset} out of bounds");
        if self.bit(offset) { &true } else { &false }
    }
}

impl<'array> IntoIterator for &'array BoolArray {
    type Item = bool;
    type IntoIter = Iter<'array>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Debug for BoolArray {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "BoolArray({}) LSB -> ", self.len)?;
        for (i, bit) in self.iter().enumerate() {
            if i % 8 == 0 {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{i}: ")?;
            }
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        write!(f, " <- MSB")
    }
}

/// Collects `bool`s into an array whose length is the number of items.
impl FromIterator<bool> for BoolArray {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        let mut bytes = Vec::new();
        let mut len = 0;
        for bit in iter {
            let (row, col) = Self::idxs(len);
            if col == 0 {
                bytes.push(0u8);
            }
            if bit {
                bytes[row] |= 1 << col;
            }
            len += 1;
        }
        Self {
            len,
            bytes: bytes.into_boxed_slice(),
        }
    }
}

impl From<&[bool]> for BoolArray {
    fn from(bits: &[bool]) -> Self {
        bits.iter().copied().collect()
    }
}

impl From<Vec<bool>> for BoolArray {
    fn from(bits: Vec<bool>) -> Self {
        bits.into_iter().collect()
    }
}

/// Panics if the lengths differ. See [`BoolArray::intersect`].
impl BitAnd for &BoolArray {
    type Output = BoolArray;

    fn bitand(self, rhs: Self) -> Self::Output {
        assert_eq!(self.len, rhs.len, "BoolArray lengths do not match");
        self.combine(rhs, |a, b| a & b)
    }
}

/// Panics if the lengths differ. See [`BoolArray::union`].
impl BitOr for &BoolArray {
    type Output = BoolArray;

    fn bitor(self, rhs: Self) -> Self::Output {
        assert_eq!(self.len, rhs.len, "BoolArray lengths do not match");
        self.combine(rhs, |a, b| a | b)
    }
}

impl Not for &BoolArray {
    type Output = BoolArray;

    fn not(self) -> Self::Output {
        self.invert()
    }
}

/// Iterator over all bits of a [`BoolArray`] as `bool` values.
///
/// Returned by [`BoolArray::iter()`].
#[derive(Clone, Debug)]
pub struct Iter<'array> {
    bytes: &'array [u8],
    front: usize,
    back: usize,
}

impl Iter<'_> {
    #[inline]
    fn bit(&self, idx: usize) -> bool {
        self.bytes[idx >> 3] & 1 << (idx & 7) != 0
    }
}

impl Iterator for Iter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let bit = self.bit(self.front);
        self.front += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.bit(self.back))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

// Walks the positions of set bits in `bytes ^ xor`, one byte at a time.
#[derive(Clone, Debug)]
struct Positions<'array> {
    bytes: &'array [u8],
    len: usize,
    xor: u8,
    byte_idx: usize,
    current: u8,
    base_bit_idx: usize,
}

impl<'array> Positions<'array> {
    fn new(bytes: &'array [u8], len: usize, xor: u8) -> Self {
        Self {
            bytes,
            len,
            xor,
            byte_idx: 0,
            current: bytes.first().map_or(0, |b| b ^ xor),
            base_bit_idx: 0,
        }
    }
}

impl Iterator for Positions<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.byte_idx < self.bytes.len() {
            if self.current != 0 {
                let tz = self.current.trailing_zeros() as usize;
                let idx = self.base_bit_idx + tz;
                if idx >= self.len {
                    // only padding bits are left
                    self.byte_idx = self.bytes.len();
                    self.current = 0;
                    return None;
                }
                self.current &= self.current - 1; // unset LSB
                return Some(idx);
            }

            self.byte_idx += 1;
            self.base_bit_idx += 8;
            self.current = self.bytes.get(self.byte_idx).map_or(0, |b| b ^ self.xor);
        }
        None
    }
}

/// Iterator over the indices of set bits in a [`BoolArray`].
///
/// Yields the positions of all bits that are set, in ascending order.
///
/// Returned by [`BoolArray::iter_active()`].
#[derive(Clone, Debug)]
pub struct IterActive<'array>(Positions<'array>);

impl Iterator for IterActive<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

impl FusedIterator for IterActive<'_> {}

/// Iterator over the indices of unset bits in a [`BoolArray`].
///
/// Yields the positions of all bits that are unset, in ascending order.
///
/// Returned by [`BoolArray::iter_inactive()`].
#[derive(Clone, Debug)]
pub struct IterInactive<'array>(Positions<'array>);

impl Iterator for IterInactive<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

impl FusedIterator for IterInactive<'_> {}
