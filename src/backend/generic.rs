//! The generic (portable) implementation.
//!
//! It's used on targets without native 128-bit products, or
//! everywhere if the `soft` feature is enabled. Elements are
//! five 26-bit limbs multiplied with 64-bit products.

#![cfg(any(test, feature = "soft", not(target_pointer_width = "64")))]
#![allow(clippy::arithmetic_side_effects)]

use core::ops::{Add, AddAssign, Mul, MulAssign};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::poly::BLOCK_SIZE;

const MASK26: u32 = 0x3ff_ffff;
const MASK26_WIDE: u64 = MASK26 as u64;

/// `2^128` in the top limb.
const HIBIT: u32 = 1 << 24;

/// An element of `GF(2^130 - 5)`.
///
/// Only partially reduced: the value is below `2^131` but may
/// exceed the modulus until [`FieldElement::finalize`].
#[derive(Copy, Clone, Debug, Default)]
#[repr(transparent)]
pub struct FieldElement([u32; 5]);

impl FieldElement {
    pub const fn from_u128(x: u128) -> Self {
        Self([
            (x as u32) & MASK26,
            ((x >> 26) as u32) & MASK26,
            ((x >> 52) as u32) & MASK26,
            ((x >> 78) as u32) & MASK26,
            (x >> 104) as u32,
        ])
    }

    /// Converts a full message block, adding `2^128`.
    pub const fn from_block(block: &[u8; BLOCK_SIZE]) -> Self {
        let Self([h0, h1, h2, h3, h4]) = Self::from_u128(u128::from_le_bytes(*block));
        Self([h0, h1, h2, h3, h4 | HIBIT])
    }

    /// Converts a final block that already carries its `0x01`
    /// terminator.
    pub const fn from_padded(block: &[u8; BLOCK_SIZE]) -> Self {
        Self::from_u128(u128::from_le_bytes(*block))
    }

    /// Returns `self * rhs` without reducing it.
    #[rustfmt::skip]
    #[inline]
    pub fn mul_wide(self, rhs: Self) -> Unreduced {
        let [h0, h1, h2, h3, h4] = self.0.map(u64::from);
        let [r0, r1, r2, r3, r4] = rhs.0.map(u64::from);

        // 2^130 ≡ 5 (mod p)
        let s1 = r1 * 5;
        let s2 = r2 * 5;
        let s3 = r3 * 5;
        let s4 = r4 * 5;

        Unreduced([
            h0 * r0 + h1 * s4 + h2 * s3 + h3 * s2 + h4 * s1,
            h0 * r1 + h1 * r0 + h2 * s4 + h3 * s3 + h4 * s2,
            h0 * r2 + h1 * r1 + h2 * r0 + h3 * s4 + h4 * s3,
            h0 * r3 + h1 * r2 + h2 * r1 + h3 * r0 + h4 * s4,
            h0 * r4 + h1 * r3 + h2 * r2 + h3 * r1 + h4 * r0,
        ])
    }

    /// Fully reduces `self` modulo `2^130 - 5`, then returns
    /// `(self + s) mod 2^128` in little-endian order.
    pub fn finalize(self, s: u128) -> [u8; 16] {
        let [mut h0, mut h1, mut h2, mut h3, mut h4] = self.0;
        let mut c: u32;

        c = h1 >> 26;
        h1 &= MASK26;
        h2 += c;
        c = h2 >> 26;
        h2 &= MASK26;
        h3 += c;
        c = h3 >> 26;
        h3 &= MASK26;
        h4 += c;
        c = h4 >> 26;
        h4 &= MASK26;
        h0 += c * 5;
        c = h0 >> 26;
        h0 &= MASK26;
        h1 += c;

        // g = h + 5 - 2^130
        let mut g0 = h0 + 5;
        c = g0 >> 26;
        g0 &= MASK26;
        let mut g1 = h1 + c;
        c = g1 >> 26;
        g1 &= MASK26;
        let mut g2 = h2 + c;
        c = g2 >> 26;
        g2 &= MASK26;
        let mut g3 = h3 + c;
        c = g3 >> 26;
        g3 &= MASK26;
        let mut g4 = (h4 + c).wrapping_sub(1 << 26);

        // Keep h if g underflowed, otherwise take g.
        let mask = (g4 >> 31).wrapping_sub(1);
        g0 &= mask;
        g1 &= mask;
        g2 &= mask;
        g3 &= mask;
        g4 &= mask;
        h0 = (h0 & !mask) | g0;
        h1 = (h1 & !mask) | g1;
        h2 = (h2 & !mask) | g2;
        h3 = (h3 & !mask) | g3;
        h4 = (h4 & !mask) | g4;

        u128::from(h0)
            .wrapping_add(u128::from(h1) << 26)
            .wrapping_add(u128::from(h2) << 52)
            .wrapping_add(u128::from(h3) << 78)
            .wrapping_add(u128::from(h4) << 104)
            .wrapping_add(s)
            .to_le_bytes()
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(test)]
impl Eq for FieldElement {}

#[cfg(test)]
impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.finalize(0) == other.finalize(0)
    }
}

impl Add for FieldElement {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        let [a0, a1, a2, a3, a4] = self.0;
        let [b0, b1, b2, b3, b4] = rhs.0;
        Self([a0 + b0, a1 + b1, a2 + b2, a3 + b3, a4 + b4])
    }
}

impl Mul for FieldElement {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self.mul_wide(rhs).reduce()
    }
}
impl MulAssign for FieldElement {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

/// A product that has not been carried yet.
#[derive(Copy, Clone, Debug)]
pub struct Unreduced([u64; 5]);

impl Unreduced {
    /// Carries the limbs and folds everything above `2^130`
    /// back in as a multiple of 5.
    #[inline]
    pub fn reduce(self) -> FieldElement {
        let [d0, mut d1, mut d2, mut d3, mut d4] = self.0;

        d1 += d0 >> 26;
        d2 += d1 >> 26;
        d3 += d2 >> 26;
        d4 += d3 >> 26;

        let mut h0 = (d0 & MASK26_WIDE) + (d4 >> 26) * 5;
        let h1 = (d1 & MASK26_WIDE) + (h0 >> 26);
        h0 &= MASK26_WIDE;

        FieldElement([
            h0 as u32,
            h1 as u32,
            (d2 & MASK26_WIDE) as u32,
            (d3 & MASK26_WIDE) as u32,
            (d4 & MASK26_WIDE) as u32,
        ])
    }
}

impl AddAssign for Unreduced {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a += b;
        }
    }
}
