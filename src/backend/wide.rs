//! The 64-bit implementation.
//!
//! Elements are stored as three 44-bit limbs (the top limb holds
//! 42 bits) and multiplied with 128-bit products.

#![cfg(any(test, all(not(feature = "soft"), target_pointer_width = "64")))]
#![allow(clippy::arithmetic_side_effects)]

use core::ops::{Add, AddAssign, Mul, MulAssign};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::poly::BLOCK_SIZE;

const MASK44: u64 = 0xfff_ffff_ffff;
const MASK42: u64 = 0x3ff_ffff_ffff;

/// `2^128` in the top limb.
const HIBIT: u64 = 1 << 40;

/// An element of `GF(2^130 - 5)`.
///
/// Only partially reduced: the value is below `2^131` but may
/// exceed the modulus until [`FieldElement::finalize`].
#[derive(Copy, Clone, Debug, Default)]
#[repr(transparent)]
pub struct FieldElement([u64; 3]);

impl FieldElement {
    pub const fn from_u128(x: u128) -> Self {
        Self([
            (x as u64) & MASK44,
            ((x >> 44) as u64) & MASK44,
            (x >> 88) as u64,
        ])
    }

    /// Converts a full message block, adding `2^128`.
    pub const fn from_block(block: &[u8; BLOCK_SIZE]) -> Self {
        let Self([h0, h1, h2]) = Self::from_u128(u128::from_le_bytes(*block));
        Self([h0, h1, h2 | HIBIT])
    }

    /// Converts a final block that already carries its `0x01`
    /// terminator.
    pub const fn from_padded(block: &[u8; BLOCK_SIZE]) -> Self {
        Self::from_u128(u128::from_le_bytes(*block))
    }

    /// Returns `self * rhs` without reducing it.
    #[inline]
    pub fn mul_wide(self, rhs: Self) -> Unreduced {
        let [h0, h1, h2] = self.0;
        let [r0, r1, r2] = rhs.0;

        // 2^132 = 4 * 2^130 ≡ 20 (mod p)
        let s1 = r1 * 20;
        let s2 = r2 * 20;

        Unreduced([
            mul64(h0, r0) + mul64(h1, s2) + mul64(h2, s1),
            mul64(h0, r1) + mul64(h1, r0) + mul64(h2, s2),
            mul64(h0, r2) + mul64(h1, r1) + mul64(h2, r0),
        ])
    }

    /// Fully reduces `self` modulo `2^130 - 5`, then returns
    /// `(self + s) mod 2^128` in little-endian order.
    pub fn finalize(self, s: u128) -> [u8; 16] {
        let [mut h0, mut h1, mut h2] = self.0;
        let mut c: u64;

        c = h1 >> 44;
        h1 &= MASK44;
        h2 += c;
        c = h2 >> 42;
        h2 &= MASK42;
        h0 += c * 5;
        c = h0 >> 44;
        h0 &= MASK44;
        h1 += c;
        c = h1 >> 44;
        h1 &= MASK44;
        h2 += c;
        c = h2 >> 42;
        h2 &= MASK42;
        h0 += c * 5;
        c = h0 >> 44;
        h0 &= MASK44;
        h1 += c;

        // g = h + 5 - 2^130
        let mut g0 = h0 + 5;
        c = g0 >> 44;
        g0 &= MASK44;
        let mut g1 = h1 + c;
        c = g1 >> 44;
        g1 &= MASK44;
        let mut g2 = (h2 + c).wrapping_sub(1 << 42);

        // Keep h if g underflowed, otherwise take g.
        let mask = (g2 >> 63).wrapping_sub(1);
        g0 &= mask;
        g1 &= mask;
        g2 &= mask;
        h0 = (h0 & !mask) | g0;
        h1 = (h1 & !mask) | g1;
        h2 = (h2 & !mask) | g2;

        u128::from(h0)
            .wrapping_add(u128::from(h1) << 44)
            .wrapping_add(u128::from(h2) << 88)
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
        let [a0, a1, a2] = self.0;
        let [b0, b1, b2] = rhs.0;
        Self([a0 + b0, a1 + b1, a2 + b2])
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
pub struct Unreduced([u128; 3]);

impl Unreduced {
    /// Carries the limbs and folds everything above `2^130`
    /// back in as a multiple of 5.
    #[inline]
    pub fn reduce(self) -> FieldElement {
        let [d0, mut d1, mut d2] = self.0;
        let mut c: u64;

        c = (d0 >> 44) as u64;
        let mut h0 = (d0 as u64) & MASK44;
        d1 += u128::from(c);

        c = (d1 >> 44) as u64;
        let mut h1 = (d1 as u64) & MASK44;
        d2 += u128::from(c);

        c = (d2 >> 42) as u64;
        let h2 = (d2 as u64) & MASK42;
        h0 += c * 5;

        c = h0 >> 44;
        h0 &= MASK44;
        h1 += c;

        FieldElement([h0, h1, h2])
    }
}

impl AddAssign for Unreduced {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        let [a0, a1, a2] = &mut self.0;
        let [b0, b1, b2] = rhs.0;
        *a0 += b0;
        *a1 += b1;
        *a2 += b2;
    }
}

#[inline(always)]
const fn mul64(a: u64, b: u64) -> u128 {
    (a as u128) * (b as u128)
}
