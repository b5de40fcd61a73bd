mod generic;
mod wide;

cfg_if::cfg_if! {
    if #[cfg(feature = "soft")] {
        use generic as imp;
    } else if #[cfg(target_pointer_width = "64")] {
        use wide as imp;
    } else {
        use generic as imp;
    }
}

/// An element in the field
///
/// ```text
/// 2^130 - 5
/// ```
pub(crate) use imp::FieldElement;

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, RngCore, SeedableRng};

    use super::{generic, wide};

    const CLAMP: u128 = 0x0fff_fffc_0fff_fffc_0fff_fffc_0fff_ffff;

    fn random_u128(rng: &mut StdRng) -> u128 {
        let mut b = [0u8; 16];
        rng.fill_bytes(&mut b);
        u128::from_le_bytes(b)
    }

    #[test]
    fn test_limb_widths_agree() {
        let mut rng = StdRng::seed_from_u64(1305);
        for i in 0..2_000 {
            let r = random_u128(&mut rng) & CLAMP;
            let s = random_u128(&mut rng);

            let r26 = generic::FieldElement::from_u128(r);
            let r44 = wide::FieldElement::from_u128(r);
            let mut acc26 = generic::FieldElement::default();
            let mut acc44 = wide::FieldElement::default();

            for _ in 0..(i % 9) {
                let mut block = [0u8; 16];
                rng.fill_bytes(&mut block);
                acc26 = (acc26 + generic::FieldElement::from_block(&block)) * r26;
                acc44 = (acc44 + wide::FieldElement::from_block(&block)) * r44;
            }
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut block);
            acc26 = (acc26 + generic::FieldElement::from_padded(&block)) * r26;
            acc44 = (acc44 + wide::FieldElement::from_padded(&block)) * r44;

            assert_eq!(acc26.finalize(s), acc44.finalize(s), "#{i}");
        }
    }

    #[test]
    fn test_unclamped_products_agree() {
        // Powers of r are not clamped, so multiply arbitrary
        // partially reduced elements.
        let mut rng = StdRng::seed_from_u64(8439);
        for i in 0..2_000 {
            let a = random_u128(&mut rng);
            let b = random_u128(&mut rng);

            let mut x26 = generic::FieldElement::from_u128(a);
            let mut x44 = wide::FieldElement::from_u128(a);
            let y26 = generic::FieldElement::from_u128(b);
            let y44 = wide::FieldElement::from_u128(b);
            for _ in 0..4 {
                x26 *= x26 + y26;
                x44 *= x44 + y44;
            }
            assert_eq!(x26.finalize(0), x44.finalize(0), "#{i}");
        }
    }

    #[test]
    fn test_finalize_reduces_modulus() {
        // p = 2^130 - 5 is congruent to zero, and p + 1 to one.
        // (2^129 - 1) + 2 * (2^128 - 4) + 4 = 2^130 - 5.
        let lo = [0xffu8; 16];
        let mut hi = [0xffu8; 16];
        hi[0] = 0xfc;

        let p26 = {
            use generic::FieldElement as Fe;
            Fe::from_block(&lo) + Fe::from_u128(u128::from_le_bytes(hi)) * Fe::from_u128(2)
                + Fe::from_u128(4)
        };
        let p44 = {
            use wide::FieldElement as Fe;
            Fe::from_block(&lo) + Fe::from_u128(u128::from_le_bytes(hi)) * Fe::from_u128(2)
                + Fe::from_u128(4)
        };
        let one26 = generic::FieldElement::from_u128(1);
        let one44 = wide::FieldElement::from_u128(1);

        assert_eq!((p26 * one26).finalize(0), [0u8; 16]);
        assert_eq!((p44 * one44).finalize(0), [0u8; 16]);
        assert_eq!(((p26 + one26) * one26).finalize(0), 1u128.to_le_bytes());
        assert_eq!(((p44 + one44) * one44).finalize(0), 1u128.to_le_bytes());
    }
}
