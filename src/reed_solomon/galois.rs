//! Galois Field GF(2^m) arithmetic for Reed-Solomon coding
//!
//! ## Field Construction
//!
//! A field is described by a primitive polynomial given as a bitmask, where the
//! lowest bit is the x^0 term. The byte field used by the coder is
//!
//! - **GF(2^8)**: 0x11D (x⁸ + x⁴ + x³ + x² + 1)
//!
//! Multiplication, division and inversion go through exponential/logarithm
//! tables built once per field. Addition and subtraction are both XOR.
//!
//! The generator base `b` selects the first root of the generator polynomial
//! `g(x) = (x + α^b)(x + α^(b+1))...(x + α^(b+e-1))`.

use super::error::{AlgebraError, ConfigError};

/// GF(2^8) primitive polynomial: 0x11D (x⁸ + x⁴ + x³ + x² + 1)
pub const GF256_PRIMITIVE: u32 = 0x011D;

/// Number of elements in the byte field
pub const GF256_SIZE: usize = 256;

const MAX_FIELD_SIZE: usize = 1 << 16;

/// Finite field with precomputed exponential and logarithm tables
#[derive(Debug, Clone)]
pub struct GaloisField {
    /// `exp[i] = α^i`; the final entry is the wraparound `α^(size-1) = 1`
    exp: Vec<u16>,
    /// `log[exp[i]] = i`; `log[0]` is never read
    log: Vec<u16>,
    size: usize,
    primitive: u32,
    generator_base: usize,
}

impl GaloisField {
    /// Build a field of `size` elements reduced by `primitive`
    pub fn new(primitive: u32, size: usize, generator_base: usize) -> Result<Self, ConfigError> {
        if !size.is_power_of_two() || !(2..=MAX_FIELD_SIZE).contains(&size) {
            return Err(ConfigError::InvalidFieldSize(size));
        }
        let bits = size.trailing_zeros();
        if primitive >> bits != 1 {
            return Err(ConfigError::PrimitiveDegreeMismatch { primitive, size });
        }
        if generator_base > 1 {
            return Err(ConfigError::InvalidGeneratorBase(generator_base));
        }

        let (field, is_primitive) = Self::with_tables(primitive, size, generator_base);
        if !is_primitive {
            return Err(ConfigError::NotPrimitive { primitive, size });
        }
        Ok(field)
    }

    /// The byte field GF(256) with primitive 0x11D and generator base 0
    pub fn gf256() -> Self {
        let (field, is_primitive) = Self::with_tables(GF256_PRIMITIVE, GF256_SIZE, 0);
        debug_assert!(is_primitive);
        field
    }

    /// Build the exp/log tables, reporting whether every non-zero element
    /// appeared exactly once before the powers of α wrapped around
    fn with_tables(primitive: u32, size: usize, generator_base: usize) -> (Self, bool) {
        let mut exp = vec![0u16; size];
        let mut log = vec![0u16; size];
        let mut seen = vec![false; size];
        let mut is_primitive = true;
        let mut x = 1u32;

        for (i, slot) in exp.iter_mut().enumerate() {
            *slot = x as u16;
            if i < size - 1 {
                if x == 0 || seen[x as usize] {
                    is_primitive = false;
                }
                seen[x as usize] = true;
                log[x as usize] = i as u16;
            }

            x <<= 1;
            if x >= size as u32 {
                x ^= primitive;
                x &= size as u32 - 1;
            }
        }

        let field = GaloisField {
            exp,
            log,
            size,
            primitive,
            generator_base,
        };
        (field, is_primitive)
    }

    /// Addition and subtraction coincide in characteristic 2
    #[inline]
    pub fn add_or_subtract(a: u16, b: u16) -> u16 {
        a ^ b
    }

    /// α raised to `power`, reduced modulo the multiplicative group order
    #[inline]
    pub fn exp(&self, power: usize) -> u16 {
        self.exp[power % (self.size - 1)]
    }

    /// Discrete logarithm base α
    #[inline]
    pub fn log(&self, a: u16) -> Result<usize, AlgebraError> {
        if a == 0 {
            return Err(AlgebraError::LogOfZero);
        }
        Ok(self.log[a as usize] as usize)
    }

    /// Multiplicative inverse `a^-1`
    #[inline]
    pub fn inverse(&self, a: u16) -> Result<u16, AlgebraError> {
        if a == 0 {
            return Err(AlgebraError::InverseOfZero);
        }
        Ok(self.exp[self.size - 1 - self.log[a as usize] as usize])
    }

    /// Multiply two field elements
    #[inline]
    pub fn multiply(&self, a: u16, b: u16) -> u16 {
        if a == 0 || b == 0 {
            return 0;
        }
        debug_assert!((a as usize) < self.size && (b as usize) < self.size);

        let log_sum = (self.log[a as usize] as usize + self.log[b as usize] as usize)
            % (self.size - 1);
        self.exp[log_sum]
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn primitive(&self) -> u32 {
        self.primitive
    }

    pub fn generator_base(&self) -> usize {
        self.generator_base
    }
}

impl Default for GaloisField {
    fn default() -> Self {
        Self::gf256()
    }
}

// Tables are a pure function of the parameters
impl PartialEq for GaloisField {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self.primitive == other.primitive
            && self.generator_base == other.generator_base
    }
}

impl Eq for GaloisField {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gf256_tables_match_known_values() {
        let field = GaloisField::gf256();

        assert_eq!(field.exp(0), 1);
        assert_eq!(field.exp(1), 2);
        assert_eq!(field.exp(7), 128);
        // α^8 = x^4 + x^3 + x^2 + 1
        assert_eq!(field.exp(8), 0x1D);
        assert_eq!(field.exp(255), 1);
        assert_eq!(field.log(2).unwrap(), 1);
        assert_eq!(field.log(0x1D).unwrap(), 8);
    }

    #[test]
    fn test_new_matches_gf256_shortcut() {
        let built = GaloisField::new(GF256_PRIMITIVE, GF256_SIZE, 0).unwrap();
        let shortcut = GaloisField::gf256();

        assert_eq!(built, shortcut);
        assert_eq!(built.exp, shortcut.exp);
        assert_eq!(built.log, shortcut.log);
    }

    #[test]
    fn test_inverse_round_trip() {
        let field = GaloisField::gf256();
        for a in 1..=255u16 {
            let inv = field.inverse(a).unwrap();
            assert_eq!(field.multiply(a, inv), 1, "a = {a}");
        }
    }

    #[test]
    fn test_zero_has_no_inverse_or_log() {
        let field = GaloisField::gf256();
        assert_eq!(field.inverse(0), Err(AlgebraError::InverseOfZero));
        assert_eq!(field.log(0), Err(AlgebraError::LogOfZero));
    }

    #[test]
    fn test_multiply_by_zero() {
        let field = GaloisField::gf256();
        assert_eq!(field.multiply(0, 77), 0);
        assert_eq!(field.multiply(77, 0), 0);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert_eq!(
            GaloisField::new(0x11D, 255, 0),
            Err(ConfigError::InvalidFieldSize(255))
        );
        assert_eq!(
            GaloisField::new(0x11D, 512, 0),
            Err(ConfigError::PrimitiveDegreeMismatch {
                primitive: 0x11D,
                size: 512
            })
        );
        assert_eq!(
            GaloisField::new(0x11D, 256, 2),
            Err(ConfigError::InvalidGeneratorBase(2))
        );
        // x^8 alone reduces α^8 to zero
        assert_eq!(
            GaloisField::new(0x100, 256, 0),
            Err(ConfigError::NotPrimitive {
                primitive: 0x100,
                size: 256
            })
        );
        // x^8 + 1 = (x + 1)^8 is reducible
        assert_eq!(
            GaloisField::new(0x101, 256, 0),
            Err(ConfigError::NotPrimitive {
                primitive: 0x101,
                size: 256
            })
        );
    }

    #[test]
    fn test_small_fields() {
        // GF(16) with x^4 + x + 1
        let field = GaloisField::new(0x13, 16, 1).unwrap();
        assert_eq!(field.size(), 16);
        assert_eq!(field.generator_base(), 1);
        for a in 1..16u16 {
            assert_eq!(field.multiply(a, field.inverse(a).unwrap()), 1);
        }
    }
}
