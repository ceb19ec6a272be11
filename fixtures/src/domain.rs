//! Numeric domains and randomized vector synthesis.
//!
//! Every generated fixture vector is drawn from one [`NumericDomain`]. Integer
//! domains sample uniformly over a closed interval; real domains sample
//! uniformly over `[-200, 200]` and round to the domain's precision so the
//! emitted literal compares exactly against the tolerance in the test case.

use std::ops::RangeInclusive;

use rand::distributions::{Distribution, Uniform};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Closed sampling interval for [`NumericDomain::SignedInt`].
pub const SIGNED_RANGE: RangeInclusive<i32> = -512..=512;

/// Closed sampling interval for [`NumericDomain::UnsignedInt`].
pub const UNSIGNED_RANGE: RangeInclusive<u32> = 0..=1024;

/// Closed sampling interval shared by every real and complex domain.
pub const REAL_RANGE: RangeInclusive<f64> = -200.0..=200.0;

/// Decimal places kept for single-precision values.
pub const FLOAT_DECIMALS: u32 = 3;

/// Decimal places kept for double-precision values.
pub const DOUBLE_DECIMALS: u32 = 9;

/// The kind of scalar a fixture vector holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericDomain {
    /// Signed integers in `[-512, 512]`.
    SignedInt,
    /// Unsigned integers in `[0, 1024]`.
    UnsignedInt,
    /// Single-precision reals, 3 decimal places.
    Float,
    /// Double-precision reals, 9 decimal places.
    Double,
    /// Single-precision complex numbers as `(re, im)` pairs.
    ComplexFloat,
    /// Double-precision complex numbers as `(re, im)` pairs.
    ComplexDouble,
}

impl NumericDomain {
    /// All domains, in the order their placeholders appear in templates.
    pub const ALL: [NumericDomain; 6] = [
        NumericDomain::SignedInt,
        NumericDomain::UnsignedInt,
        NumericDomain::Float,
        NumericDomain::Double,
        NumericDomain::ComplexFloat,
        NumericDomain::ComplexDouble,
    ];

    /// Stem of this domain's template placeholders (`ivec` → `ivecstr`, `ivec_x`).
    pub fn placeholder_stem(self) -> &'static str {
        match self {
            NumericDomain::SignedInt => "ivec",
            NumericDomain::UnsignedInt => "uvec",
            NumericDomain::Float => "fvec",
            NumericDomain::Double => "dvec",
            NumericDomain::ComplexFloat => "cfvec",
            NumericDomain::ComplexDouble => "cdvec",
        }
    }

    /// Placeholder receiving the full vector literal.
    pub fn vector_placeholder(self) -> String {
        format!("{}str", self.placeholder_stem())
    }

    /// Placeholder receiving the selected component's value.
    pub fn component_placeholder(self) -> String {
        format!("{}_x", self.placeholder_stem())
    }

    /// Rounding precision, or `None` for integer domains.
    pub fn decimals(self) -> Option<u32> {
        match self {
            NumericDomain::SignedInt | NumericDomain::UnsignedInt => None,
            NumericDomain::Float | NumericDomain::ComplexFloat => Some(FLOAT_DECIMALS),
            NumericDomain::Double | NumericDomain::ComplexDouble => Some(DOUBLE_DECIMALS),
        }
    }

    /// True for the `(re, im)` pair domains.
    pub fn is_complex(self) -> bool {
        matches!(
            self,
            NumericDomain::ComplexFloat | NumericDomain::ComplexDouble
        )
    }
}

/// One sampled element of a fixture vector.
///
/// Single-precision reals are carried as `f64` after rounding; their literal
/// text is the shortest decimal of the rounded value either way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    /// Signed integer.
    Int(i32),
    /// Unsigned integer.
    UInt(u32),
    /// Rounded real.
    Real(f64),
    /// Rounded complex number, `(re, im)`.
    Complex(f64, f64),
}

/// An immutable fixture vector: `N` scalars of one domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    domain: NumericDomain,
    values: Vec<Scalar>,
}

impl Vector {
    /// The domain every element was drawn from.
    pub fn domain(&self) -> NumericDomain {
        self.domain
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the vector has no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Element at `index`.
    pub fn get(&self, index: usize) -> Option<Scalar> {
        self.values.get(index).copied()
    }

    /// All elements in order.
    pub fn values(&self) -> &[Scalar] {
        &self.values
    }
}

/// Rounds `value` to `decimals` decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Randomized vector source, one method per [`NumericDomain`].
///
/// Values are sampled independently per element; nothing is cached between
/// calls.
pub struct Synthesizer<R> {
    rng: R,
}

impl Synthesizer<ChaCha8Rng> {
    /// Synthesizer seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }

    /// Synthesizer producing a reproducible stream for `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Synthesizer<R> {
    /// Wraps an existing random source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Samples an `n`-element vector from `domain`.
    pub fn vector(&mut self, domain: NumericDomain, n: usize) -> Vector {
        let values = match domain {
            NumericDomain::SignedInt => {
                let dist = Uniform::from(SIGNED_RANGE);
                (0..n).map(|_| Scalar::Int(dist.sample(&mut self.rng))).collect()
            }
            NumericDomain::UnsignedInt => {
                let dist = Uniform::from(UNSIGNED_RANGE);
                (0..n).map(|_| Scalar::UInt(dist.sample(&mut self.rng))).collect()
            }
            NumericDomain::Float | NumericDomain::Double => {
                let decimals = real_decimals(domain);
                (0..n)
                    .map(|_| Scalar::Real(self.real(decimals)))
                    .collect()
            }
            NumericDomain::ComplexFloat | NumericDomain::ComplexDouble => {
                let decimals = real_decimals(domain);
                (0..n)
                    .map(|_| {
                        let re = self.real(decimals);
                        let im = self.real(decimals);
                        Scalar::Complex(re, im)
                    })
                    .collect()
            }
        };
        Vector { domain, values }
    }

    /// Signed-integer vector.
    pub fn ivec(&mut self, n: usize) -> Vector {
        self.vector(NumericDomain::SignedInt, n)
    }

    /// Unsigned-integer vector.
    pub fn uvec(&mut self, n: usize) -> Vector {
        self.vector(NumericDomain::UnsignedInt, n)
    }

    /// Single-precision vector.
    pub fn fvec(&mut self, n: usize) -> Vector {
        self.vector(NumericDomain::Float, n)
    }

    /// Double-precision vector.
    pub fn dvec(&mut self, n: usize) -> Vector {
        self.vector(NumericDomain::Double, n)
    }

    /// Single-precision complex vector.
    pub fn cfvec(&mut self, n: usize) -> Vector {
        self.vector(NumericDomain::ComplexFloat, n)
    }

    /// Double-precision complex vector.
    pub fn cdvec(&mut self, n: usize) -> Vector {
        self.vector(NumericDomain::ComplexDouble, n)
    }

    fn real(&mut self, decimals: u32) -> f64 {
        let raw = self.rng.gen_range(REAL_RANGE);
        round_to(raw, decimals)
    }
}

fn real_decimals(domain: NumericDomain) -> u32 {
    domain.decimals().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vectors_have_requested_length_and_domain() {
        let mut synth = Synthesizer::seeded(7);
        for domain in NumericDomain::ALL {
            for n in 0..=5 {
                let v = synth.vector(domain, n);
                assert_eq!(v.len(), n);
                assert_eq!(v.domain(), domain);
            }
        }
    }

    #[test]
    fn element_variant_matches_domain() {
        let mut synth = Synthesizer::seeded(11);
        assert!(matches!(synth.ivec(1).get(0), Some(Scalar::Int(_))));
        assert!(matches!(synth.uvec(1).get(0), Some(Scalar::UInt(_))));
        assert!(matches!(synth.fvec(1).get(0), Some(Scalar::Real(_))));
        assert!(matches!(synth.dvec(1).get(0), Some(Scalar::Real(_))));
        assert!(matches!(synth.cfvec(1).get(0), Some(Scalar::Complex(_, _))));
        assert!(matches!(synth.cdvec(1).get(0), Some(Scalar::Complex(_, _))));
    }

    #[test]
    fn seeded_streams_repeat() {
        let a = Synthesizer::seeded(42).dvec(4);
        let b = Synthesizer::seeded(42).dvec(4);
        assert_eq!(a, b);
    }

    #[test]
    fn rounding_keeps_requested_places() {
        assert_eq!(round_to(12.34567, 3), 12.346);
        assert_eq!(round_to(-0.0004, 3), -0.0);
        assert_eq!(round_to(199.9999999999, 9), 200.0);
    }

    #[test]
    fn placeholder_names() {
        assert_eq!(NumericDomain::SignedInt.vector_placeholder(), "ivecstr");
        assert_eq!(NumericDomain::ComplexDouble.component_placeholder(), "cdvec_x");
        assert_eq!(NumericDomain::UnsignedInt.decimals(), None);
        assert_eq!(NumericDomain::ComplexFloat.decimals(), Some(3));
    }
}
