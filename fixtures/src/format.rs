//! Brace-initializer literals for fixture values.
//!
//! Vectors render as `{v0, v1, ...}` and complex vectors as
//! `{{re0, im0}, {re1, im1}, ...}`, matching C++ list-initialization so the
//! substituted text compiles unmodified.

use std::fmt::{self, Display};

use crate::domain::{Scalar, Vector};

/// Renders `items` as a brace-delimited, comma-separated list.
pub fn brace_list<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let body: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
    format!("{{{}}}", body.join(", "))
}

/// Shortest round-trip decimal for `value`, always marked as floating point.
///
/// Integral values keep a trailing `.0` (`100.0`, not `100`) and very small or
/// very large magnitudes use exponent notation.
pub fn real_literal(value: f64) -> String {
    format!("{value:?}")
}

impl Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::UInt(v) => write!(f, "{v}"),
            Scalar::Real(v) => f.write_str(&real_literal(v)),
            Scalar::Complex(re, im) => {
                f.write_str(&brace_list([real_literal(re), real_literal(im)]))
            }
        }
    }
}

impl Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&brace_list(self.values()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Synthesizer;

    #[test]
    fn empty_list() {
        let items: [i32; 0] = [];
        assert_eq!(brace_list(items), "{}");
    }

    #[test]
    fn integer_list() {
        assert_eq!(brace_list([139, -79]), "{139, -79}");
    }

    #[test]
    fn real_literals_keep_a_decimal_point() {
        assert_eq!(real_literal(100.0), "100.0");
        assert_eq!(real_literal(-92.02), "-92.02");
        assert_eq!(real_literal(191.993), "191.993");
        assert_eq!(real_literal(-0.0), "-0.0");
    }

    #[test]
    fn scalar_display() {
        assert_eq!(Scalar::Int(-512).to_string(), "-512");
        assert_eq!(Scalar::UInt(1024).to_string(), "1024");
        assert_eq!(Scalar::Real(-45.886).to_string(), "-45.886");
        assert_eq!(Scalar::Complex(1.5, -2.0).to_string(), "{1.5, -2.0}");
    }

    #[test]
    fn complex_vector_nests_pairs() {
        let mut synth = Synthesizer::seeded(3);
        let v = synth.cfvec(3);
        let text = v.to_string();
        assert!(text.starts_with("{{"));
        assert!(text.ends_with("}}"));
        assert_eq!(text.matches('{').count(), 4);
        assert_eq!(text.matches('}').count(), 4);
    }
}
