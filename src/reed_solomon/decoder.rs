//! Algebraic error correction for a single received block
//!
//! ## Pipeline
//!
//! ```text
//! received r(x)
//!   ↓ syndromes S_i = r(α^(b+i))
//! S(x)
//!   ↓ Euclidean algorithm on (x^e, S(x))
//! σ(x) error locator, ω(x) error evaluator
//!   ↓ Chien search
//! error locations X_i
//!   ↓ Forney
//! error magnitudes Y_i
//! ```

use super::error::DecodeFailure;
use super::galois::GaloisField;
use super::poly::Polynomial;
use log::trace;
use smallvec::SmallVec;
use std::sync::Arc;

/// Error locations or magnitudes for one block; rarely more than a handful
pub type Symbols = SmallVec<[u16; 16]>;

/// Evaluate the received block at the generator roots
///
/// Returns `None` when every syndrome is zero, i.e. the block is a codeword.
/// The returned polynomial has `S_0` as its constant term.
pub fn compute_syndromes(
    field: &Arc<GaloisField>,
    received: &Polynomial,
    parity_symbols: usize,
) -> Option<Polynomial> {
    let mut coefficients = vec![0u16; parity_symbols];
    let mut clean = true;
    for i in 0..parity_symbols {
        let eval = received.evaluate_at(field.exp(i + field.generator_base()));
        coefficients[parity_symbols - 1 - i] = eval;
        if eval != 0 {
            clean = false;
        }
    }

    if clean {
        None
    } else {
        Some(Polynomial::new(Arc::clone(field), coefficients))
    }
}

/// Solve the key equation `σ(x)S(x) ≡ ω(x) mod x^e`
///
/// Runs the extended Euclidean algorithm on `a` and `b` until the remainder
/// degree drops below `r / 2`. Returns `(sigma, omega)` normalised so that
/// `sigma(0) = 1`.
pub fn run_euclidean_algorithm(
    a: &Polynomial,
    b: &Polynomial,
    r: usize,
) -> Result<(Polynomial, Polynomial), DecodeFailure> {
    let field = a.field();
    let (a, b) = if a.degree() < b.degree() { (b, a) } else { (a, b) };

    let mut r_last = a.clone();
    let mut r_cur = b.clone();
    let mut t_last = Polynomial::zero(field);
    let mut t_cur = Polynomial::one(field);

    while r_cur.degree() >= r / 2 {
        let r_last_last = std::mem::replace(&mut r_last, r_cur);
        let t_last_last = std::mem::replace(&mut t_last, t_cur);

        if r_last.is_zero() {
            return Err(DecodeFailure::PrematureZeroRemainder);
        }

        // Divide r_last_last by r_last, keeping quotient and remainder
        r_cur = r_last_last;
        let mut q = Polynomial::zero(field);
        let dlt_inverse = field.inverse(r_last.leading_coefficient())?;
        while r_cur.degree() >= r_last.degree() && !r_cur.is_zero() {
            let degree_diff = r_cur.degree() - r_last.degree();
            let scale = field.multiply(r_cur.leading_coefficient(), dlt_inverse);
            q = q.add_or_subtract(&Polynomial::monomial(field, degree_diff, scale))?;
            r_cur = r_cur.add_or_subtract(&r_last.multiply_by_monomial(degree_diff, scale))?;
        }

        t_cur = q.multiply(&t_last)?.add_or_subtract(&t_last_last)?;

        if r_cur.degree() >= r_last.degree() {
            return Err(DecodeFailure::DegreeConditionViolated {
                remainder: r_cur.degree(),
                divisor: r_last.degree(),
            });
        }
    }

    let sigma_tilde_at_zero = t_cur.coefficient_at(0);
    if sigma_tilde_at_zero == 0 {
        return Err(DecodeFailure::SigmaConstantZero);
    }

    let inverse = field.inverse(sigma_tilde_at_zero)?;
    let sigma = t_cur.multiply_scalar(inverse);
    let omega = r_cur.multiply_scalar(inverse);
    trace!("Error locator {} / evaluator {}", sigma, omega);
    Ok((sigma, omega))
}

/// Chien search: find the error locations `X_i` as inverses of the roots of `σ`
pub fn find_error_locations(error_locator: &Polynomial) -> Result<Symbols, DecodeFailure> {
    let field = error_locator.field();
    let num_errors = error_locator.degree();
    if num_errors == 1 {
        // σ(x) = 1 + X x
        return Ok(SmallVec::from_slice(&[error_locator.coefficient_at(1)]));
    }

    let mut result = Symbols::with_capacity(num_errors);
    for candidate in 1..field.size() {
        if result.len() == num_errors {
            break;
        }
        let candidate = candidate as u16;
        if error_locator.evaluate_at(candidate) == 0 {
            result.push(field.inverse(candidate)?);
        }
    }

    if result.len() != num_errors {
        return Err(DecodeFailure::MissingLocatorRoots {
            expected: num_errors,
            found: result.len(),
        });
    }
    Ok(result)
}

/// Forney's algorithm: error magnitude at each location
pub fn find_error_magnitudes(
    error_evaluator: &Polynomial,
    error_locations: &[u16],
) -> Result<Symbols, DecodeFailure> {
    let field = error_evaluator.field();
    let mut result = Symbols::with_capacity(error_locations.len());

    for (i, &location) in error_locations.iter().enumerate() {
        let xi_inverse = field.inverse(location)?;
        let mut denominator = 1u16;
        for (j, &other) in error_locations.iter().enumerate() {
            if i != j {
                // 1 - X_j X_i^-1, characteristic 2 only
                let term = field.multiply(other, xi_inverse);
                denominator = field.multiply(denominator, GaloisField::add_or_subtract(1, term));
            }
        }

        let mut magnitude = field.multiply(
            error_evaluator.evaluate_at(xi_inverse),
            field.inverse(denominator)?,
        );
        if field.generator_base() != 0 {
            magnitude = field.multiply(magnitude, xi_inverse);
        }
        result.push(magnitude);
    }

    Ok(result)
}

/// Correct `received` in place, returning the corrected symbol offsets
///
/// `received` is highest degree first, so offset 0 holds `x^(n-1)`.
pub fn correct_errors(
    field: &Arc<GaloisField>,
    received: &mut [u16],
    parity_symbols: usize,
) -> Result<Vec<usize>, DecodeFailure> {
    let poly = Polynomial::new(Arc::clone(field), received.to_vec());
    let Some(syndrome) = compute_syndromes(field, &poly, parity_symbols) else {
        return Ok(Vec::new());
    };

    let x_pow_e = Polynomial::monomial(field, parity_symbols, 1);
    let (sigma, omega) = run_euclidean_algorithm(&x_pow_e, &syndrome, parity_symbols)?;
    if sigma.degree() == 0 {
        return Err(DecodeFailure::ConstantErrorLocator);
    }
    let locations = find_error_locations(&sigma)?;
    let magnitudes = find_error_magnitudes(&omega, &locations)?;

    // Resolve every offset before touching the block
    let block_length = received.len();
    let positions = locations
        .iter()
        .map(|&location| {
            let log = field.log(location)?;
            if log >= block_length {
                return Err(DecodeFailure::PositionOutOfRange { log, block_length });
            }
            Ok(block_length - 1 - log)
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (&position, &magnitude) in positions.iter().zip(magnitudes.iter()) {
        received[position] = GaloisField::add_or_subtract(received[position], magnitude);
    }

    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gf() -> Arc<GaloisField> {
        Arc::new(GaloisField::gf256())
    }

    #[test]
    fn test_zero_syndromes_for_codeword() {
        let field = gf();
        // (x + α^0)(x + α^1) is a codeword of the e = 2 code
        let a0 = Polynomial::new(Arc::clone(&field), vec![1, field.exp(0)]);
        let a1 = Polynomial::new(Arc::clone(&field), vec![1, field.exp(1)]);
        let codeword = a0.multiply(&a1).unwrap();
        assert!(compute_syndromes(&field, &codeword, 2).is_none());
    }

    #[test]
    fn test_euclidean_algorithm_two_errors() {
        let field = gf();
        let e = 4;
        // (X_j, Y_j) for two errors
        let errors = [(field.exp(3), 0x21u16), (field.exp(9), 0x7Cu16)];

        // S_i = sum of Y_j X_j^i, S_0 as the constant term
        let mut coefficients = vec![0u16; e];
        for i in 0..e {
            coefficients[e - 1 - i] = errors.iter().fold(0, |acc, &(x, y)| {
                let x_pow = field.exp(field.log(x).unwrap() * i);
                GaloisField::add_or_subtract(acc, field.multiply(y, x_pow))
            });
        }
        let syndrome = Polynomial::new(Arc::clone(&field), coefficients);
        let x_pow_e = Polynomial::monomial(&field, e, 1);

        let (sigma, omega) = run_euclidean_algorithm(&x_pow_e, &syndrome, e).unwrap();

        // σ(x) = (1 + X1 x)(1 + X2 x)
        let expected_sigma = errors.iter().fold(Polynomial::one(&field), |acc, &(x, _)| {
            acc.multiply(&Polynomial::new(Arc::clone(&field), vec![x, 1]))
                .unwrap()
        });
        assert_eq!(sigma, expected_sigma);
        assert_eq!(sigma.coefficient_at(0), 1);

        // ω(x) = σ(x)S(x) mod x^e
        let product = sigma.multiply(&syndrome).unwrap();
        let low: Vec<u16> = (0..e).rev().map(|p| product.coefficient_at(p)).collect();
        assert_eq!(omega, Polynomial::new(Arc::clone(&field), low));
        assert!(omega.degree() < e / 2);

        let locations = [errors[0].0, errors[1].0];
        let magnitudes = find_error_magnitudes(&omega, &locations).unwrap();
        assert_eq!(magnitudes.as_slice(), &[errors[0].1, errors[1].1]);
    }

    #[test]
    fn test_single_parity_symbol_fails_degree_condition() {
        let field = gf();
        // r(1) = 5, so the only syndrome is non-zero
        let mut block = vec![0u16, 0, 0, 5];
        assert_eq!(
            correct_errors(&field, &mut block, 1),
            Err(DecodeFailure::DegreeConditionViolated {
                remainder: 0,
                divisor: 0
            })
        );
        assert_eq!(block, vec![0, 0, 0, 5]);
    }

    #[test]
    fn test_constant_locator_with_nonzero_syndromes_fails() {
        let field = gf();
        // Divisible by (x + α^2)(x + α^3) only: S_2 = S_3 = 0 but S_0 != 0
        let a2 = Polynomial::new(Arc::clone(&field), vec![1, field.exp(2)]);
        let a3 = Polynomial::new(Arc::clone(&field), vec![1, field.exp(3)]);
        let partial = a2.multiply(&a3).unwrap();
        let mut block = vec![0u16; 15 - partial.coefficients().len()];
        block.extend_from_slice(partial.coefficients());
        let original = block.clone();

        let received = Polynomial::new(Arc::clone(&field), block.clone());
        assert!(compute_syndromes(&field, &received, 4).is_some());
        assert_eq!(
            correct_errors(&field, &mut block, 4),
            Err(DecodeFailure::ConstantErrorLocator)
        );
        assert_eq!(block, original);
    }

    #[test]
    fn test_single_error_located_directly() {
        let field = gf();
        // σ(x) = 1 + α^3 x
        let sigma = Polynomial::new(Arc::clone(&field), vec![field.exp(3), 1]);
        let locations = find_error_locations(&sigma).unwrap();
        assert_eq!(locations.as_slice(), &[field.exp(3)]);
    }

    #[test]
    fn test_chien_search_finds_two_roots() {
        let field = gf();
        // σ(x) = (1 + X1 x)(1 + X2 x)
        let x1 = field.exp(2);
        let x2 = field.exp(5);
        let f1 = Polynomial::new(Arc::clone(&field), vec![x1, 1]);
        let f2 = Polynomial::new(Arc::clone(&field), vec![x2, 1]);
        let sigma = f1.multiply(&f2).unwrap();

        let mut locations = find_error_locations(&sigma).unwrap();
        locations.sort_unstable();
        let mut expected = [x1, x2];
        expected.sort_unstable();
        assert_eq!(locations.as_slice(), &expected);
    }

    #[test]
    fn test_chien_search_reports_missing_roots() {
        let field = gf();
        // x^2 + x + α has no roots once it is irreducible; find one such α
        let irreducible = (1..256u16)
            .map(|c| Polynomial::new(Arc::clone(&field), vec![1, 1, c]))
            .find(|p| (1..256u16).all(|x| p.evaluate_at(x) != 0))
            .unwrap();

        assert_eq!(
            find_error_locations(&irreducible),
            Err(DecodeFailure::MissingLocatorRoots {
                expected: 2,
                found: 0
            })
        );
    }

    #[test]
    fn test_correct_single_error_in_codeword() {
        let field = gf();
        let e = 4;
        // Generator for e = 4, base 0, is itself a codeword
        let mut g = Polynomial::one(&field);
        for i in 0..e {
            let factor = Polynomial::new(Arc::clone(&field), vec![1, field.exp(i)]);
            g = g.multiply(&factor).unwrap();
        }
        let mut block = vec![0u16; 9 - g.coefficients().len()];
        block.extend_from_slice(g.coefficients());
        let original = block.clone();

        block[2] ^= 0x5A;
        let positions = correct_errors(&field, &mut block, e).unwrap();
        assert_eq!(positions, vec![2]);
        assert_eq!(block, original);
    }
}
