//! Immutable polynomials over a Galois field
//!
//! Coefficients are stored highest degree first. Every operation returns a new
//! value; leading zeros are stripped on construction so the leading
//! coefficient is non-zero unless the polynomial is the canonical zero `[0]`.

use super::error::AlgebraError;
use super::galois::GaloisField;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct Polynomial {
    field: Arc<GaloisField>,
    coefficients: Vec<u16>,
}

impl Polynomial {
    /// Create a polynomial from coefficients ordered highest degree first
    pub fn new(field: Arc<GaloisField>, mut coefficients: Vec<u16>) -> Self {
        let first_non_zero = coefficients.iter().position(|&c| c != 0);
        match first_non_zero {
            None => coefficients = vec![0],
            Some(0) => {}
            Some(n) => {
                coefficients.drain(..n);
            }
        }
        Self {
            field,
            coefficients,
        }
    }

    /// The zero polynomial `[0]`
    pub fn zero(field: &Arc<GaloisField>) -> Self {
        Self {
            field: Arc::clone(field),
            coefficients: vec![0],
        }
    }

    /// The unit polynomial `[1]`
    pub fn one(field: &Arc<GaloisField>) -> Self {
        Self {
            field: Arc::clone(field),
            coefficients: vec![1],
        }
    }

    /// `coefficient * x^degree`
    pub fn monomial(field: &Arc<GaloisField>, degree: usize, coefficient: u16) -> Self {
        if coefficient == 0 {
            return Self::zero(field);
        }
        let mut coefficients = vec![0; degree + 1];
        coefficients[0] = coefficient;
        Self {
            field: Arc::clone(field),
            coefficients,
        }
    }

    pub fn field(&self) -> &Arc<GaloisField> {
        &self.field
    }

    /// Coefficients, highest degree first
    pub fn coefficients(&self) -> &[u16] {
        &self.coefficients
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients[0] == 0
    }

    /// Coefficient of `x^power`, zero above the degree
    pub fn coefficient_at(&self, power: usize) -> u16 {
        if power > self.degree() {
            return 0;
        }
        self.coefficients[self.coefficients.len() - 1 - power]
    }

    /// Coefficient of the highest-degree term
    pub fn leading_coefficient(&self) -> u16 {
        self.coefficients[0]
    }

    /// Evaluate at `x` using Horner's scheme
    pub fn evaluate_at(&self, x: u16) -> u16 {
        if x == 0 {
            return self.coefficient_at(0);
        }
        if x == 1 {
            // Sum of coefficients; characteristic 2
            return self
                .coefficients
                .iter()
                .fold(0, |acc, &c| GaloisField::add_or_subtract(acc, c));
        }

        self.coefficients[1..]
            .iter()
            .fold(self.coefficients[0], |acc, &c| {
                GaloisField::add_or_subtract(self.field.multiply(x, acc), c)
            })
    }

    /// Sum (equivalently difference) of two polynomials
    pub fn add_or_subtract(&self, other: &Polynomial) -> Result<Polynomial, AlgebraError> {
        self.check_same_field(other)?;
        if self.is_zero() {
            return Ok(other.clone());
        }
        if other.is_zero() {
            return Ok(self.clone());
        }

        let (smaller, larger) = if self.coefficients.len() > other.coefficients.len() {
            (&other.coefficients, &self.coefficients)
        } else {
            (&self.coefficients, &other.coefficients)
        };

        let length_diff = larger.len() - smaller.len();
        let mut sum = larger.clone();
        for (slot, &c) in sum[length_diff..].iter_mut().zip(smaller.iter()) {
            *slot = GaloisField::add_or_subtract(*slot, c);
        }

        Ok(Polynomial::new(Arc::clone(&self.field), sum))
    }

    /// Product of two polynomials
    pub fn multiply(&self, other: &Polynomial) -> Result<Polynomial, AlgebraError> {
        self.check_same_field(other)?;
        if self.is_zero() || other.is_zero() {
            return Ok(Self::zero(&self.field));
        }

        let a = &self.coefficients;
        let b = &other.coefficients;
        let mut product = vec![0u16; a.len() + b.len() - 1];
        for (i, &a_coeff) in a.iter().enumerate() {
            for (j, &b_coeff) in b.iter().enumerate() {
                product[i + j] = GaloisField::add_or_subtract(
                    product[i + j],
                    self.field.multiply(a_coeff, b_coeff),
                );
            }
        }

        Ok(Polynomial::new(Arc::clone(&self.field), product))
    }

    /// Multiply every coefficient by `scalar`
    pub fn multiply_scalar(&self, scalar: u16) -> Polynomial {
        match scalar {
            0 => Self::zero(&self.field),
            1 => self.clone(),
            _ => {
                let product = self
                    .coefficients
                    .iter()
                    .map(|&c| self.field.multiply(c, scalar))
                    .collect();
                Polynomial::new(Arc::clone(&self.field), product)
            }
        }
    }

    /// Multiply by `coefficient * x^degree`
    pub fn multiply_by_monomial(&self, degree: usize, coefficient: u16) -> Polynomial {
        if coefficient == 0 {
            return Self::zero(&self.field);
        }

        let mut product = Vec::with_capacity(self.coefficients.len() + degree);
        product.extend(
            self.coefficients
                .iter()
                .map(|&c| self.field.multiply(c, coefficient)),
        );
        product.resize(self.coefficients.len() + degree, 0);
        Polynomial::new(Arc::clone(&self.field), product)
    }

    /// Long division, returning `(quotient, remainder)`
    pub fn divide(&self, divisor: &Polynomial) -> Result<(Polynomial, Polynomial), AlgebraError> {
        self.check_same_field(divisor)?;
        if divisor.is_zero() {
            return Err(AlgebraError::DivideByZero);
        }

        let mut quotient = Self::zero(&self.field);
        let mut remainder = self.clone();

        let inverse_leading = self.field.inverse(divisor.leading_coefficient())?;

        while remainder.degree() >= divisor.degree() && !remainder.is_zero() {
            let degree_diff = remainder.degree() - divisor.degree();
            let scale = self
                .field
                .multiply(remainder.leading_coefficient(), inverse_leading);
            let term = divisor.multiply_by_monomial(degree_diff, scale);
            let iteration_quotient = Self::monomial(&self.field, degree_diff, scale);
            quotient = quotient.add_or_subtract(&iteration_quotient)?;
            remainder = remainder.add_or_subtract(&term)?;
        }

        Ok((quotient, remainder))
    }

    fn check_same_field(&self, other: &Polynomial) -> Result<(), AlgebraError> {
        if Arc::ptr_eq(&self.field, &other.field) || self.field == other.field {
            Ok(())
        } else {
            Err(AlgebraError::FieldMismatch)
        }
    }
}

impl PartialEq for Polynomial {
    fn eq(&self, other: &Self) -> bool {
        self.coefficients == other.coefficients
            && (Arc::ptr_eq(&self.field, &other.field) || self.field == other.field)
    }
}

impl Eq for Polynomial {}

impl fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Polynomial")
            .field("field_size", &self.field.size())
            .field("coefficients", &self.coefficients)
            .finish()
    }
}

// Display as a sum of terms, e.g. `3x^2 + x + 7`
impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        for power in (0..=self.degree()).rev() {
            let c = self.coefficient_at(power);
            if c == 0 {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            if c != 1 || power == 0 {
                write!(f, "{}", c)?;
            }
            match power {
                0 => {}
                1 => write!(f, "x")?,
                _ => write!(f, "x^{}", power)?,
            }
        }
        Ok(())
    }
}
