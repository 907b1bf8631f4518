use std::cmp::Ordering;
use std::fmt;

/// Complex number ordered by real part, then by imaginary part.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    real: f64,
    imag: f64,
}

impl Complex {
    pub fn new(real: f64, imag: f64) -> Self {
        Self { real, imag }
    }

    pub fn real(&self) -> f64 {
        self.real
    }

    pub fn imag(&self) -> f64 {
        self.imag
    }
}

impl PartialOrd for Complex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.real.partial_cmp(&other.real) {
            Some(Ordering::Equal) => self.imag.partial_cmp(&other.imag),
            ordering => ordering,
        }
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}i", self.real, self.imag)
    }
}

impl From<(f64, f64)> for Complex {
    fn from((real, imag): (f64, f64)) -> Self {
        Self::new(real, imag)
    }
}
