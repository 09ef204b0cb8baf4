use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NeuzError;

/// Nonlinearity attached to a neuron, paired with its derivative.
///
/// A neuron with no activator at all is an input-layer passthrough; that is
/// distinct from `Identity`, which still sums bias and weighted inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Activator {
    Identity,
    Step,
    /// Logistic curve with slope 1 at the origin: `1 / (1 + e^(-4x))`.
    Sigmoid,
    ReLU,
    /// Smooth ReLU: `0.5 * (x + sqrt(x² + 1))`.
    BluntReLU,
    Softplus,
}

/// Name → activator lookup table. New activators must be registered here to
/// be resolvable from a model file.
static REGISTRY: [(&str, Activator); 6] = [
    ("identity", Activator::Identity),
    ("step", Activator::Step),
    ("sigmoid", Activator::Sigmoid),
    ("relu", Activator::ReLU),
    ("bluntrelu", Activator::BluntReLU),
    ("softplus", Activator::Softplus),
];

impl Activator {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            Activator::Identity => x,
            Activator::Step => if x >= 0.0 { 1.0 } else { 0.0 },
            Activator::Sigmoid => 1.0 / (1.0 + (-4.0 * x).exp()),
            Activator::ReLU => x.max(0.0),
            Activator::BluntReLU => 0.5 * (x + (x * x + 1.0).sqrt()),
            // ln(1 + e^x) without overflowing for large x
            Activator::Softplus => x.max(0.0) + (-x.abs()).exp().ln_1p(),
        }
    }

    /// Derivative with respect to the pre-activation input.
    ///
    /// `Step` reports 0 everywhere, including at 0.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            Activator::Identity => 1.0,
            Activator::Step => 0.0,
            Activator::Sigmoid => {
                let u = (-4.0 * x).exp();
                4.0 * u / ((1.0 + u) * (1.0 + u))
            }
            Activator::ReLU => if x >= 0.0 { 1.0 } else { 0.0 },
            Activator::BluntReLU => 0.5 + 0.5 * x / (x * x + 1.0).sqrt(),
            Activator::Softplus => 1.0 / (1.0 + (-x).exp()),
        }
    }

    /// Registry name used in model files.
    pub fn name(&self) -> &'static str {
        REGISTRY.iter()
            .find(|(_, a)| a == self)
            .map(|(name, _)| *name)
            .unwrap_or("nil")
    }

    /// Resolves a registered name.
    pub fn by_name(name: &str) -> Result<Activator, NeuzError> {
        REGISTRY.iter()
            .find(|(n, _)| *n == name)
            .map(|(_, a)| *a)
            .ok_or_else(|| NeuzError::UnknownActivator { name: name.to_string() })
    }

    pub fn all() -> impl Iterator<Item = Activator> {
        REGISTRY.iter().map(|(_, a)| *a)
    }
}

impl fmt::Display for Activator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Activator {
    type Err = NeuzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Activator::by_name(s)
    }
}

impl TryFrom<String> for Activator {
    type Error = NeuzError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Activator::by_name(&s)
    }
}

impl From<Activator> for String {
    fn from(a: Activator) -> String {
        a.name().to_string()
    }
}
