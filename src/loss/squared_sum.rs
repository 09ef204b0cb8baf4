pub struct SquaredSumLoss;

impl SquaredSumLoss {
    /// Scalar loss: ½·Σ(predicted - expected)²
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        0.5 * predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
    }

    /// ∂loss/∂predicted[i] = predicted[i] - expected[i]. Matches the
    /// loss-gradient callback taken by `Network::backpropagate`.
    pub fn gradient(predicted: &[f64], expected: &[f64], i: usize) -> f64 {
        predicted[i] - expected[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_squared_distance() {
        assert_eq!(SquaredSumLoss::loss(&[1.0, 2.0], &[0.0, 4.0]), 2.5);
        assert_eq!(SquaredSumLoss::gradient(&[1.0, 2.0], &[0.0, 4.0], 1), -2.0);
    }
}
