//! Backpropagation checked against finite differences.

use approx::assert_abs_diff_eq;
use axonet::{Activator, Network, NeuronId, NeuzError, SquaredSumLoss};

/// Hand-built 2-3-1 sigmoid network with fixed, asymmetric parameters.
fn two_three_one() -> Network {
    let mut net = Network::new();
    net.add_group_set_activator(2, None).unwrap();
    net.add_group_set_activator(3, Some(Activator::Sigmoid)).unwrap();
    net.add_group_set_activator(1, Some(Activator::Sigmoid)).unwrap();
    net.connect_group(0, 1).unwrap();
    net.connect_group(1, 2).unwrap();

    let mut k = 0;
    for g in 1..3 {
        for n in 0..net.groups()[g].len() {
            let neuron = net.neuron_mut(NeuronId::new(g, n)).unwrap();
            neuron.set_bias(((k * 5) % 7) as f64 / 7.0 - 0.4);
            k += 1;
            for axon in neuron.axons_mut() {
                axon.set_weight(((k * 3) % 11) as f64 / 5.5 - 1.0);
                k += 1;
            }
        }
    }
    net
}

fn loss_at(net: &Network, input: &[f64], target: &[f64]) -> f64 {
    let mut probe = net.clone();
    probe.propagate(Some(input)).unwrap();
    SquaredSumLoss::loss(&probe.output(), target)
}

#[test]
fn test_gradients_match_finite_differences() {
    let input = [0.7, -0.4];
    let target = [0.2];
    let h = 1e-6;

    let mut net = two_three_one();
    net.init_grad();
    net.backpropagate(&input, &target, SquaredSumLoss::gradient).unwrap();

    for g in 1..3 {
        for n in 0..net.groups()[g].len() {
            let id = NeuronId::new(g, n);
            let neuron = net.neuron(id).unwrap();

            let mut plus = net.clone();
            let mut minus = net.clone();
            let b = neuron.bias();
            plus.neuron_mut(id).unwrap().set_bias(b + h);
            minus.neuron_mut(id).unwrap().set_bias(b - h);
            let numeric = (loss_at(&plus, &input, &target) - loss_at(&minus, &input, &target)) / (2.0 * h);
            assert_abs_diff_eq!(neuron.bias_grad(), numeric, epsilon = 1e-4);

            for (k, axon) in neuron.axons().iter().enumerate() {
                let w = axon.weight();
                let mut plus = net.clone();
                let mut minus = net.clone();
                plus.neuron_mut(id).unwrap().axons_mut()[k].set_weight(w + h);
                minus.neuron_mut(id).unwrap().axons_mut()[k].set_weight(w - h);
                let numeric = (loss_at(&plus, &input, &target) - loss_at(&minus, &input, &target)) / (2.0 * h);
                assert_abs_diff_eq!(axon.grad(), numeric, epsilon = 1e-4);
            }
        }
    }
}

#[test]
fn test_batch_gradient_is_sum_of_samples() {
    let samples = [([0.1, 0.9], [1.0]), ([-0.5, 0.3], [0.0])];
    let mut each = Vec::new();
    for (input, target) in &samples {
        let mut net = two_three_one();
        net.init_grad();
        net.backpropagate(input, target, SquaredSumLoss::gradient).unwrap();
        each.push(net.find_neuron(2, 0).unwrap().axons()[1].grad());
    }

    let mut net = two_three_one();
    net.init_grad();
    for (input, target) in &samples {
        net.backpropagate(input, target, SquaredSumLoss::gradient).unwrap();
    }
    assert_abs_diff_eq!(
        net.find_neuron(2, 0).unwrap().axons()[1].grad(),
        each[0] + each[1],
        epsilon = 1e-12
    );
}

#[test]
fn test_two_group_network_is_refused() {
    let mut net = Network::new();
    net.add_group_set_activator(2, None).unwrap();
    net.add_group_set_activator(1, Some(Activator::Sigmoid)).unwrap();
    net.connect_group(0, 1).unwrap();
    net.init_grad();
    let before = net.to_records();

    let result = net.backpropagate(&[1.0, 0.0], &[1.0], SquaredSumLoss::gradient);
    assert!(matches!(result, Err(NeuzError::TooFewLayers { groups: 2 })));

    let out = net.find_neuron(1, 0).unwrap();
    assert_eq!(out.bias_grad(), 0.0);
    assert!(out.axons().iter().all(|a| a.grad() == 0.0));
    assert_eq!(out.output(), 0.0);
    assert_eq!(net.to_records(), before);
}

#[test]
fn test_custom_loss_gradient_is_used() {
    let mut net = two_three_one();
    net.init_grad();
    net.backpropagate(&[0.3, 0.3], &[0.0], |_, _, _| 0.0).unwrap();
    for g in 1..3 {
        for neuron in net.groups()[g].neurons() {
            assert_eq!(neuron.bias_grad(), 0.0);
            assert!(neuron.axons().iter().all(|a| a.grad() == 0.0));
        }
    }
}
