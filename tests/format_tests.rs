//! Record-format persistence: exact round trips regardless of line order.

use axonet::{Activator, Network, NetworkSpec, NeuzError};

type NeuronRow = (usize, usize, String, u64);
type EdgeRow = (usize, usize, usize, usize, u64);

fn neuron_rows(net: &Network) -> Vec<NeuronRow> {
    let mut rows: Vec<NeuronRow> = net.groups().iter()
        .flat_map(|g| g.neurons())
        .map(|n| {
            let name = n.activator().map_or("nil", |a| a.name()).to_string();
            (n.id().group, n.id().neuron, name, n.bias().to_bits())
        })
        .collect();
    rows.sort();
    rows
}

fn edge_rows(net: &Network) -> Vec<EdgeRow> {
    let mut rows: Vec<EdgeRow> = net.groups().iter()
        .flat_map(|g| g.neurons())
        .flat_map(|n| {
            n.axons().iter().map(move |a| {
                let up = a.upstream();
                (up.group, up.neuron, n.id().group, n.id().neuron, a.weight().to_bits())
            })
        })
        .collect();
    rows.sort();
    rows
}

fn sample_network() -> Network {
    let mut net = NetworkSpec::layered("round-trip", &[2, 5, 4], Activator::Sigmoid)
        .build()
        .unwrap();
    net.add_group_set_activator(3, Some(Activator::BluntReLU)).unwrap();
    net.connect_group(2, 3).unwrap();
    net.connect(0, 1, 3, 2, 0.1 + 0.2).unwrap();
    net.find_neuron_mut(1, 4).unwrap().set_activator(Some(Activator::Softplus));
    net.find_neuron_mut(2, 0).unwrap().set_bias(1e-17);
    net.find_neuron_mut(2, 1).unwrap().set_bias(-123456.789e-3);
    net
}

#[test]
fn test_write_then_read_reproduces_records() {
    let net = sample_network();
    let text = net.to_records();
    let back = Network::from_records(&text).unwrap();
    assert_eq!(back.to_records(), text);
    assert_eq!(neuron_rows(&back), neuron_rows(&net));
    assert_eq!(edge_rows(&back), edge_rows(&net));
}

#[test]
fn test_read_is_independent_of_record_order() {
    let net = sample_network();
    let text = net.to_records();
    let mut lines: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
    let header = lines.remove(0);
    lines.reverse();
    let shuffled = format!("{}\n{}\n", header, lines.join("\n"));

    let back = Network::from_records(&shuffled).unwrap();
    assert_eq!(back.group_count(), net.group_count());
    assert_eq!(neuron_rows(&back), neuron_rows(&net));
    assert_eq!(edge_rows(&back), edge_rows(&net));
}

#[test]
fn test_reloaded_network_computes_the_same_outputs() {
    let mut net = sample_network();
    let mut back = Network::from_records(&net.to_records()).unwrap();
    let input = [0.3, -1.7];
    net.propagate(Some(&input)).unwrap();
    back.propagate(Some(&input)).unwrap();
    let a: Vec<u64> = net.output().iter().map(|y| y.to_bits()).collect();
    let b: Vec<u64> = back.output().iter().map(|y| y.to_bits()).collect();
    assert_eq!(a, b);
}

#[test]
fn test_save_and_load_file() {
    let path = std::env::temp_dir().join(format!("axonet-format-{}.ztk", std::process::id()));
    let net = sample_network();
    net.save(&path).unwrap();
    let back = Network::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(neuron_rows(&back), neuron_rows(&net));
    assert_eq!(edge_rows(&back), edge_rows(&net));
}

#[test]
fn test_save_into_missing_directory_fails() {
    let path = std::env::temp_dir().join("axonet-no-such-dir").join("net.ztk");
    let net = sample_network();
    assert!(matches!(net.save(&path), Err(NeuzError::FileOpenFailure { .. })));
}

#[test]
fn test_sparse_ids_materialize_groups() {
    let text = "[neuralnetwork]\n\
                neuron: 3 2 identity 0.5\n\
                neuron: 0 0 nil 0\n\
                connect: 0 0 3 2 -2\n";
    let mut net = Network::from_records(text).unwrap();
    assert_eq!(net.group_count(), 4);
    assert_eq!(net.groups()[3].len(), 3);
    assert!(net.groups()[1].is_empty());

    // Sparse filler neurons carry no axons and contribute only their own
    // bias; the declared neuron sees just its one axon.
    net.propagate(Some(&[1.5])).unwrap();
    assert_eq!(net.find_neuron(3, 2).unwrap().output(), 0.5 - 3.0);
}

#[test]
fn test_absurd_neuron_id_fails_without_growing() {
    for text in [
        "[neuralnetwork]\nneuron: 0 9223372036854775807 nil 0\n",
        "[neuralnetwork]\nneuron: 0 18446744073709551615 nil 0\n",
        "[neuralnetwork]\nneuron: 9223372036854775807 0 nil 0\n",
    ] {
        assert!(matches!(
            Network::from_records(text),
            Err(NeuzError::AllocationFailure)
        ));
    }
}

#[test]
fn test_group_links_get_random_weights_in_range() {
    let net = sample_network();
    let weights: Vec<f64> = net.groups()[1].neurons().iter()
        .flat_map(|n| n.axons())
        .map(|a| a.weight())
        .collect();
    assert_eq!(weights.len(), 10);
    assert!(weights.iter().all(|w| (-1.0..=1.0).contains(w)));
}
