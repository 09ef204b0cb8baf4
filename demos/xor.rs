use axonet::{train_loop, Activator, Network, NetworkSpec, TrainConfig};

const MODEL_PATH: &str = "xor.ztk";

fn main() -> axonet::Result<()> {
    let inputs = vec![
        vec![0.0, 0.0],
        vec![1.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 1.0],
    ];
    // OR, AND, NAND, XOR
    let expected_outputs = vec![
        vec![0.0, 0.0, 1.0, 0.0],
        vec![1.0, 0.0, 1.0, 1.0],
        vec![1.0, 0.0, 1.0, 1.0],
        vec![1.0, 1.0, 0.0, 0.0],
    ];

    // Continue from a previous run when a saved model exists.
    let mut network = match Network::load(MODEL_PATH) {
        Ok(network) => network,
        Err(_) => NetworkSpec::layered("xor", &[2, 5, 4], Activator::Sigmoid).build()?,
    };

    let config = TrainConfig { epochs: 10000, rate: 0.1, decay: 1.0, tolerance: 1e-6 };
    let history = train_loop(&mut network, &inputs, &expected_outputs, &config)?;
    for stats in history.iter().step_by(1000) {
        println!("Epoch {}: loss = {:.6}", stats.epoch, stats.loss);
    }

    for input in &inputs {
        network.propagate(Some(input))?;
        let y = network.output();
        println!(
            "I1={}, I2={} -> OR: {:.4}, AND: {:.4}, NAND: {:.4}, XOR: {:.4}",
            input[0], input[1], y[0], y[1], y[2], y[3]
        );
    }

    network.save(MODEL_PATH)?;
    Ok(())
}
