//! Full training session over CSV data: build a 3-input, 1-output network,
//! train it online sample by sample while snapshotting every iteration,
//! then evaluate the trained network on a held-out test file.
//!
//! Usage:
//!   cargo run --example train_csv -- <train.csv> <test.csv> [hidden_units]
//!
//! CSV rows are `input1,input2,input3,output`; a header row is skipped
//! automatically.

use shallow_nn::{evaluate_network, load_csv, train_network, MemorySink, Network};

const INPUT_COUNT: usize = 3;
const OUTPUT_COUNT: usize = 1;
const DUMP_STRIDE: usize = 250;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("usage: train_csv <train.csv> <test.csv> [hidden_units]");
        std::process::exit(2);
    }
    let train_path = &args[1];
    let test_path = &args[2];
    let hidden_units: usize = args.get(3).map(|s| s.as_str()).unwrap_or("4")
        .parse()
        .unwrap_or_else(|_| {
            eprintln!("hidden_units must be a non-negative integer");
            std::process::exit(2);
        });

    let mut rng = rand::thread_rng();
    let mut network = Network::build(INPUT_COUNT, hidden_units, OUTPUT_COUNT, &mut rng);

    // Structure-only copy showing the initial random weights.
    let mut initial_network = network.clone();
    initial_network.clear_training_data();

    let mut train_source = match load_csv(train_path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("failed to load training data: {}", e);
            std::process::exit(1);
        }
    };

    println!("------ Training Network ------");
    let mut sink = MemorySink::new();
    let iterations = match train_network(&mut network, &mut train_source, &mut sink) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("training aborted: {}", e);
            std::process::exit(1);
        }
    };
    println!("Trained for {} iterations.", iterations);

    println!("----- Final Training Results -----");
    for snapshot in sink.snapshots.iter().filter(|s| s.iteration % DUMP_STRIDE == 0) {
        println!("----- Training Iteration {} -----", snapshot.iteration);
        println!("{}", serde_json::to_string_pretty(snapshot).unwrap());
    }

    println!("----- Initial Network -----");
    println!("{}", serde_json::to_string_pretty(&initial_network).unwrap());

    let mut final_network = network.clone();
    final_network.clear_training_data();
    println!("----- Final Network -----");
    println!("{}", serde_json::to_string_pretty(&final_network).unwrap());

    println!("------ Testing Network ------");
    let mut test_source = match load_csv(test_path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("failed to load test data: {}", e);
            std::process::exit(1);
        }
    };
    let mut test_network = network.clone();
    let stats = match evaluate_network(&mut test_network, &mut test_source) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("evaluation aborted: {}", e);
            std::process::exit(1);
        }
    };

    println!();
    println!("------Totals--------");
    println!("Test samples: {}", stats.samples);
    println!("Maximum Overestimate: {:.6}", stats.max_overestimate);
    println!("Maximum Underestimate: {:.6}", stats.max_underestimate);
    println!("Average Error: {:.6}", stats.average_error);
}
