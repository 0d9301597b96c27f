// This binary crate is intentionally minimal.
// All network logic lives in the library (src/lib.rs and its modules).
// Run the demo with:
//   cargo run --example train_csv -- train.csv test.csv 4
fn main() {
    println!("shallow-nn: a single-hidden-layer sigmoid network trained online.");
    println!("Run `cargo run --example train_csv -- <train.csv> <test.csv> <hidden>` for the full demo.");
}
