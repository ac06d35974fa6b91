//! Add two 2-bit numbers with a circuit built from formulas, printing the truth table.
//!
//! Run with `cargo run --example adder`. Set the level to `Trace` to watch every rewrite.
use open_digraphs::prelude::*;

// inputs sort as a0 a1 b0 b1 c; bit 1 is the least significant
const FORMULAS: [&str; 3] = [
    // carry out
    "((xa0)&(xb0))|(((xa0)^(xb0))&(((xa1)&(xb1))|(((xa1)^(xb1))&(xc))))",
    // high sum bit
    "((xa0)^(xb0))^(((xa1)&(xb1))|(((xa1)^(xb1))&(xc)))",
    // low sum bit
    "((xa1)^(xb1))^(xc)",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut adder = BoolCirc::from_formula(&FORMULAS)?;
    log::info!(
        "adder: {} inputs, {} outputs, {} nodes, depth {}",
        adder.inputs().len(),
        adder.outputs().len(),
        adder.len(),
        adder.depth()?
    );

    for a in 0..4u32 {
        for b in 0..4u32 {
            let bits = format!("{:02b}{:02b}0", a, b);
            adder.set_input_bits(&bits)?;
            let out = adder.evaluate()?;
            assert_eq!(u32::from_str_radix(&out, 2)?, a + b);
            println!("{} + {} = {} ({})", a, b, a + b, out);
        }
    }
    Ok(())
}
