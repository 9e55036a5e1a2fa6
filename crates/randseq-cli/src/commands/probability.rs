use randseq_core::{chi_square_narrative, tail_probability};

pub fn run(chi_square: f64, df: u32) -> i32 {
    if df == 0 {
        eprintln!("Degrees of freedom must be at least 1.");
        return 1;
    }
    let p = tail_probability(chi_square, df);
    println!("Chi square {chi_square:.2} with {df} degrees of freedom");
    println!("  upper-tail probability: {p:.6}");
    println!(
        "  randomly would exceed this value {} of the times.",
        chi_square_narrative(p)
    );
    0
}
