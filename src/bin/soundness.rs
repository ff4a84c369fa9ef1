use std::env;

use anyhow::{ensure, Context, Result};
use ark_bn254::{Fq2, Fr};
use fri_soundness::{estimate_batch, field_size_bits, FriSoundnessParams, SoundnessError};
use itertools::Itertools;
use prettytable::{row, Table};

fn main() {
    let args: Vec<String> = env::args().collect();
    let res = match args.len() {
        1 => {
            print_reference();
            print_sweep();
            Ok(())
        },
        _ => match args[1].as_str() {
            "reference" => {
                print_reference();
                Ok(())
            },
            "sweep" => {
                print_sweep();
                Ok(())
            },
            "custom" => print_custom(&args[2..]),
            _ => {
                eprintln!("Unknown option: {}", args[1]);
                eprintln!(
                    "Usage: {} [reference|sweep|custom <rate_bits> <codeword_size_bits> <m> <field_size_bits> <num_queries> <arity_bits,...>]",
                    args[0]
                );
                std::process::exit(1);
            },
        },
    };
    if let Err(e) = res {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn fmt_bound(bound: &Result<f64, SoundnessError>) -> String {
    match bound {
        Ok(b) => format!("{:.3e}", b),
        Err(e) => e.to_string(),
    }
}

fn fmt_bits(bits: Result<f64, SoundnessError>) -> String {
    match bits {
        Ok(b) => format!("{:.2}", b),
        Err(e) => e.to_string(),
    }
}

// break down the bound of a small, hand-checkable instance
fn print_reference() {
    let params = FriSoundnessParams::new(1, 1, 20, 4.0, vec![2, 2, 2], 3, 128, 80);

    let mut table = Table::new();
    table.add_row(row!["rho", "alpha", "term_1", "term_2", "term_3", "total", "bits"]);
    match params.terms() {
        Ok(terms) => {
            table.add_row(row![
                terms.rho,
                format!("{:.6}", terms.alpha),
                format!("{:.6e}", terms.term_1),
                format!("{:.6e}", terms.term_2),
                format!("{:.6e}", terms.term_3),
                format!("{:.6e}", terms.total()),
                fmt_bits(params.security_bits()),
            ]);
        },
        Err(e) => {
            table.add_row(row![e.to_string()]);
        },
    }

    println!("\n🔔 Reference: {:?}", params);
    table.printstd();
}

// blowup x queries over BN254 scalar field and its quadratic extension
fn print_sweep() {
    let degree_bits = 20;
    let m = 3.0;
    let header = row!["|F| bits", "rate_bits", "queries", "bound", "bits"];

    for (name, field_bits) in [
        ("Fr", field_size_bits::<Fr>()),
        ("Fq2", field_size_bits::<Fq2>()),
    ] {
        let batch: Vec<FriSoundnessParams> = (1..=4)
            .cartesian_product([20, 40, 80, 120])
            .map(|(rate_bits, num_queries)| {
                // fold by 8 until the final polynomial has degree < 8
                let num_rounds = degree_bits / 3;
                FriSoundnessParams::new(
                    1,
                    rate_bits,
                    degree_bits as i32 + rate_bits,
                    m,
                    vec![3; num_rounds],
                    num_rounds,
                    field_bits as i32,
                    num_queries,
                )
            })
            .collect();
        let bounds = estimate_batch(&batch);

        let mut table = Table::new();
        table.add_row(header.clone());
        for (params, bound) in batch.iter().zip(bounds.iter()) {
            table.add_row(row![
                field_bits,
                params.rate_bits,
                params.num_queries,
                fmt_bound(bound),
                fmt_bits(params.security_bits()),
            ]);
        }
        println!("\n🔔 {} (degree 2^{}, m = {})", name, degree_bits, m);
        table.printstd();
    }
}

fn print_custom(args: &[String]) -> Result<()> {
    ensure!(
        args.len() == 6,
        "custom expects 6 arguments, got {}",
        args.len()
    );
    let rate_bits: i32 = args[0].parse().context("parsing rate_bits")?;
    let codeword_size_bits: i32 = args[1].parse().context("parsing codeword_size_bits")?;
    let m: f64 = args[2].parse().context("parsing m")?;
    let field_size_bits: i32 = args[3].parse().context("parsing field_size_bits")?;
    let num_queries: usize = args[4].parse().context("parsing num_queries")?;
    let arity_bits: Vec<usize> = args[5]
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|s| s.trim().parse())
        .collect::<Result<_, _>>()
        .context("parsing arity_bits")?;
    let num_rounds = arity_bits.len();

    let params = FriSoundnessParams::new(
        1,
        rate_bits,
        codeword_size_bits,
        m,
        arity_bits,
        num_rounds,
        field_size_bits,
        num_queries,
    );
    if let Err(e) = params.validate() {
        eprintln!("Warning: {}", e);
    }

    let mut table = Table::new();
    table.add_row(row!["term_1", "term_2", "term_3", "bound", "bits"]);
    match params.terms() {
        Ok(terms) => table.add_row(row![
            format!("{:.6e}", terms.term_1),
            format!("{:.6e}", terms.term_2),
            format!("{:.6e}", terms.term_3),
            fmt_bound(&params.estimate()),
            fmt_bits(params.security_bits()),
        ]),
        Err(e) => table.add_row(row![
            "-",
            "-",
            "-",
            e.to_string(),
            fmt_bits(params.security_bits()),
        ]),
    };
    table.printstd();
    Ok(())
}
