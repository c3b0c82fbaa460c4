//! Instruments a few functions, runs them on several threads and writes a report on exit.
//!
//! Run with: `cargo run --example scope_profile_basic`.
//!
//! The report is written to `scope_profile_report.txt` in the current directory and also
//! printed to the terminal. Set `RUST_LOG=debug` to see the diagnostic emitted when the
//! report file is written.

use std::hint::black_box;
use std::thread;

use scope_profile::{AggregationStore, profile_scope};

const REPORT_PATH: &str = "scope_profile_report.txt";

fn tokenize(text: &str) -> Vec<&str> {
    profile_scope!();
    text.split_whitespace().collect()
}

fn count_long_words(text: &str) -> usize {
    profile_scope!();
    tokenize(text).into_iter().filter(|word| word.len() > 4).count()
}

fn collatz_steps(mut n: u64) -> u32 {
    profile_scope!();

    let mut steps = 0_u32;
    while n != 1 {
        n = if n % 2 == 0 { n / 2 } else { n.wrapping_mul(3).wrapping_add(1) };
        steps = steps.wrapping_add(1);
    }
    steps
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Dropped at the end of main, which writes the report file.
    let _dump = AggregationStore::global().dump_on_drop(REPORT_PATH);

    let text = "the quick brown fox jumps over the lazy dog while instrumented scopes keep count";

    thread::scope(|s| {
        for worker in 0..4_u64 {
            s.spawn(move || {
                for i in 1..2_000_u64 {
                    black_box(count_long_words(text));
                    black_box(collatz_steps(i.wrapping_add(worker)));
                }
            });
        }
    });

    AggregationStore::global().to_report().print_to_stdout();
    println!("Report will be written to {REPORT_PATH}");
}
