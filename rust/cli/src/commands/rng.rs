//! The `rng` command prints pool indices drawn from the same random source
//! `draw` uses, so seeded runs can be checked for reproducibility.

use crate::error::CliError;
use luckydraw_engine::random::{IndexSource, SeededIndexSource, SystemIndexSource};
use std::io::Write;

const SAMPLE_POOL: usize = 10;
const SAMPLE_LEN: usize = 5;

pub fn handle_rng_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let mut source: Box<dyn IndexSource> = match seed {
        Some(s) => Box::new(SeededIndexSource::new(s)),
        None => Box::new(SystemIndexSource::new()),
    };
    let mut vals = Vec::with_capacity(SAMPLE_LEN);
    let mut randomness = None;
    for _ in 0..SAMPLE_LEN {
        let (idx, kind) = source.pick(SAMPLE_POOL);
        vals.push(idx);
        randomness = Some(kind);
    }
    writeln!(out, "RNG sample (pool of {}): {:?}", SAMPLE_POOL, vals)?;
    if let Some(kind) = randomness {
        writeln!(out, "Randomness: {}", kind.as_str())?;
    }
    Ok(())
}
