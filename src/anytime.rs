//! Anytime trace records and CSV rendering.
//!
//! Drivers append one record per successful archive insertion (plus a
//! seed row, and for IBEA a terminating row), tracking how the archive
//! hypervolume evolves as the evaluation budget is consumed.

use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// One anytime row for GSEMO and PLS runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnytimeRecord {
    /// Evaluations consumed when the row was recorded.
    pub evaluation: usize,
    /// Archive hypervolume at that point.
    pub hypervolume: f64,
}

/// One anytime row for IBEA runs, which also carry the generation index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Evaluations consumed when the row was recorded.
    pub evaluation: usize,
    /// Generation index at that point.
    pub generation: usize,
    /// Archive hypervolume at that point.
    pub hypervolume: f64,
}

/// Render GSEMO/PLS records as CSV with an `evaluation,hypervolume`
/// header.
pub fn write_csv<W: Write>(records: &[AnytimeRecord], mut out: W) -> io::Result<()> {
    writeln!(out, "evaluation,hypervolume")?;
    for record in records {
        writeln!(out, "{},{}", record.evaluation, record.hypervolume)?;
    }
    Ok(())
}

/// Render IBEA records as CSV with an `evaluation,generation,hypervolume`
/// header.
pub fn write_generational_csv<W: Write>(records: &[GenerationRecord], mut out: W) -> io::Result<()> {
    writeln!(out, "evaluation,generation,hypervolume")?;
    for record in records {
        writeln!(
            out,
            "{},{},{}",
            record.evaluation, record.generation, record.hypervolume
        )?;
    }
    Ok(())
}
