use crate::core::io::traits::RecordWriter;
use crate::core::models::library::CurvePoint;
use csv::WriterBuilder;
use itertools::Itertools;
use std::io::{self, Write};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Everything needed to write one RASPP curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveReport {
    pub min_fragment_length: usize,
    pub bin_width: f64,
    pub num_crossovers: usize,
    pub num_results: usize,
    pub enumeration_time: Duration,
    pub curve_time: Duration,
    pub points: Vec<CurvePoint>,
}

/// Tab-separated curve report: a `#` comment header followed by one
/// `<E>  <m>  crossover points` row per curve point.
pub struct ReportFile;

impl RecordWriter for ReportFile {
    type Input = CurveReport;
    type Error = ReportError;

    fn write_to(report: &CurveReport, writer: &mut impl Write) -> Result<(), ReportError> {
        writeln!(writer, "# Minimum fragment length = {}", report.min_fragment_length)?;
        writeln!(writer, "# Using bin width = {}", report.bin_width)?;
        writeln!(writer, "# Number of crossovers = {}", report.num_crossovers)?;
        writeln!(
            writer,
            "# RASPP took {:1.2} secs",
            report.enumeration_time.as_secs_f64()
        )?;
        writeln!(writer, "# RASPP found {} results", report.num_results)?;
        writeln!(
            writer,
            "# RASPP found {} unique (<E>,<m>) points",
            report.points.len()
        )?;
        writeln!(
            writer,
            "# RASPP curve took {:1.2} secs",
            report.curve_time.as_secs_f64()
        )?;
        writeln!(writer, "# <E>\t<m>\tcrossover points")?;

        let mut csv_writer = WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(&mut *writer);
        for point in &report.points {
            csv_writer.write_record([
                format!("{:1.4}", point.average_energy),
                format!("{:1.4}", point.average_mutations),
                point.crossovers.iter().join(" "),
            ])?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
