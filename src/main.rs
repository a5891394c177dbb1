//! # qasieve
//!
//! Turns scraped input/target records into a question/context/answer dataset.
//!
//! ## Getting started
//!
//! ```sh
//! qasieve 0.1.0
//! QA dataset cleaning tool.
//!
//! USAGE:
//!     qasieve <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     check    Check a generated QA dataset
//!     clean    Clean a JSONL file of input/target records into a QA dataset
//!     help     Prints this message or the help of the given subcommand(s)
//! ```
use std::time::Instant;

use structopt::StructOpt;

use qasieve::config::CascadeConfig;
use qasieve::error::Error;
use qasieve::pipelines::{Pipeline, QaPipeline};
use qasieve::processing::check_file;

#[macro_use]
extern crate log;

mod cli;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Qasieve::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Qasieve::Clean(c) => {
            let config = CascadeConfig {
                min_words: c.min_words,
                redundancy_threshold: c.redundancy,
                dedup: c.dedup,
                seed: c.seed,
                ..Default::default()
            };

            let start = Instant::now();
            let p = QaPipeline::new(c.src, c.dst)
                .with_config(config)
                .with_chunk_size(c.chunk_size)
                .with_threads(c.threads)
                .with_repair(c.repair);
            let report = p.run()?;

            info!(
                "Total records accepted: {} ({:.2}s)",
                report.accepted,
                start.elapsed().as_secs_f64()
            );

            if !report.is_complete() {
                error!("chunks {:?} could not be persisted", report.failed_chunks);
                return Err(Error::Persistence(report.failed_chunks));
            }
        }

        cli::Qasieve::Check(c) => {
            let report = check_file(&c.dataset)?;
            report.log();
            if !report.is_valid() {
                return Err(Error::Custom(format!(
                    "{} invalid records in {:?}",
                    report.invalid.len(),
                    c.dataset
                )));
            }
        }
    };
    Ok(())
}
