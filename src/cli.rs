//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "qasieve", about = "QA dataset cleaning tool.")]
/// Holds every command that is callable by the `qasieve` command.
pub enum Qasieve {
    #[structopt(about = "Clean a JSONL file of input/target records into a QA dataset")]
    Clean(Clean),
    #[structopt(about = "Check a generated QA dataset")]
    Check(Check),
}

#[derive(Debug, StructOpt)]
/// Clean command and parameters.
///
/// ```sh
/// qasieve-clean 0.1.0
/// Clean a JSONL file of input/target records into a QA dataset
///
/// USAGE:
///     qasieve clean [FLAGS] [OPTIONS] <src> [dst]
///
/// FLAGS:
///         --dedup      drop duplicate question/answer pairs inside a chunk
///     -h, --help       Prints help information
///         --repair     attempt to repair undecodable lines
///     -V, --version    Prints version information
///
/// OPTIONS:
///     -s, --chunk-size <chunk-size>    number of records per chunk [default: 50]
///         --min-words <min-words>      minimum number of words of an input [default: 6]
///         --redundancy <redundancy>    redundancy threshold [default: 0.6]
///         --seed <seed>                seed for context generation
///     -t, --threads <threads>          number of threads. Default is the number of cores.
///
/// ARGS:
///     <src>    source JSONL file
///     <dst>    destination JSON file [default: qa_dataset.json]
/// ```
pub struct Clean {
    #[structopt(parse(from_os_str), help = "source JSONL file")]
    pub src: PathBuf,
    #[structopt(
        parse(from_os_str),
        help = "destination JSON file",
        default_value = "qa_dataset.json"
    )]
    pub dst: PathBuf,
    #[structopt(
        help = "number of records per chunk",
        long = "chunk-size",
        short = "s",
        default_value = "50"
    )]
    pub chunk_size: usize,
    #[structopt(
        short = "t",
        long = "threads",
        help = "number of threads. Default is the number of cores."
    )]
    pub threads: Option<usize>,
    #[structopt(long = "repair", help = "attempt to repair undecodable lines")]
    pub repair: bool,
    #[structopt(
        long = "dedup",
        help = "drop duplicate question/answer pairs inside a chunk"
    )]
    pub dedup: bool,
    #[structopt(
        long = "min-words",
        help = "minimum number of words of an input",
        default_value = "6"
    )]
    pub min_words: usize,
    #[structopt(
        long = "redundancy",
        help = "redundancy threshold",
        default_value = "0.6"
    )]
    pub redundancy: f64,
    #[structopt(long = "seed", help = "seed for context generation")]
    pub seed: Option<u64>,
}

#[derive(Debug, StructOpt)]
/// Check command and parameters.
pub struct Check {
    #[structopt(parse(from_os_str), help = "dataset to check")]
    pub dataset: PathBuf,
}
