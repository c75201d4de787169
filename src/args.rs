use clap::Parser;

/// This is a scoring program for song contests.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The file containing the contest: states, judges and votes in JSON format.
    /// For more information about the file format, read the documentation of the manual module.
    #[clap(short, long, value_parser)]
    pub input: String,

    /// (file path) A reference file containing the summary of a contest in JSON format. If provided,
    /// eurotally will check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the contest will be written in JSON
    /// format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (number between 1 and 100) The weight of the state votes in the final score. Setting this option
    /// overrides the value that may be specified in the input file.
    #[clap(long, value_parser)]
    pub audience_percent: Option<u32>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
