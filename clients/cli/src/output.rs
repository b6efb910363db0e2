use {
    crate::config::Config,
    serde::Serialize,
    solana_cli_output::{OutputFormat, QuietDisplay, VerboseDisplay},
    std::fmt::Display,
};

/// Names accepted by `--output`
pub const OUTPUT_FORMATS: [&str; 5] = ["display", "json", "json-compact", "quiet", "verbose"];

pub fn parse_output_format(output_format: &str) -> OutputFormat {
    match output_format {
        "json" => OutputFormat::Json,
        "json-compact" => OutputFormat::JsonCompact,
        "quiet" => OutputFormat::DisplayQuiet,
        "verbose" => OutputFormat::DisplayVerbose,
        _ => OutputFormat::Display,
    }
}

/// Progress messages go to stdout only for human readable output, so json
/// output stays parseable
pub fn println_display(config: &Config, message: String) {
    if matches!(
        config.output_format,
        OutputFormat::Display | OutputFormat::DisplayVerbose
    ) {
        println!("{}", message);
    }
}

pub fn format_output<T>(config: &Config, command_output: T) -> String
where
    T: Serialize + Display + QuietDisplay + VerboseDisplay,
{
    config.output_format.formatted_string(&command_output)
}
