use annotatexl_cli::input::Input;
use annotatexl_cli::runner::Runner;
use clap::{value_parser, Arg, Command, ValueHint};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::default()
        .filter_level(log::LevelFilter::Error)
        .parse_env(
            env_logger::Env::default().filter_or("ANNOTATEXL_LOG", "error,annotatexl=info"),
        )
        .init();

    let matches = Command::new("annotatexl")
        .version(clap::crate_version!())
        .about("Annotate MS/MS spectra of cross-linked peptides")
        .arg(
            Arg::new("crosslink")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .help(
                    "Cross-link identifier, e.g. `PEPTIDEK-HIKE-a8-b3`. Overrides the \
                     identifier specified in the configuration file.",
                )
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("peak_list")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .help(
                    "Path to a CSV peak list (`m/z, intensity` with a header row). \
                     Overrides the peak list specified in the configuration file.",
                )
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("parameters")
                .short('p')
                .long("parameters")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .help("Path to configuration parameters (JSON file)")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("ppm")
                .long("ppm")
                .value_parser(value_parser!(f64))
                .help("Matching tolerance in ppm of the observed m/z (default = 10)")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("absolute")
                .long("absolute")
                .value_parser(value_parser!(f64))
                .conflicts_with("ppm")
                .help("Matching tolerance as the full width of a window in Da")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("output_directory")
                .short('o')
                .long("output_directory")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .help(
                    "Path where annotations will be written. Defaults to the \
                     directory containing the peak list.",
                )
                .value_hint(ValueHint::DirPath),
        )
        .arg(
            Arg::new("fragments")
                .long("fragments")
                .action(clap::ArgAction::SetTrue)
                .help("Also write every theoretical fragment ion to a CSV file"),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    let input = Input::from_arguments(matches)?;

    let runner = input.build().and_then(Runner::new)?;

    runner.run()?;

    Ok(())
}
