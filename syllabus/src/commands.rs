use clap::{arg, value_parser};
use syllabus_core::config::{DEFAULT_BASE_URL, DEFAULT_COURSE_PATH, DEFAULT_OUTPUT_PATH};
use url::Url;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("syllabus")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("syllabus")
        .about(
            "Scrapes a course catalog into a JSON config of disciplines and their \
            prerequisites.",
        )
        .styles(CLAP_STYLING)
        .arg(
            arg!(-b --"base-url" <URL>)
                .required(false)
                .help("Base URL of the catalog site; detail links are resolved against it")
                .value_parser(value_parser!(Url))
                .default_value(DEFAULT_BASE_URL),
        )
        .arg(
            arg!(-c --"course" <PATH>)
                .required(false)
                .help("Course index path, relative to the base URL")
                .default_value(DEFAULT_COURSE_PATH),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("Where to write the assets config")
                .default_value(DEFAULT_OUTPUT_PATH),
        )
        .arg(
            arg!(-w --"workers" <N>)
                .required(false)
                .help("Number of discipline pages fetched concurrently")
                .value_parser(value_parser!(usize))
                .default_value("1"),
        )
        .arg(
            arg!(-t --"timeout" <SECONDS>)
                .required(false)
                .help("Timeout for each HTTP request")
                .value_parser(value_parser!(u64).range(1..))
                .default_value("30"),
        )
        .arg(
            arg!(--"deadline" <SECONDS>)
                .required(false)
                .help("Abort the whole crawl if it runs longer than this")
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(arg!(-q --"quiet" "Only log warnings; no progress bar or summary").required(false))
        .arg(
            arg!(-v --"verbose" "Log every fetch and extraction")
                .required(false)
                .conflicts_with("quiet"),
        )
}
