use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("tagsift")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("tagsift")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("scrape")
                .about(
                    "Visit each site in a list, record the utag files its page load pulls in, \
                extract the script URLs they reference and download the scripts.",
                )
                .arg(
                    arg!([SITES])
                        .required(false)
                        .help("Path to a newline-delimited file of site URLs")
                        .default_value("websites.txt"),
                )
                .arg(
                    arg!(-o --"output" <DIR>)
                        .required(false)
                        .help("Directory for the JSON snapshots and downloaded scripts")
                        .default_value("."),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Navigation and request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("30"),
                )
                .arg(
                    arg!(--"network-wait" <SECONDS>)
                        .required(false)
                        .help("How long to let late-loading tags fire after page load")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("5"),
                )
                .arg(
                    arg!(--"no-download")
                        .required(false)
                        .help("Write the JSON snapshots but skip downloading the scripts")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("extract")
                .about("Extract script URLs from utag files already on disk, without a browser")
                .arg(
                    arg!(<FILE>)
                        .num_args(1..)
                        .help("Utag file(s) to extract from")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
}
