pub mod download;
pub mod pipeline;
pub mod snapshot;

use colored::Colorize;

const BANNER: &str = r#"
 _                   _  __ _
| |_ __ _  __ _ ___ (_)/ _| |_
| __/ _` |/ _` / __|| | |_| __|
| || (_| | (_| \__ \| |  _| |_
 \__\__,_|\__, |___/|_|_|  \__|
          |___/
"#;

pub fn print_banner() {
    println!("{}", BANNER.bright_cyan());
    println!(
        "{}",
        format!("  tag management scraper v{}", env!("CARGO_PKG_VERSION"))
            .bright_white()
            .bold()
    );
    println!();
}
