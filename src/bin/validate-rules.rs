use clap::Parser;
use guideflow::app::{run_validate, ValidateArgs};
use guideflow::shared::logging::init_logging;

fn main() {
    init_logging();
    let args = ValidateArgs::parse();
    match run_validate(&args) {
        Ok(line) => println!("{line}"),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
