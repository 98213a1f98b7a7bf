use clap::Parser;
use guideflow::app::{run_walk, WalkArgs};
use guideflow::presentation::TextPresenter;
use guideflow::shared::logging::init_logging;

fn run() -> Result<(), String> {
    let args = WalkArgs::parse();
    let stdin = std::io::stdin();
    let mut presenter = TextPresenter::new(std::io::stdout());
    run_walk(&args, stdin.lock(), &mut presenter)
        .map(|_| ())
        .map_err(|err| err.to_string())
}

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
