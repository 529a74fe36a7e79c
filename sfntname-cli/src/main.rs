//! Binary entrypoint for sfntname-cli

fn main() {
    if let Err(err) = sfntname_cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
