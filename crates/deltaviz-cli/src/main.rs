#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = deltaviz_cli::run_from_env() {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
