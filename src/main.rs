fn main() {
    if let Err(err) = lead_normalizer::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
