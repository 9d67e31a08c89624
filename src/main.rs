fn main() {
    if let Err(err) = reco_sync::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
