fn main() {
    env_logger::init();

    if let Err(err) = iiifgen::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
