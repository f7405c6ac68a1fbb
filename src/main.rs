fn main() {
    if let Err(err) = geolabel::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
