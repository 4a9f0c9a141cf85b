//! Version command

/// Run the version command.
pub fn run() {
    println!("gonut {}", env!("CARGO_PKG_VERSION"));
}
