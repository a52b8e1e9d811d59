//! Command line runner for the `sami2rs` library.

#[cfg(not(feature = "for-testing"))]
#[quit::main]
fn main() {
    sami2rs::cli::run::run();
}

#[cfg(feature = "for-testing")]
fn main() {
    eprintln!(
        "Warning: The `for-testing` feature is enabled, which will clutter error messages"
    );
    sami2rs::cli::run::run();
}
