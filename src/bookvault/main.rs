//! # Book Vault CLI
//!
//! The binary is thin: the CLI lives in `cli/`, and this file only invokes
//! `cli::run()` and turns an error into exit status 1.
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI layer owns
//! argument parsing (`setup.rs`), context wiring and dispatch (`commands.rs`)
//! and rendering through `outstanding` templates (`render.rs`,
//! `templates.rs`, `styles.rs`).
//!
//! CLI tests in `tests/` run the compiled binary against a temporary data
//! directory; rendering tests feed canned `CmdResult`s to `render.rs` with
//! colors disabled.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
