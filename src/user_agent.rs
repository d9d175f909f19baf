//! User-Agent header sent with every request.

use std::env::consts::{ARCH, OS};
use std::sync::OnceLock;

/// Product token: crate name and version.
const PRODUCT: &str = concat!("ignis-rust/", env!("CARGO_PKG_VERSION"));

/// Minimum supported toolchain the crate was published for.
const TOOLCHAIN: &str = concat!("rust/", env!("CARGO_PKG_RUST_VERSION"));

/// Returns the header value, e.g. `ignis-rust/0.2.0 rust/1.92 (linux; x86_64)`.
pub fn user_agent() -> &'static str {
    static VALUE: OnceLock<String> = OnceLock::new();
    VALUE.get_or_init(|| format!("{} {} ({}; {})", PRODUCT, TOOLCHAIN, platform(OS), ARCH))
}

/// Reports macOS by its kernel name.
fn platform(os: &str) -> &str {
    if os == "macos" { "darwin" } else { os }
}
