//! CLI command modules.

pub mod devices;
pub mod http;
pub mod status;

/// Settings shared by every command.
pub struct Ctx {
    /// Server base URL, e.g. `http://127.0.0.1:8080`.
    pub base: String,
    /// Print the raw response body instead of the formatted view.
    pub json: bool,
}

/// Print a response body exactly as the server sent it.
pub fn print_raw(text: &str) {
    println!("{}", text.trim_end());
}
