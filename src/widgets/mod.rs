// Terminal widgets

pub mod toast;

pub use toast::{render_to_lines, HostWidget};
