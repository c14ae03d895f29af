//! Front sheets: the human-readable summary filed with each processed invoice.

pub mod render;

pub use render::{
    frontsheet_file_name, render_frontsheet, save_frontsheet, FrontSheetError,
};
