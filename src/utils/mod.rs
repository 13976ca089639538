pub mod error;
pub mod formats;
pub mod fs;

pub use error::{ShrinkError, ShrinkResult};
pub use formats::{OutputFormat, SourceFormat, format_from_path};
pub use fs::download_file_name;
