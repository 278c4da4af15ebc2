pub mod assemble;
mod cancel;
pub mod canvas;
pub mod compose;
pub mod constants;
pub mod draw;
mod flight;
pub mod layout;
pub mod loader;
mod options;
mod source;
mod types;

pub use assemble::{Catalog, collection_file_name, item_file_name, sanitize};
pub use cancel::CancelToken;
pub use canvas::{Canvas, PdfCanvas, RecordingCanvas};
pub use flight::{FlightGate, FlightGuard};
pub use layout::{PageContext, fit_within_box};
pub use loader::{HttpImageSource, ImageSource, ResourceLoader};
pub use options::*;
pub use source::{load_collection, load_from_csv, load_items};
pub use types::*;
