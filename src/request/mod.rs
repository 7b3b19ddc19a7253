//! Request building: turns a file selection plus form values into a
//! normalized, sendable analysis request

mod upload;
pub mod loader;

pub use upload::{
    build, FormValues, TriangleFile, TriangleUploadRequest, ValidationError,
    DEFAULT_DEV_COLUMN, DEFAULT_ORIGIN_COLUMN, DEFAULT_VALUE_COLUMN,
};
pub use loader::{load_triangle_file, read_header_columns};
