//! Operation handlers
//!
//! One function per endpoint, each issuing a short FTP command sequence
//! against an already authenticated session.

pub mod files;
pub mod folders;
pub mod results;

pub use files::{delete_file, file_info, list_files, looks_like_file, upload_file};
pub use folders::{create_folder, delete_folder, list_folders};
pub use results::{FileInfoResult, MessageResult, UploadResult};
