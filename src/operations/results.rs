//! Operation result types
//!
//! Defines the JSON bodies returned by successful operations.

use serde::Serialize;

/// Result of a file-info lookup on an existing path
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FileInfoResult {
    pub exists: bool,
    pub name: String,
    pub extension: String,
    pub size: u64,
    pub path: String,
}

/// Result of an upload
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UploadResult {
    pub message: String,
    pub filename: String,
}

/// Result of a create/delete operation
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MessageResult {
    pub message: String,
}

impl MessageResult {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
