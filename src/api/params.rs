//! Request parameters
//!
//! Every endpoint validates its parameters here, before a session is opened.
//! A parameter that is absent or empty counts as missing.

use crate::api::fields::Fields;
use crate::error::GatewayError;

#[derive(Debug, Default)]
pub struct FileInfoQuery {
    pub path: Option<String>,
}

#[derive(Debug, Default)]
pub struct DirectoryQuery {
    pub directory: Option<String>,
}

#[derive(Debug, Default)]
pub struct CreateFolderForm {
    pub directory: Option<String>,
    pub folder_name: Option<String>,
}

#[derive(Debug, Default)]
pub struct DeleteFileForm {
    pub directory: Option<String>,
    pub filename: Option<String>,
}

#[derive(Debug, Default)]
pub struct DeleteFolderForm {
    pub directory: Option<String>,
    pub folder_name: Option<String>,
    pub force_deletion: Option<String>,
}

/// Fields collected from a multipart upload
#[derive(Debug, Default)]
pub struct UploadForm {
    pub directory: Option<String>,
    pub filename: Option<String>,
    pub data: Option<Vec<u8>>,
}

impl From<Fields> for FileInfoQuery {
    fn from(fields: Fields) -> Self {
        Self {
            path: fields.get("path"),
        }
    }
}

impl From<Fields> for DirectoryQuery {
    fn from(fields: Fields) -> Self {
        Self {
            directory: fields.get("directory"),
        }
    }
}

impl From<Fields> for CreateFolderForm {
    fn from(fields: Fields) -> Self {
        Self {
            directory: fields.get("directory"),
            folder_name: fields.get("folder_name"),
        }
    }
}

impl From<Fields> for DeleteFileForm {
    fn from(fields: Fields) -> Self {
        Self {
            directory: fields.get("directory"),
            filename: fields.get("filename"),
        }
    }
}

impl From<Fields> for DeleteFolderForm {
    fn from(fields: Fields) -> Self {
        Self {
            directory: fields.get("directory"),
            folder_name: fields.get("folder_name"),
            force_deletion: fields.get("force_deletion"),
        }
    }
}

impl From<Fields> for UploadForm {
    fn from(mut fields: Fields) -> Self {
        let file = fields.take_file();
        Self {
            directory: fields.get("directory"),
            filename: file.as_ref().map(|f| f.filename.clone()),
            data: file.map(|f| f.data),
        }
    }
}

/// Validated upload parameters
#[derive(Debug)]
pub struct Upload {
    pub directory: String,
    pub filename: String,
    pub data: Vec<u8>,
}

/// Validated delete-folder parameters
#[derive(Debug)]
pub struct DeleteFolder {
    pub directory: String,
    pub folder_name: String,
    pub force: bool,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn both(
    first: Option<String>,
    second: Option<String>,
    message: &str,
) -> Result<(String, String), GatewayError> {
    match (present(first), present(second)) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(GatewayError::Validation(message.to_string())),
    }
}

/// `"true"` in any letter case enables the flag; everything else disables it.
pub fn parse_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

impl FileInfoQuery {
    pub fn validate(self) -> Result<String, GatewayError> {
        present(self.path).ok_or_else(|| GatewayError::Validation("Path is required".into()))
    }
}

impl DirectoryQuery {
    pub fn validate(self) -> Result<String, GatewayError> {
        present(self.directory)
            .ok_or_else(|| GatewayError::Validation("Directory path is required".into()))
    }
}

impl CreateFolderForm {
    pub fn validate(self) -> Result<(String, String), GatewayError> {
        both(
            self.directory,
            self.folder_name,
            "Directory and folder_name are required",
        )
    }
}

impl DeleteFileForm {
    pub fn validate(self) -> Result<(String, String), GatewayError> {
        both(
            self.directory,
            self.filename,
            "Directory and filename are required",
        )
    }
}

impl DeleteFolderForm {
    pub fn validate(self) -> Result<DeleteFolder, GatewayError> {
        let force = parse_flag(self.force_deletion.as_deref());
        let (directory, folder_name) = both(
            self.directory,
            self.folder_name,
            "Directory and folder_name are required",
        )?;
        Ok(DeleteFolder {
            directory,
            folder_name,
            force,
        })
    }
}

impl UploadForm {
    /// The file part must carry a non-empty filename; its content may be empty.
    pub fn validate(self) -> Result<Upload, GatewayError> {
        match (present(self.directory), present(self.filename), self.data) {
            (Some(directory), Some(filename), Some(data)) => Ok(Upload {
                directory,
                filename,
                data,
            }),
            _ => Err(GatewayError::Validation(
                "Directory and file are required".into(),
            )),
        }
    }
}
