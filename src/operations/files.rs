//! File operations: metadata lookup, listing, upload and deletion.

use log::info;

use crate::error::GatewayError;
use crate::operations::results::{FileInfoResult, MessageResult, UploadResult};
use crate::session::FtpClient;

/// Looks up the size of `path` and describes it.
///
/// A 550 reply means the path does not exist and becomes `NotFound`.
pub fn file_info(client: &mut dyn FtpClient, path: &str) -> Result<FileInfoResult, GatewayError> {
    let size = client.size(path).map_err(|e| {
        if e.is_not_found() {
            GatewayError::NotFound {
                path: path.to_string(),
            }
        } else {
            GatewayError::Remote(e)
        }
    })?;

    let name = file_name(path);
    Ok(FileInfoResult {
        exists: true,
        extension: extension(name).to_string(),
        name: name.to_string(),
        size,
        path: path.to_string(),
    })
}

/// Lists the entries of `directory` that look like files.
pub fn list_files(client: &mut dyn FtpClient, directory: &str) -> Result<Vec<String>, GatewayError> {
    client.cwd(directory)?;
    let entries = client.nlst()?;
    Ok(entries
        .into_iter()
        .filter(|entry| looks_like_file(entry))
        .collect())
}

/// Stores `data` as `filename` inside `directory`, replacing any existing file.
pub fn upload_file(
    client: &mut dyn FtpClient,
    directory: &str,
    filename: &str,
    data: &[u8],
) -> Result<UploadResult, GatewayError> {
    client.cwd(directory)?;
    let written = client.put_file(filename, data)?;
    info!("Uploaded {} ({} bytes) to {}", filename, written, directory);

    Ok(UploadResult {
        message: "File uploaded successfully".to_string(),
        filename: filename.to_string(),
    })
}

pub fn delete_file(
    client: &mut dyn FtpClient,
    directory: &str,
    filename: &str,
) -> Result<MessageResult, GatewayError> {
    client.cwd(directory)?;
    client.rm(filename)?;
    info!("Deleted file {} in {}", filename, directory);

    Ok(MessageResult::new(format!(
        "File '{}' deleted successfully",
        filename
    )))
}

/// Heuristic: an entry whose name contains a `.` is taken to be a file.
///
/// Unreliable. A directory named `v1.2` is reported as a file and a file
/// named `Makefile` is not. Nothing is verified with the server.
pub fn looks_like_file(name: &str) -> bool {
    name.contains('.')
}

/// Final segment of a `/`-separated path (empty for a trailing slash).
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Suffix of `name` from its last dot, ignoring leading dots; empty if none.
pub fn extension(name: &str) -> &str {
    let stem_start = name.len() - name.trim_start_matches('.').len();
    match name[stem_start..].rfind('.') {
        Some(dot) => &name[stem_start + dot..],
        None => "",
    }
}
