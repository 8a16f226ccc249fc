//! Folder operations: listing, creation and (forced) deletion.

use log::{debug, info};

use crate::error::GatewayError;
use crate::operations::results::MessageResult;
use crate::session::FtpClient;

/// Lists the entries of `directory` that the server lets us change into.
///
/// Each entry is probed with CWD; a 5xx rejection marks it as not a directory.
pub fn list_folders(
    client: &mut dyn FtpClient,
    directory: &str,
) -> Result<Vec<String>, GatewayError> {
    client.cwd(directory)?;
    let entries = client.nlst()?;

    let mut folders = Vec::new();
    for entry in entries {
        match client.cwd(&entry) {
            Ok(()) => {
                client.cdup()?;
                folders.push(entry);
            }
            Err(e) if e.is_permanent() => debug!("Skipping {}: {}", entry, e),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(folders)
}

pub fn create_folder(
    client: &mut dyn FtpClient,
    directory: &str,
    folder_name: &str,
) -> Result<MessageResult, GatewayError> {
    client.cwd(directory)?;
    client.mkdir(folder_name)?;
    info!("Created folder {} in {}", folder_name, directory);

    Ok(MessageResult::new(format!(
        "Folder '{}' created successfully",
        folder_name
    )))
}

/// Removes `folder_name` from `directory`.
///
/// A non-empty folder is refused unless `force` is set. Forced deletion
/// descends a single level: a subfolder holding its own subfolders makes
/// the DELE of the nested entry fail and the whole request with it.
pub fn delete_folder(
    client: &mut dyn FtpClient,
    directory: &str,
    folder_name: &str,
    force: bool,
) -> Result<MessageResult, GatewayError> {
    client.cwd(directory)?;
    client.cwd(folder_name)?;
    let entries = client.nlst()?;

    if !entries.is_empty() && !force {
        return Err(GatewayError::NotEmpty(folder_name.to_string()));
    }

    if force {
        for entry in &entries {
            remove_entry(client, entry)?;
        }
    }

    client.cdup()?;
    client.rmdir(folder_name)?;
    info!(
        "Deleted folder {} in {} ({} entries)",
        folder_name,
        directory,
        entries.len()
    );

    Ok(MessageResult::new(format!(
        "Folder '{}' deleted successfully",
        folder_name
    )))
}

/// DELE `entry`; if the server refuses, empty it one level deep and RMD it.
fn remove_entry(client: &mut dyn FtpClient, entry: &str) -> Result<(), GatewayError> {
    match client.rm(entry) {
        Ok(()) => Ok(()),
        Err(e) if e.is_permanent() => {
            debug!("{} is not a plain file ({}), clearing it as a folder", entry, e);
            client.cwd(entry)?;
            for nested in client.nlst()? {
                client.rm(&nested)?;
            }
            client.cdup()?;
            client.rmdir(entry)?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
