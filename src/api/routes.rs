//! HTTP endpoint handlers
//!
//! Each handler validates its parameters, then runs one operation against a
//! fresh FTP session through the gateway.

use axum::Json;
use axum::extract::State;

use crate::api::AppState;
use crate::api::fields::{FormFields, QueryFields};
use crate::api::params::{
    CreateFolderForm, DeleteFileForm, DeleteFolderForm, DirectoryQuery, FileInfoQuery, UploadForm,
};
use crate::error::GatewayError;
use crate::operations::{self, FileInfoResult, MessageResult, UploadResult};

/// GET /file-info?path=
pub async fn handle_file_info(
    State(state): State<AppState>,
    QueryFields(fields): QueryFields,
) -> Result<Json<FileInfoResult>, GatewayError> {
    let path = FileInfoQuery::from(fields).validate()?;

    state
        .gateway
        .run(move |client| operations::file_info(client, &path))
        .await
        .map(Json)
}

/// GET /list-files?directory=
pub async fn handle_list_files(
    State(state): State<AppState>,
    QueryFields(fields): QueryFields,
) -> Result<Json<Vec<String>>, GatewayError> {
    let directory = DirectoryQuery::from(fields).validate()?;

    state
        .gateway
        .run(move |client| operations::list_files(client, &directory))
        .await
        .map(Json)
}

/// GET /list-folders?directory=
pub async fn handle_list_folders(
    State(state): State<AppState>,
    QueryFields(fields): QueryFields,
) -> Result<Json<Vec<String>>, GatewayError> {
    let directory = DirectoryQuery::from(fields).validate()?;

    state
        .gateway
        .run(move |client| operations::list_folders(client, &directory))
        .await
        .map(Json)
}

/// POST /upload-file (multipart: `directory`, `file`)
pub async fn handle_upload_file(
    State(state): State<AppState>,
    FormFields(fields): FormFields,
) -> Result<Json<UploadResult>, GatewayError> {
    let upload = UploadForm::from(fields).validate()?;

    state
        .gateway
        .run(move |client| {
            operations::upload_file(client, &upload.directory, &upload.filename, &upload.data)
        })
        .await
        .map(Json)
}

/// POST /create-folder (form or multipart: `directory`, `folder_name`)
pub async fn handle_create_folder(
    State(state): State<AppState>,
    FormFields(fields): FormFields,
) -> Result<Json<MessageResult>, GatewayError> {
    let (directory, folder_name) = CreateFolderForm::from(fields).validate()?;

    state
        .gateway
        .run(move |client| operations::create_folder(client, &directory, &folder_name))
        .await
        .map(Json)
}

/// DELETE /delete-file (form or multipart: `directory`, `filename`)
pub async fn handle_delete_file(
    State(state): State<AppState>,
    FormFields(fields): FormFields,
) -> Result<Json<MessageResult>, GatewayError> {
    let (directory, filename) = DeleteFileForm::from(fields).validate()?;

    state
        .gateway
        .run(move |client| operations::delete_file(client, &directory, &filename))
        .await
        .map(Json)
}

/// DELETE /delete-folder (form or multipart: `directory`, `folder_name`, optional `force_deletion`)
pub async fn handle_delete_folder(
    State(state): State<AppState>,
    FormFields(fields): FormFields,
) -> Result<Json<MessageResult>, GatewayError> {
    let params = DeleteFolderForm::from(fields).validate()?;

    state
        .gateway
        .run(move |client| {
            operations::delete_folder(
                client,
                &params.directory,
                &params.folder_name,
                params.force,
            )
        })
        .await
        .map(Json)
}
