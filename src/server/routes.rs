//! Route handlers
//!
//! Handlers parse the request, then hand the synchronous use cases to the
//! blocking pool: they take the registry lock and fsync the metadata file.

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Path, Request, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::application::{UploadRequest, UploadResult, UploadSource};
use crate::domain::ports::BlobError;
use crate::error::ShelfError;

use super::error::ApiError;
use super::state::AppState;
use super::views::{AppView, BuildView, ProjectView};

pub const APK_CONTENT_TYPE: &str = "application/vnd.android.package-archive";
pub const UPLOAD_SUCCESS_LOCATION: &str = "/?upload=success";

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

/// GET /api/projects
pub async fn list_projects(State(state): State<AppState>) -> Json<Vec<ProjectView>> {
    let projects = state.store.snapshot();
    Json(projects.iter().map(ProjectView::from).collect())
}

/// GET /api/apps/{packageName}
pub async fn get_app(
    State(state): State<AppState>,
    Path(package_name): Path<String>,
) -> Result<Json<AppView>, ApiError> {
    match state.store.find_app(&package_name) {
        Some(app) => Ok(Json(AppView::from(&app))),
        None => Err(ShelfError::AppNotFound { package_name }.into()),
    }
}

/// POST /api/upload (multipart)
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut request = UploadRequest::default();
    let mut content: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new(e.status(), e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                content = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::new(e.status(), e.body_text()))?,
                );
            }
            "projectName" | "channel" | "releaseNotes" | "source" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
                match name.as_str() {
                    "projectName" => request.project_name = value,
                    "channel" => request.channel = value,
                    "releaseNotes" => request.release_notes = value,
                    _ => request.source = value.parse().unwrap_or_default(),
                }
            }
            _ => {}
        }
    }

    let Some(content) = content else {
        return Err(ApiError::bad_request("missing required field: file"));
    };

    let upload = state.upload.clone();
    let result = tokio::task::spawn_blocking(move || upload.execute(&request, &content))
        .await
        .map_err(|e| ApiError::internal(format!("upload task failed: {e}")))??;

    Ok(upload_response(result))
}

fn upload_response(result: UploadResult) -> Response {
    if result.source == UploadSource::Web {
        return (
            StatusCode::FOUND,
            [(header::LOCATION, UPLOAD_SUCCESS_LOCATION)],
        )
            .into_response();
    }

    Json(json!({
        "message": "upload successful",
        "projectName": result.project_name,
        "appName": result.app_name,
        "packageName": result.package_name,
        "build": BuildView::from(&result.build),
    }))
    .into_response()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBuildBody {
    #[serde(default)]
    pub package_name: String,
    #[serde(default)]
    pub file_name: String,
    pub secret: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAppBody {
    #[serde(default)]
    pub package_name: String,
    pub secret: Option<String>,
}

/// POST /api/builds/delete
pub async fn delete_build(
    State(state): State<AppState>,
    FormOrJson(body): FormOrJson<DeleteBuildBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    required(&body.package_name, "packageName")?;
    required(&body.file_name, "fileName")?;

    let delete = state.delete.clone();
    let result = tokio::task::spawn_blocking(move || {
        delete.delete_build(body.secret.as_deref(), &body.package_name, &body.file_name)
    })
    .await
    .map_err(|e| ApiError::internal(format!("delete task failed: {e}")))??;

    Ok(Json(json!({
        "message": "build deleted",
        "packageName": result.package_name,
        "fileName": result.build.file_name,
        "appRemoved": result.app_removed,
        "projectRemoved": result.project_removed,
    })))
}

/// POST /api/apps/delete
pub async fn delete_app(
    State(state): State<AppState>,
    FormOrJson(body): FormOrJson<DeleteAppBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    required(&body.package_name, "packageName")?;

    let delete = state.delete.clone();
    let result = tokio::task::spawn_blocking(move || {
        delete.delete_app(body.secret.as_deref(), &body.package_name)
    })
    .await
    .map_err(|e| ApiError::internal(format!("delete task failed: {e}")))??;

    Ok(Json(json!({
        "message": "app deleted",
        "appName": result.app_name,
        "packageName": result.package_name,
        "removedBuilds": result.removed_builds.len(),
        "projectRemoved": result.project_removed,
    })))
}

/// GET /downloads/{fileName}
pub async fn download(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Response, ApiError> {
    let path = state
        .blobs
        .artifact_path(&file_name)
        .map_err(|_| ApiError::not_found("file not found"))?;
    let bytes = read_file(&path).await?;

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file_name))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(APK_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// GET /icons/{fileName}
pub async fn icon(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Response, ApiError> {
    let path = state
        .blobs
        .icon_file(&file_name)
        .map_err(|_| ApiError::not_found("icon not found"))?;
    let bytes = read_file(&path).await?;
    Ok(([(header::CONTENT_TYPE, "image/png")], bytes).into_response())
}

/// Regular files only; directories (the staging area) read as missing.
async fn read_file(path: &std::path::Path) -> Result<Vec<u8>, ApiError> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Err(ApiError::not_found("file not found")),
        Err(e) => return Err(blob_error(BlobError::io(path, e))),
    }
    tokio::fs::read(path)
        .await
        .map_err(|e| blob_error(BlobError::io(path, e)))
}

fn blob_error(err: BlobError) -> ApiError {
    match err {
        BlobError::NotFound(_) | BlobError::InvalidName(_) => ApiError::not_found("file not found"),
        BlobError::Io { .. } => {
            tracing::error!(error = %err, "failed to read stored file");
            ApiError::internal("failed to read file")
        }
    }
}

fn required(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request(format!(
            "missing required field: {field}"
        )));
    }
    Ok(())
}

/// Body given either as `application/json` or as a url-encoded form.
pub struct FormOrJson<T>(pub T);

impl<S, T> FromRequest<S> for FormOrJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if is_json {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            Ok(Self(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            Ok(Self(value))
        }
    }
}
