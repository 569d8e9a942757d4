use std::{io, path::Path};

use axum::{
    body::Body,
    extract::State,
    http::{StatusCode, header},
    response::Response,
};
use futures_util::TryStreamExt;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::error;

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

/// Raw dataset file as a chunked byte stream.
#[derive(Debug)]
pub struct DatasetStream {
    pub len: u64,
    pub stream: ReaderStream<File>,
}

/// Opens the dataset for streaming in `chunk_bytes` reads.
pub async fn open_dataset_stream(
    path: &Path,
    chunk_bytes: usize,
) -> io::Result<DatasetStream> {
    let file = File::open(path).await?;
    let len = file.metadata().await?.len();

    Ok(DatasetStream {
        len,
        stream: ReaderStream::with_capacity(file, chunk_bytes),
    })
}

/// GET /all-cities
///
/// Streams the dataset file as stored on disk; the store is not consulted
/// and the file is never read into memory whole.
pub async fn all_cities_handler(
    State(state): State<AppState>,
) -> AppResult<Response> {
    let dataset = &state.config().dataset;

    let DatasetStream { len, stream } =
        open_dataset_stream(&dataset.path, dataset.stream_chunk_bytes)
            .await
            .map_err(|err| {
                error!(path = %dataset.path.display(), error = %err, "failed to open dataset for streaming");
                AppError::internal("Server error")
            })?;

    let path = dataset.path.clone();
    let stream = stream.inspect_err(move |err| {
        error!(path = %path.display(), error = %err, "dataset stream interrupted");
    });

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, len)
        .body(Body::from_stream(stream))
        .map_err(|err| AppError::internal(err.to_string()))
}
