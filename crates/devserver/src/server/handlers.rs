//! Static file handler: path resolution, MIME lookup, full and ranged bodies.

use std::{
    io::SeekFrom,
    path::{Component, Path, PathBuf},
};

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use common::{
    mime::{is_video, mime_for_path, DEFAULT_MIME},
    range::unsatisfied_content_range,
    ByteRange, RangeError, ServeError,
};
use percent_encoding::percent_decode_str;
use tokio::{
    fs::{self, File},
    io::{AsyncReadExt, AsyncSeekExt},
};
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

use super::{middleware::ALLOWED_METHODS, state::AppState};

/// Read buffer size used when streaming file bodies.
const STREAM_CHUNK: usize = 64 * 1024;

/// An opened file under the document root.
#[derive(Debug)]
struct Resource {
    file: File,
    size: u64,
    mime: &'static str,
}

/// Fallback handler serving every path under the document root.
///
/// - `OPTIONS` → `200` with no body (CORS preflight).
/// - `GET`/`HEAD` → `200` with the full file, or `206` with a single window
///   when a video is requested with a satisfiable `Range` header.
/// - Anything else → `405`.
pub async fn serve_file(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let target = resolve_target(&state.doc_root, &state.index_file, uri.path());

    if method == Method::OPTIONS {
        let mime = target.as_deref().map_or(DEFAULT_MIME, mime_for_path);
        return preflight(mime);
    }
    if method != Method::GET && method != Method::HEAD {
        return error_response(&ServeError::MethodNotAllowed);
    }

    let result = match target {
        Ok(path) => serve_path(&path, &state.index_file, &method, &headers).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(resp) => resp,
        Err(e) => {
            if matches!(e, ServeError::Io(_)) {
                warn!(path = %uri.path(), error = %e, "failed to serve file");
            }
            error_response(&e)
        }
    }
}

/// Map a request path onto the filesystem below `root`.
///
/// The path is percent-decoded and normalised; an empty path yields
/// `index_file`. Targets that would leave `root` (via `..`) or that do not
/// decode as UTF-8 are reported as [`ServeError::NotFound`].
pub fn resolve_target(root: &Path, index_file: &str, request_path: &str) -> Result<PathBuf, ServeError> {
    let decoded = percent_decode_str(request_path)
        .decode_utf8()
        .map_err(|_| ServeError::NotFound)?;

    let mut relative = PathBuf::new();
    for component in Path::new(decoded.trim_start_matches('/')).components() {
        match component {
            Component::Normal(segment) => relative.push(segment),
            Component::RootDir | Component::CurDir => {}
            Component::ParentDir | Component::Prefix(_) => return Err(ServeError::NotFound),
        }
    }

    if relative.as_os_str().is_empty() {
        relative.push(index_file);
    }
    Ok(root.join(relative))
}

async fn serve_path(
    path: &Path,
    index_file: &str,
    method: &Method,
    headers: &HeaderMap,
) -> Result<Response, ServeError> {
    let mut resource = open_resource(path, index_file).await?;

    let window = match requested_range(headers, &resource)? {
        Some(range) => {
            resource.file.seek(SeekFrom::Start(range.start)).await?;
            Some(range)
        }
        None => None,
    };
    let len = window.map_or(resource.size, |r| r.len());

    let body = if *method == Method::HEAD {
        Body::empty()
    } else {
        let reader = resource.file.take(len);
        Body::from_stream(ReaderStream::with_capacity(reader, STREAM_CHUNK))
    };

    let mut response_headers = HeaderMap::new();
    response_headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(resource.mime));
    response_headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));

    match window {
        Some(range) => {
            debug!(path = %path.display(), start = range.start, end = range.end, size = resource.size, "serving byte range");
            Ok((
                StatusCode::PARTIAL_CONTENT,
                response_headers,
                [(header::CONTENT_RANGE, range.content_range(resource.size))],
                body,
            )
                .into_response())
        }
        None => Ok((StatusCode::OK, response_headers, body).into_response()),
    }
}

/// Stat `path` (descending into `index_file` for directories) and open it.
async fn open_resource(path: &Path, index_file: &str) -> Result<Resource, ServeError> {
    let mut path = path.to_path_buf();
    let mut meta = fs::metadata(&path).await?;
    if meta.is_dir() {
        path.push(index_file);
        meta = fs::metadata(&path).await?;
        if meta.is_dir() {
            return Err(ServeError::NotFound);
        }
    }

    let file = File::open(&path).await?;
    Ok(Resource {
        file,
        size: meta.len(),
        mime: mime_for_path(&path),
    })
}

/// The byte window to serve, if the request asked for one the server honours.
///
/// Only video resources are served in ranges. Malformed headers are ignored
/// and the whole file is served; unsatisfiable ones fail with `416`.
fn requested_range(headers: &HeaderMap, resource: &Resource) -> Result<Option<ByteRange>, ServeError> {
    if !is_video(resource.mime) {
        return Ok(None);
    }
    let Some(value) = headers.get(header::RANGE) else {
        return Ok(None);
    };
    let Ok(value) = value.to_str() else {
        return Ok(None);
    };

    match ByteRange::parse(value, resource.size) {
        Ok(range) => Ok(Some(range)),
        Err(RangeError::Malformed) => {
            debug!(range = %value, "ignoring malformed Range header");
            Ok(None)
        }
        Err(RangeError::Unsatisfiable) => Err(ServeError::RangeNotSatisfiable {
            size: resource.size,
        }),
    }
}

/// `200` response to a CORS preflight.
fn preflight(mime: &'static str) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, mime)]).into_response()
}

/// Render a [`ServeError`] as the browser-facing response.
pub fn error_response(err: &ServeError) -> Response {
    match err {
        ServeError::NotFound => {
            (StatusCode::NOT_FOUND, Html("<h1>404 Not Found</h1>")).into_response()
        }
        ServeError::MethodNotAllowed => {
            (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, ALLOWED_METHODS)]).into_response()
        }
        ServeError::RangeNotSatisfiable { size } => (
            StatusCode::RANGE_NOT_SATISFIABLE,
            [(header::CONTENT_RANGE, unsatisfied_content_range(*size))],
        )
            .into_response(),
        ServeError::Io(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Server Error: {}", err.code()),
        )
            .into_response(),
    }
}
