use std::{borrow::Cow, fs, path::Path};

use tauri::{
    http::{header::CONTENT_TYPE, Request, Response, StatusCode},
    Manager, UriSchemeContext, Wry,
};

use crate::{append_desktop_log, resource_locator::ResourceLocator, runtime_paths};

const SHELL_ASSET_DIR: &str = "shell";

pub(crate) fn sanitize_request_path(raw_path: &str) -> Option<String> {
    let path = raw_path.split(['?', '#']).next().unwrap_or_default();
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return None;
    }

    let segments: Vec<&str> = path.split('/').collect();
    if segments
        .iter()
        .any(|segment| segment.is_empty() || *segment == "." || *segment == ".." || segment.contains('\\'))
    {
        return None;
    }
    Some(segments.join("/"))
}

pub(crate) fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|extension| extension.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}

fn respond(status: StatusCode, content_type: &str, body: Vec<u8>) -> Response<Cow<'static, [u8]>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, content_type)
        .body(Cow::Owned(body))
        .unwrap_or_else(|_| Response::new(Cow::Borrowed(b"" as &[u8])))
}

fn read_shell_asset(locator: &ResourceLocator, request_path: &str) -> Response<Cow<'static, [u8]>> {
    let Some(relative) = sanitize_request_path(request_path) else {
        append_desktop_log(&format!("rejected shell asset request: {request_path}"));
        return respond(StatusCode::BAD_REQUEST, "text/plain", b"bad request".to_vec());
    };

    let located = locator.locate(&format!("{SHELL_ASSET_DIR}/{relative}"));
    if !located.found {
        append_desktop_log(&format!(
            "shell asset {} not found; best guess was {}",
            relative,
            located.path.display()
        ));
        return respond(StatusCode::NOT_FOUND, "text/plain", b"not found".to_vec());
    }

    match fs::read(&located.path) {
        Ok(bytes) => respond(StatusCode::OK, mime_for(&located.path), bytes),
        Err(error) => {
            append_desktop_log(&format!(
                "failed to read shell asset {}: {}",
                located.path.display(),
                error
            ));
            respond(
                StatusCode::INTERNAL_SERVER_ERROR,
                "text/plain",
                b"unreadable".to_vec(),
            )
        }
    }
}

pub fn handle_shell_request(
    ctx: UriSchemeContext<'_, Wry>,
    request: Request<Vec<u8>>,
) -> Response<Cow<'static, [u8]>> {
    let path = request.uri().path().to_string();
    let app_handle = ctx.app_handle();
    match app_handle.try_state::<ResourceLocator>() {
        Some(locator) => read_shell_asset(&locator, &path),
        None => {
            let locator = ResourceLocator::new(
                runtime_paths::locator_roots(app_handle),
                runtime_paths::is_packaged_build(),
            );
            read_shell_asset(&locator, &path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_locator::LocatorRoots;

    #[test]
    fn sanitize_request_path_rejects_traversal_and_empty_paths() {
        assert_eq!(sanitize_request_path("/splash.html"), Some("splash.html".to_string()));
        assert_eq!(
            sanitize_request_path("/fonts/inter.woff2?v=2"),
            Some("fonts/inter.woff2".to_string())
        );
        assert_eq!(sanitize_request_path("/"), None);
        assert_eq!(sanitize_request_path("/../settings.json"), None);
        assert_eq!(sanitize_request_path("/a//b.css"), None);
        assert_eq!(sanitize_request_path("/..\\secret"), None);
    }

    #[test]
    fn mime_for_maps_common_extensions() {
        assert_eq!(mime_for(Path::new("splash.html")), "text/html; charset=utf-8");
        assert_eq!(mime_for(Path::new("shell.css")), "text/css; charset=utf-8");
        assert_eq!(mime_for(Path::new("blob.bin")), "application/octet-stream");
    }

    #[test]
    fn read_shell_asset_serves_located_files_and_404s_missing_ones() {
        let dir = tempfile::tempdir().expect("temp dir");
        let shell_dir = dir.path().join("shell");
        fs::create_dir_all(&shell_dir).expect("create shell dir");
        fs::write(shell_dir.join("splash.html"), "<html></html>").expect("write page");

        let locator = ResourceLocator::new(
            LocatorRoots {
                manifest_dir: Some(dir.path().to_path_buf()),
                ..LocatorRoots::default()
            },
            false,
        );

        let response = read_shell_asset(&locator, "/splash.html");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body().as_ref(), b"<html></html>");

        let missing = read_shell_asset(&locator, "/nope.html");
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let rejected = read_shell_asset(&locator, "/../secret");
        assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
    }
}
