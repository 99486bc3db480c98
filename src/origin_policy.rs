use std::process::{Command, Stdio};

use url::Url;

use crate::SHELL_SCHEME;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    OpenExternally,
    Block,
}

pub fn normalize_app_url(raw: &str, default_app_url: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return default_app_url.to_string();
    }

    match Url::parse(trimmed) {
        Ok(mut parsed) if matches!(parsed.scheme(), "http" | "https") => {
            if parsed.path().is_empty() {
                parsed.set_path("/");
            }
            parsed.to_string()
        }
        _ => default_app_url.to_string(),
    }
}

pub fn parse_openable_url(raw_url: &str) -> Result<Url, String> {
    let trimmed = raw_url.trim();
    if trimmed.is_empty() {
        return Err("Missing external URL.".to_string());
    }

    let parsed = Url::parse(trimmed).map_err(|error| format!("Invalid URL: {error}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(format!(
            "Unsupported URL scheme '{scheme}', only http/https are allowed."
        )),
    }
}

pub fn shell_page_url(page: &str) -> Result<Url, String> {
    let raw = if cfg!(any(target_os = "windows", target_os = "android")) {
        format!("http://{SHELL_SCHEME}.localhost/{page}")
    } else {
        format!("{SHELL_SCHEME}://localhost/{page}")
    };
    Url::parse(&raw).map_err(|error| format!("Invalid shell page URL {raw}: {error}"))
}

pub fn is_shell_url(url: &Url) -> bool {
    if url.scheme() == SHELL_SCHEME {
        return true;
    }
    matches!(url.scheme(), "http" | "https")
        && url.host_str() == Some(format!("{SHELL_SCHEME}.localhost").as_str())
}

pub fn is_same_origin(left: &Url, right: &Url) -> bool {
    left.origin() == right.origin()
}

/// Local shell surfaces never leave the shell origin; web links are handed to
/// the system browser and anything else is dropped.
pub fn shell_navigation_decision(target: &Url) -> NavigationDecision {
    if is_shell_url(target) || target.scheme() == "about" {
        return NavigationDecision::Allow;
    }
    match target.scheme() {
        "http" | "https" => NavigationDecision::OpenExternally,
        _ => NavigationDecision::Block,
    }
}

#[cfg(target_os = "macos")]
fn open_url_with_system_browser(url: &str) -> Result<(), String> {
    Command::new("open")
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run 'open': {error}"))
}

#[cfg(target_os = "windows")]
fn open_url_with_system_browser(url: &str) -> Result<(), String> {
    Command::new("rundll32")
        .args(["url.dll,FileProtocolHandler", url])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run 'rundll32': {error}"))
}

#[cfg(all(unix, not(target_os = "macos")))]
fn open_url_with_system_browser(url: &str) -> Result<(), String> {
    Command::new("xdg-open")
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run 'xdg-open': {error}"))
}

#[cfg(not(any(target_os = "macos", target_os = "windows", unix)))]
fn open_url_with_system_browser(_url: &str) -> Result<(), String> {
    Err("Opening external URLs is not supported on this platform.".to_string())
}

pub fn open_external(raw_url: &str) -> Result<(), String> {
    let parsed = parse_openable_url(raw_url)?;
    open_url_with_system_browser(parsed.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: &str = "https://gangio.vercel.app/";

    #[test]
    fn normalize_app_url_falls_back_for_blank_or_invalid_values() {
        assert_eq!(normalize_app_url("", DEFAULT), DEFAULT);
        assert_eq!(normalize_app_url("not a url", DEFAULT), DEFAULT);
        assert_eq!(normalize_app_url("file:///etc/passwd", DEFAULT), DEFAULT);
        assert_eq!(
            normalize_app_url(" https://staging.gangio.app ", DEFAULT),
            "https://staging.gangio.app/"
        );
    }

    #[test]
    fn parse_openable_url_only_accepts_web_schemes() {
        assert!(parse_openable_url("https://example.com/a").is_ok());
        assert!(parse_openable_url("   ").is_err());
        assert!(parse_openable_url("javascript:alert(1)").is_err());
        assert!(parse_openable_url("file:///tmp/x").is_err());
    }

    #[test]
    fn shell_page_url_is_recognized_as_shell_origin() {
        let url = shell_page_url("splash.html").expect("shell url");
        assert!(is_shell_url(&url));
        assert!(url.path().ends_with("/splash.html"));
    }

    #[test]
    fn shell_navigation_keeps_shell_pages_and_hands_off_web_links() {
        let shell = shell_page_url("titlebar.html").expect("shell url");
        assert_eq!(shell_navigation_decision(&shell), NavigationDecision::Allow);

        let web = Url::parse("https://github.com/korybantes").expect("url");
        assert_eq!(
            shell_navigation_decision(&web),
            NavigationDecision::OpenExternally
        );

        let file = Url::parse("file:///etc/hosts").expect("url");
        assert_eq!(shell_navigation_decision(&file), NavigationDecision::Block);
    }

    #[test]
    fn same_origin_compares_scheme_host_and_port() {
        let app = Url::parse("https://gangio.vercel.app/login").expect("url");
        let same = Url::parse("https://gangio.vercel.app/channels/1").expect("url");
        let other = Url::parse("https://gangio.vercel.app:8443/").expect("url");
        assert!(is_same_origin(&app, &same));
        assert!(!is_same_origin(&app, &other));
    }
}
