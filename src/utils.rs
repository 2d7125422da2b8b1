//! Helpers for remote URLs and git-formatted paths

use std::path::Path;

/// Check if a remote is a local filesystem path (not a hosted URL)
///
/// Returns true for absolute Unix/Windows paths, `./` and `../` relative
/// paths, `file://` URLs and UNC paths.
pub fn is_local_path(path: &str) -> bool {
  if path.starts_with("./") || path.starts_with("../") || path.starts_with("file://") {
    return true;
  }

  // Windows drive letter (C:\ or C:/), checked before the scp-style ':' test
  if path.len() >= 3 {
    let bytes = path.as_bytes();
    if bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && (bytes[2] == b'\\' || bytes[2] == b'/') {
      return true;
    }
  }

  if path.starts_with("\\\\") {
    return true;
  }

  if path.starts_with('/') && !path.contains("://") && !path.contains('@') {
    return true;
  }

  false
}

/// Reduce a remote URL to its `owner/repo` slug
///
/// Accepts:
/// - `https://github.com/owner/repo(.git)`
/// - `ssh://git@github.com/owner/repo(.git)`
/// - `git@github.com:owner/repo(.git)`
/// - `owner/repo`
///
/// Local paths and anything without an owner segment yield None.
pub fn parse_repo_slug(url: &str) -> Option<String> {
  let url = url.trim();
  if url.is_empty() || is_local_path(url) {
    return None;
  }

  let path = if let Some((_, rest)) = url.split_once("://") {
    // Drop the host (and any credentials before it)
    rest.split_once('/').map(|(_, path)| path)?
  } else if let Some((_, path)) = url.split_once(':') {
    path
  } else {
    url
  };

  let path = path.trim_matches('/');
  let path = path.strip_suffix(".git").unwrap_or(path);

  let segments: Vec<&str> = path.split('/').collect();
  if segments.len() < 2 || segments.iter().any(|s| s.is_empty()) {
    return None;
  }

  Some(path.to_string())
}

/// Convert a path to Git format (always forward slashes)
pub fn path_to_git_format(path: &Path) -> String {
  #[cfg(target_os = "windows")]
  {
    path.to_string_lossy().replace('\\', "/")
  }
  #[cfg(not(target_os = "windows"))]
  {
    path.to_string_lossy().to_string()
  }
}
