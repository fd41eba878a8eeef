//! Bare specifier parsing

/// Split a bare specifier into package name and subpath.
///
/// Examples:
/// - "shared" → ("shared", None)
/// - "shared/./autoInit.js" → ("shared", Some("./autoInit.js"))
/// - "@scope/pkg" → ("@scope/pkg", None)
/// - "@scope/pkg/package.json" → ("@scope/pkg", Some("package.json"))
///
/// Returns `None` for an empty specifier or a scope without a package name.
pub fn split_package_specifier(specifier: &str) -> Option<(&str, Option<&str>)> {
    if specifier.is_empty() {
        return None;
    }

    let name_end = if specifier.starts_with('@') {
        let scope_end = specifier.find('/')?;
        if scope_end == 1 || scope_end + 1 == specifier.len() {
            return None;
        }
        specifier[scope_end + 1..]
            .find('/')
            .map(|i| scope_end + 1 + i)
    } else {
        specifier.find('/')
    };

    match name_end {
        Some(0) => None,
        Some(end) => Some((&specifier[..end], Some(&specifier[end + 1..]))),
        None => Some((specifier, None)),
    }
}

/// Normalize a package subpath to `/`-joined segments.
///
/// Empty and `.` segments are dropped and `..` pops the previous segment.
/// An empty result names the package root. Returns `None` when the subpath
/// climbs out of the package.
pub fn normalize_subpath(subpath: &str) -> Option<String> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in subpath.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }
    Some(segments.join("/"))
}
