//! Import synthesis

use std::path::Path;

use autoinit_manifest::ManifestLoader;
use autoinit_resolver::Resolver;
use serde_json::Value;

use crate::discover::discover;
use crate::error::DiscoveryError;

/// Render one side-effect import per id, in order, newline-separated.
///
/// Ids are emitted as JSON string literals, which are valid JavaScript
/// string literals for any path.
pub fn synthesize<I>(ids: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    ids.into_iter()
        .map(|id| format!("import {};", quote(id.as_ref())))
        .collect::<Vec<_>>()
        .join("\n")
}

fn quote(id: &str) -> String {
    // JSON leaves the line and paragraph separators raw; pre-ES2019 parsers
    // reject them inside string literals.
    Value::from(id)
        .to_string()
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

/// Walk the graph rooted at `start` and render its auto-init imports.
pub fn generate_auto_init_imports<R, L>(start: &Path, resolver: &R, loader: &L) -> Result<String, DiscoveryError>
where
    R: Resolver + ?Sized,
    L: ManifestLoader + ?Sized,
{
    let discovery = discover(start, resolver, loader)?;
    Ok(synthesize(&discovery.modules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoinit_resolver::ModuleId;

    #[test]
    fn test_one_import_per_line() {
        let ids = [ModuleId::new("/pkgs/a/init.js"), ModuleId::new("/pkgs/b/init.js")];
        assert_eq!(
            synthesize(&ids),
            "import \"/pkgs/a/init.js\";\nimport \"/pkgs/b/init.js\";"
        );
    }

    #[test]
    fn test_empty_input_is_empty_module() {
        assert_eq!(synthesize(Vec::<String>::new()), "");
    }

    #[test]
    fn test_special_characters_are_escaped() {
        let source = synthesize([
            r#"C:\pkgs\"quoted"\init.js"#,
            "/pkgs/line\nbreak.js",
            "/pkgs/sep\u{2028}.js",
            "\0virtual:id",
        ]);
        let lines: Vec<_> = source.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], r#"import "C:\\pkgs\\\"quoted\"\\init.js";"#);
        assert_eq!(lines[1], r#"import "/pkgs/line\nbreak.js";"#);
        assert_eq!(lines[2], r#"import "/pkgs/sep\u2028.js";"#);
        assert_eq!(lines[3], r#"import "\u0000virtual:id";"#);
    }
}
