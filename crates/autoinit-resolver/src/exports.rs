//! `exports` field matching
//!
//! Supports the forms packages use in practice: a single target string, a
//! fallback array, a conditions object, and a subpath map with exact keys,
//! single-`*` patterns and legacy trailing-`/` folder keys.

use serde_json::{Map, Value};

/// Resolve `subpath` (`"."` or `"./…"`) against an `exports` value.
///
/// Returns the package-relative target (always starting with `./`), or
/// `None` when the package does not expose the subpath under the given
/// conditions. `default` always matches. Targets that would leave the
/// package root through `.` or `..` segments are rejected.
pub fn resolve_exports(exports: &Value, subpath: &str, conditions: &[String]) -> Option<String> {
    let target = match exports {
        Value::Object(map) if is_subpath_map(map) => resolve_subpath_map(map, subpath, conditions),
        // Sugar for `{ ".": <exports> }`.
        other if subpath == "." => resolve_target(other, None, conditions),
        _ => None,
    };
    target.filter(|target| stays_in_package(target))
}

/// `./`-prefixed and free of `.` and `..` segments after the prefix.
fn stays_in_package(target: &str) -> bool {
    target
        .strip_prefix("./")
        .is_some_and(|rest| rest.split('/').all(|segment| segment != "." && segment != ".."))
}

fn is_subpath_map(map: &Map<String, Value>) -> bool {
    map.keys().any(|key| key.starts_with('.'))
}

fn resolve_subpath_map(map: &Map<String, Value>, subpath: &str, conditions: &[String]) -> Option<String> {
    if let Some(target) = map.get(subpath) {
        if !subpath.contains('*') {
            return resolve_target(target, None, conditions);
        }
    }

    // Longest matching prefix wins; patterns and folder keys compete on the
    // same footing.
    let mut best: Option<(&str, &Value, String)> = None;
    for (key, target) in map {
        let Some(matched) = match_key(key, subpath) else {
            continue;
        };
        let prefix_len = key.find('*').unwrap_or(key.len());
        let longer = best
            .as_ref()
            .map_or(true, |(best_key, _, _)| prefix_len > best_key.find('*').unwrap_or(best_key.len()));
        if longer {
            best = Some((key.as_str(), target, matched));
        }
    }

    let (key, target, matched) = best?;
    if key.contains('*') {
        resolve_target(target, Some(&matched), conditions)
    } else {
        resolve_target(target, None, conditions).map(|base| format!("{base}{matched}"))
    }
}

/// The part of `subpath` matched by a pattern or folder key.
fn match_key(key: &str, subpath: &str) -> Option<String> {
    if let Some(star) = key.find('*') {
        let (prefix, suffix) = (&key[..star], &key[star + 1..]);
        if suffix.contains('*') {
            return None;
        }
        if subpath.len() >= prefix.len() + suffix.len()
            && subpath.starts_with(prefix)
            && subpath.ends_with(suffix)
        {
            return Some(subpath[prefix.len()..subpath.len() - suffix.len()].to_string());
        }
        return None;
    }

    if key.ends_with('/') && subpath.starts_with(key) {
        return Some(subpath[key.len()..].to_string());
    }
    None
}

fn resolve_target(target: &Value, matched: Option<&str>, conditions: &[String]) -> Option<String> {
    match target {
        Value::String(path) => {
            if !stays_in_package(path) {
                return None;
            }
            Some(match matched {
                Some(m) => path.replace('*', m),
                None => path.clone(),
            })
        }
        Value::Array(candidates) => candidates
            .iter()
            .find_map(|candidate| resolve_target(candidate, matched, conditions)),
        Value::Object(branches) => branches.iter().find_map(|(condition, branch)| {
            let active = condition == "default" || conditions.iter().any(|c| c == condition);
            if active {
                resolve_target(branch, matched, conditions)
            } else {
                None
            }
        }),
        _ => None,
    }
}
