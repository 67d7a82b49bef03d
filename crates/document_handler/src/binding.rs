//! Wires placeholder tokens in a rendered scope to reactive variables.
//!
//! Binding is a one-shot scan: the regions and token positions considered
//! are those present when `bind_scope` runs. Each matched variable gets one
//! subscriber per bind call; subscriptions are never removed, so rebinding
//! the same scope accumulates them (bounded by the configured cap).

use crate::output::{OutputScope, SharedText};
use anyhow::anyhow;
use log::warn;
use reactive::VariableStore;
use script::Value;
use std::sync::Arc;

/// Scan `scope` and subscribe reactive variables to their matching text
/// regions.
///
/// Names come from two places: `{{ident}}` tokens found in the scope's
/// current text, and variables already bound reactively in the store. A
/// token whose name is unbound gets a fresh undefined-valued cell installed
/// so a later reactive declaration flows through the live subscription; a
/// token whose name holds a plain value is left alone. Every collected
/// name is subscribed, matching regions or not: subscriber lists only
/// grow.
///
/// On each change notification, a matched region has the first remaining
/// occurrence of the token replaced with the value's string form; once the
/// token text is consumed, the previously written value string is replaced
/// in place instead. Replaced token text is never restored.
pub(crate) fn bind_scope(
    scope: &OutputScope,
    variables: &mut VariableStore<Value>,
    max_subscribers: usize,
) {
    let mut names = scan_placeholder_names(scope);
    for name in variables.reactive_names() {
        if !names.contains(&name) {
            names.push(name);
        }
    }

    for name in names {
        let Some(cell) = variables.bind_reactive(&name) else {
            continue;
        };
        let token = format!("{{{{{name}}}}}");
        let targets: Vec<SharedText> = scope
            .regions
            .iter()
            .filter(|region| {
                region
                    .lock()
                    .map(|text| text.contains(&token))
                    .unwrap_or(false)
            })
            .map(Arc::clone)
            .collect();

        let Ok(mut cell) = cell.lock() else {
            warn!("Reactive cell for {name} is poisoned; skipping binding");
            continue;
        };
        if cell.subscriber_count() >= max_subscribers {
            warn!(
                "Subscription cap ({max_subscribers}) reached for variable {name}; \
                 skipping binding"
            );
            continue;
        }

        let mut last_written: Vec<Option<String>> = vec![None; targets.len()];
        cell.subscribe(Box::new(move |value: &Value| {
            let replacement = value.to_string();
            for (region, last) in targets.iter().zip(last_written.iter_mut()) {
                let mut text = region
                    .lock()
                    .map_err(|_| anyhow!("bound text region poisoned"))?;
                if substitute(&mut text, &token, last.as_deref(), &replacement) {
                    *last = Some(replacement.clone());
                }
            }
            Ok(())
        }));
    }
}

/// Replace the first occurrence of `token`, or, once the token text is
/// gone, of the previously written value, with `replacement`. Returns
/// whether anything changed.
fn substitute(
    text: &mut String,
    token: &str,
    previous: Option<&str>,
    replacement: &str,
) -> bool {
    if let Some(position) = text.find(token) {
        text.replace_range(position..position + token.len(), replacement);
        return true;
    }
    if let Some(previous) = previous {
        if let Some(position) = text.find(previous) {
            text.replace_range(position..position + previous.len(), replacement);
            return true;
        }
    }
    false
}

/// Names of all well-formed `{{ident}}` tokens in the scope's current text.
fn scan_placeholder_names(scope: &OutputScope) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for region in &scope.regions {
        let Ok(text) = region.lock() else {
            continue;
        };
        let mut rest: &str = &text;
        while let Some(start) = rest.find("{{") {
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                break;
            };
            let candidate = &after[..end];
            if !candidate.is_empty()
                && candidate
                    .chars()
                    .all(|character| character.is_ascii_alphanumeric() || character == '_')
                && !names.iter().any(|name| name.as_str() == candidate)
            {
                names.push(candidate.to_owned());
            }
            rest = &after[end + 2..];
        }
    }
    names
}
