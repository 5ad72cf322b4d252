//! Placeholder substitution for template overrides
//!
//! Only `${key}` placeholders are recognized. Unknown keys and any other
//! text are copied through untouched, so templates written for another
//! engine survive a pass through here.

use std::collections::BTreeMap;

/// Substitution keys for one artifact
pub type TemplateVars = BTreeMap<&'static str, String>;

/// Replace every `${key}` whose key is present in `vars`
pub fn substitute(template: &str, vars: &TemplateVars) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let key = &after[..end];
                match vars.get(key) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&rest[start..start + 2 + end + 1]),
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
