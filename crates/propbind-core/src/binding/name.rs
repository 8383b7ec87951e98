//! Property name parsing and relaxed comparison

use std::fmt;

use super::error::BindError;

/// Reduce an element to its canonical snake_case form
///
/// `max-size`, `max_size`, `maxSize` and `MAX_SIZE` all become `max_size`,
/// which is how `serde` spells the field. Characters other than
/// alphanumerics, `-` and `_` are dropped.
pub(crate) fn canonical(element: &str) -> String {
    let mut out = String::with_capacity(element.len() + 4);
    // Last pushed character was a lowercase letter or digit.
    let mut after_lower = false;
    for c in element.chars() {
        if c == '-' || c == '_' {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            after_lower = false;
        } else if c.is_alphanumeric() {
            if c.is_uppercase() && after_lower {
                out.push('_');
            }
            out.extend(c.to_lowercase());
            after_lower = c.is_lowercase() || c.is_numeric();
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Split a key into elements; `servers[0].host` gives `servers`, `0`, `host`
///
/// Returns `None` for malformed keys (empty elements, unclosed brackets).
/// The empty key has no elements.
pub(crate) fn split_key(key: &str) -> Option<Vec<String>> {
    let mut elements = Vec::new();
    let mut current = String::new();
    // Just after `]`, where only `.` or `[` may follow.
    let mut closed = false;
    // Just after `.`, where an element must follow.
    let mut pending = false;
    let mut chars = key.chars();

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if !current.is_empty() {
                    elements.push(std::mem::take(&mut current));
                } else if !closed {
                    return None;
                }
                closed = false;
                pending = true;
            }
            '[' => {
                if !current.is_empty() {
                    elements.push(std::mem::take(&mut current));
                } else if pending || elements.is_empty() {
                    return None;
                }
                let mut index = String::new();
                loop {
                    match chars.next() {
                        Some(']') => break,
                        Some(c) => index.push(c),
                        None => return None,
                    }
                }
                if index.is_empty() {
                    return None;
                }
                elements.push(index);
                closed = true;
                pending = false;
            }
            c => {
                if closed {
                    return None;
                }
                current.push(c);
                pending = false;
            }
        }
    }

    if !current.is_empty() {
        elements.push(current);
    } else if pending {
        return None;
    }
    Some(elements)
}

/// A validated binder name such as `db` or `app.servers[0]`
///
/// Elements are kept in canonical form; the name as written is kept for
/// messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyName {
    original: String,
    elements: Vec<String>,
}

impl PropertyName {
    /// Parse a name; the empty name refers to the root
    pub fn parse(name: &str) -> Result<Self, BindError> {
        let elements = split_key(name).ok_or_else(|| BindError::InvalidName {
            name: name.to_string(),
            reason: "elements must be non-empty and separated by a single '.'".to_string(),
        })?;
        let mut canonical_elements = Vec::with_capacity(elements.len());
        for element in &elements {
            let form = canonical(element);
            if form.is_empty() {
                return Err(BindError::InvalidName {
                    name: name.to_string(),
                    reason: format!("element {element:?} has no alphanumeric characters"),
                });
            }
            canonical_elements.push(form);
        }
        Ok(Self {
            original: name.to_string(),
            elements: canonical_elements,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Canonical elements
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// Canonical dotted path, `servers.0` for `Servers[0]`
    pub fn path(&self) -> String {
        self.elements.join(".")
    }

    pub fn is_root(&self) -> bool {
        self.elements.is_empty()
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}
