//! Parsing of customer list-query parameters.
//!
//! The `active` flag and the `change_status` body use string values rather
//! than JSON booleans: only the exact strings `"False"` and `"True"` are
//! meaningful, everything else falls back to the documented default.

/// Default page size for list endpoints.
pub const DEFAULT_LIMIT: i64 = 100;
/// Largest page size a caller may request.
pub const MAX_LIMIT: i64 = 500;

/// Resolve the `?active=` query parameter.
///
/// Only the exact string `"False"` selects inactive customers; a missing
/// parameter or any other value selects active ones.
pub fn parse_active_filter(raw: Option<&str>) -> bool {
    raw != Some("False")
}

/// Resolve the `active` field of a `change_status` body.
///
/// `"True"` activates; any other string deactivates.
pub fn parse_status_value(raw: &str) -> bool {
    raw == "True"
}

/// Column a customer list may be sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
}

impl SortField {
    fn column(self) -> &'static str {
        match self {
            Self::Id => "c.id",
            Self::Name => "c.name",
        }
    }
}

/// One `field` or `-field` term of an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub descending: bool,
}

/// Sort order accepted by the customer list `?ordering=` parameter.
///
/// A comma-separated list of `id`, `-id`, `name`, `-name`. Unknown terms are
/// skipped; when nothing usable remains the list is newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerOrdering(Vec<SortKey>);

impl Default for CustomerOrdering {
    fn default() -> Self {
        Self(vec![SortKey {
            field: SortField::Id,
            descending: true,
        }])
    }
}

impl CustomerOrdering {
    pub fn parse(raw: Option<&str>) -> Self {
        let mut keys: Vec<SortKey> = Vec::new();
        for term in raw.unwrap_or_default().split(',').map(str::trim) {
            let (descending, name) = match term.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, term),
            };
            let field = match name {
                "id" => SortField::Id,
                "name" => SortField::Name,
                _ => continue,
            };
            if keys.iter().all(|k| k.field != field) {
                keys.push(SortKey { field, descending });
            }
        }
        if keys.is_empty() {
            Self::default()
        } else {
            Self(keys)
        }
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.0
    }

    /// SQL `ORDER BY` fragment. Always ends on `c.id` so pages are stable.
    pub fn as_sql(&self) -> String {
        let mut parts: Vec<String> = self
            .0
            .iter()
            .map(|k| format!("{} {}", k.field.column(), direction(k.descending)))
            .collect();
        if self.0.iter().all(|k| k.field != SortField::Id) {
            let descending = self.0.first().is_some_and(|k| k.descending);
            parts.push(format!("c.id {}", direction(descending)));
        }
        parts.join(", ")
    }
}

fn direction(descending: bool) -> &'static str {
    if descending {
        "DESC"
    } else {
        "ASC"
    }
}

/// Split a `?search=` value into terms on whitespace and commas.
pub fn split_search_terms(raw: &str) -> Vec<String> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Escape `%`, `_` and `\\` so user input matches literally inside an `ILIKE` pattern.
pub fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Clamp a user-provided limit to `1..=max`, substituting `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
