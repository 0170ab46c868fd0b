/// How closely a candidate's destination matches the searched one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationMatch {
    /// Equal ignoring case and surrounding whitespace
    Exact,
    /// One destination contains the other
    Partial,
    /// Only the caller's search pattern matches
    Pattern,
    None,
}

/// Lowercase and trim a free-text place name for comparison
#[inline]
pub fn normalize_destination(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Literal, case-insensitive search pattern used to pre-filter candidates
///
/// Special characters are never interpreted: `"Rio (Brazil)"` only matches
/// destinations containing that exact text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPattern {
    needle: String,
}

impl SearchPattern {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: normalize_destination(raw),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Check whether `destination` contains the pattern
    #[inline]
    pub fn matches(&self, destination: &str) -> bool {
        !self.needle.is_empty() && destination.to_lowercase().contains(&self.needle)
    }

    /// Render the pattern for a SQL `ILIKE ... ESCAPE '\'` clause
    pub fn to_like_pattern(&self) -> String {
        let mut escaped = String::with_capacity(self.needle.len() + 2);
        escaped.push('%');
        for ch in self.needle.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                escaped.push('\\');
            }
            escaped.push(ch);
        }
        escaped.push('%');
        escaped
    }
}

/// Classify the destination match between a query and a candidate
pub fn classify_destination(
    query_destination: &str,
    candidate_destination: &str,
    pattern: &SearchPattern,
) -> DestinationMatch {
    let query = normalize_destination(query_destination);
    let candidate = normalize_destination(candidate_destination);

    if query.is_empty() || candidate.is_empty() {
        return if pattern.matches(candidate_destination) {
            DestinationMatch::Pattern
        } else {
            DestinationMatch::None
        };
    }

    if query == candidate {
        DestinationMatch::Exact
    } else if candidate.contains(&query) || query.contains(&candidate) {
        DestinationMatch::Partial
    } else if pattern.matches(candidate_destination) {
        DestinationMatch::Pattern
    } else {
        DestinationMatch::None
    }
}
