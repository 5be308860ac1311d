use crate::Result;
use crate::error::DbError;
use crate::param::strategy::InterpolateStrategy;
use log::trace;
use regex::Regex;
use std::sync::LazyLock;

/// Prefix that introduces a named parameter: `:name`.
pub const NAMED_PLACEHOLDER_PREFIX: char = ':';

/// Placeholder for positional parameters. Every occurrence is replaced by the
/// driver's own token, in order.
pub const POSITIONAL_PLACEHOLDER: char = '?';

// The template has already been split on the prefix, so the name is always
// anchored at the start of a segment.
static NAMED_PARAMETER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*").expect("valid regex"));

/// A named-parameter template broken into the literal SQL between markers and
/// the marker names in the order they appear.
///
/// `literals` always holds one more entry than `names`: the text before the
/// first marker, then the text following each marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedTemplate {
    literals: Vec<String>,
    names: Vec<String>,
}

impl NamedTemplate {
    /// Splits `template` on the named prefix. A prefix not followed by an
    /// identifier fails with the byte offset of that prefix.
    pub fn parse(template: &str) -> Result<NamedTemplate> {
        let mut parts = template.split(NAMED_PLACEHOLDER_PREFIX);
        let head = parts.next().unwrap_or_default();

        let mut literals = Vec::with_capacity(1);
        let mut names = Vec::new();
        literals.push(head.to_string());

        // byte offset of the prefix that introduced the current segment
        let mut position = head.len();
        for part in parts {
            let name = NAMED_PARAMETER_NAME
                .find(part)
                .ok_or(DbError::MalformedIdentifier { position })?;
            names.push(name.as_str().to_string());
            literals.push(part[name.end()..].to_string());
            position += NAMED_PLACEHOLDER_PREFIX.len_utf8() + part.len();
        }

        trace!("parsed template: {} ({} named parameters)", template, names.len());
        Ok(NamedTemplate { literals, names })
    }

    /// Marker names in template order. A name used twice appears twice.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn placeholder_count(&self) -> usize {
        self.names.len()
    }

    /// Writes the SQL with every marker replaced by the strategy's next token.
    pub fn render(&self, strategy: &mut dyn InterpolateStrategy) -> String {
        let mut sql = String::with_capacity(self.literals.iter().map(String::len).sum::<usize>());
        let mut literals = self.literals.iter();
        if let Some(head) = literals.next() {
            sql.push_str(head);
        }
        for literal in literals {
            sql.push_str(&strategy.next_placeholder());
            sql.push_str(literal);
        }
        sql
    }
}

/// Number of positional placeholders in `template`.
pub fn count_positional(template: &str) -> usize {
    template.matches(POSITIONAL_PLACEHOLDER).count()
}

/// Replaces each positional placeholder with the strategy's next token.
pub fn normalize_positional(template: &str, strategy: &mut dyn InterpolateStrategy) -> String {
    let mut parts = template.split(POSITIONAL_PLACEHOLDER);
    let mut sql = String::with_capacity(template.len());
    if let Some(head) = parts.next() {
        sql.push_str(head);
    }
    for part in parts {
        sql.push_str(&strategy.next_placeholder());
        sql.push_str(part);
    }
    sql
}
