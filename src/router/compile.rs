use super::placeholder::PlaceholderTable;
use crate::error::DispatchError;
use crate::table::{RouteRule, RouteTarget};
use regex::Regex;
use tracing::warn;

/// A declared rule turned into a matcher.
///
/// The regex is anchored at the start of the path and must end on a segment
/// boundary; anything after that boundary is left for positional binding.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    /// Pattern as declared
    pub pattern: String,
    /// Compiled matcher
    pub matcher: Regex,
    /// Target descriptors, unresolved
    pub target: RouteTarget,
    /// Path segment index captured by each group (`capture_segments[0]` is group 1)
    pub capture_segments: Vec<usize>,
    /// Number of segments in the pattern
    pub segment_count: usize,
}

impl CompiledRule {
    /// Number of capture groups, excluding group 0.
    #[inline]
    #[must_use]
    pub fn capture_count(&self) -> usize {
        self.capture_segments.len()
    }

    /// Index of the first placeholder segment, or the segment count when the
    /// pattern has none.
    #[inline]
    #[must_use]
    pub fn first_placeholder(&self) -> usize {
        self.capture_segments
            .first()
            .copied()
            .unwrap_or(self.segment_count)
    }
}

/// Outcome of compiling one declared pattern.
#[derive(Debug, Clone)]
pub enum Compiled {
    /// The pattern is `/` (or empty): the root rule, matched without a regex
    Root(RouteTarget),
    Rule(CompiledRule),
}

fn invalid(pattern: &str, reason: impl Into<String>) -> DispatchError {
    DispatchError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: reason.into(),
    }
}

/// Compile one declared rule.
///
/// One leading and one trailing `/` are ignored. An empty segment anywhere
/// else (`user//show`) is rejected here rather than left to never match.
pub fn compile_rule(
    rule: &RouteRule,
    placeholders: &PlaceholderTable,
) -> Result<Compiled, DispatchError> {
    let pattern = rule.pattern.as_str();
    let body = pattern.strip_prefix('/').unwrap_or(pattern);
    let body = body.strip_suffix('/').unwrap_or(body);

    if body.is_empty() {
        return Ok(Compiled::Root(rule.target.clone()));
    }

    let mut source = String::with_capacity(body.len() * 2 + 16);
    source.push('^');
    let mut capture_segments = Vec::new();
    let mut segment_count = 0;

    for (index, segment) in body.split('/').enumerate() {
        if segment.is_empty() {
            return Err(invalid(pattern, format!("empty segment at position {index}")));
        }
        if index > 0 {
            source.push('/');
        }
        match placeholders.fragment(segment) {
            Some(fragment) => {
                source.push('(');
                source.push_str(fragment);
                source.push(')');
                capture_segments.push(index);
            }
            None => source.push_str(&regex::escape(segment)),
        }
        segment_count = index + 1;
    }
    source.push_str("(?:/.*)?$");

    let matcher = Regex::new(&source)
        .map_err(|e| invalid(pattern, format!("regex does not compile: {e}")))?;

    Ok(Compiled::Rule(CompiledRule {
        pattern: pattern.to_string(),
        matcher,
        target: rule.target.clone(),
        capture_segments,
        segment_count,
    }))
}

/// Compile every rule in declaration order.
///
/// Returns the root target (the last `/` rule declared, if any) and the
/// compiled rules. Rules without placeholders compile but can never be
/// selected, since a match must populate at least one capture group; they are
/// logged so the table author notices.
pub fn compile_rules(
    rules: &[RouteRule],
    placeholders: &PlaceholderTable,
) -> Result<(Option<RouteTarget>, Vec<CompiledRule>), DispatchError> {
    let mut root = None;
    let mut compiled = Vec::with_capacity(rules.len());

    for rule in rules {
        match compile_rule(rule, placeholders)? {
            Compiled::Root(target) => {
                if root.is_some() {
                    warn!(pattern = %rule.pattern, "Root rule declared twice - last declaration wins");
                }
                root = Some(target);
            }
            Compiled::Rule(rule) => {
                if rule.capture_count() == 0 {
                    warn!(
                        pattern = %rule.pattern,
                        target = %rule.target,
                        "Rule has no placeholders and will never match"
                    );
                }
                compiled.push(rule);
            }
        }
    }

    Ok((root, compiled))
}
