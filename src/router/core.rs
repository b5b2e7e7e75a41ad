//! Router core module - hot path for request routing.
//!
//! Matching walks the compiled rules in declaration order and stops at the
//! first rule whose matcher accepts the normalized path with at least one
//! capture group populated. Order, not specificity, decides the winner.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use super::compile::{compile_rules, CompiledRule};
use super::placeholder::PlaceholderTable;
use crate::error::DispatchError;
use crate::path::NormalizedPath;
use crate::table::{RouteTable, RouteTarget};
use smallvec::SmallVec;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Maximum number of capture groups kept inline before spilling to the heap.
/// Route patterns rarely carry more than a handful of placeholders.
pub const MAX_INLINE_CAPTURES: usize = 8;

/// Captured substrings: index 0 is the whole match, 1..=k the placeholders
/// left to right, numbered exactly as the compiled regex numbers its groups.
pub type CaptureVec = SmallVec<[String; MAX_INLINE_CAPTURES]>;

/// Which declared rule a path landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedRule {
    /// The `/` rule, selected without running any matcher
    Root,
    /// Position of the compiled rule in declaration order (root rule excluded)
    Index(usize),
}

/// Result of successfully matching a normalized path.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// Which rule matched
    pub rule: MatchedRule,
    /// Pattern as declared (`/` for the root rule)
    pub pattern: String,
    /// Unresolved target descriptors of the matched rule
    pub target: RouteTarget,
    /// Regex captures; empty for the root rule
    pub captures: CaptureVec,
    /// Index of the last path segment each capture group covered (`[0]` is
    /// group 1). Taken from the match offsets, so a placeholder whose regex
    /// spans several segments reports where it actually ended.
    pub capture_segments: SmallVec<[usize; MAX_INLINE_CAPTURES]>,
    /// Index of the path segment where the first placeholder's match begins
    pub first_placeholder: usize,
}

impl RouteMatch {
    /// Capture group `index`, where 0 is the whole match.
    #[inline]
    #[must_use]
    pub fn capture(&self, index: usize) -> Option<&str> {
        self.captures.get(index).map(String::as_str)
    }

    /// Number of capture groups, excluding the whole match.
    #[inline]
    #[must_use]
    pub fn capture_count(&self) -> usize {
        self.captures.len().saturating_sub(1)
    }
}

/// Segment index of the byte at `offset` in a normalized path.
#[inline]
fn segment_at(path: &str, offset: usize) -> usize {
    path.as_bytes()[..offset].iter().filter(|&&b| b == b'/').count()
}

/// Compiled, read-only routing table.
///
/// Built once from a [`RouteTable`] and shared across requests; a hot reload
/// replaces the whole router rather than mutating it.
#[derive(Debug, Clone, Default)]
pub struct Router {
    root: Option<RouteTarget>,
    rules: Vec<CompiledRule>,
}

impl Router {
    /// Compile a route table with the default placeholder tokens plus any the
    /// table declares itself.
    pub fn new(table: &RouteTable) -> Result<Self, DispatchError> {
        let placeholders = PlaceholderTable::with_declared(&table.placeholders)?;
        Self::with_placeholders(table, &placeholders)
    }

    /// Compile a route table against an explicit placeholder table.
    pub fn with_placeholders(
        table: &RouteTable,
        placeholders: &PlaceholderTable,
    ) -> Result<Self, DispatchError> {
        let (root, rules) = compile_rules(&table.routes, placeholders)?;

        let routes_summary: Vec<String> = rules
            .iter()
            .take(10)
            .map(|r| format!("{} -> {}", r.pattern, r.target))
            .collect();
        info!(
            routes_count = rules.len(),
            has_root = root.is_some(),
            routes_summary = ?routes_summary,
            "Routing table compiled"
        );

        Ok(Self { root, rules })
    }

    /// Target of the `/` rule, if one was declared.
    #[must_use]
    pub fn root(&self) -> Option<&RouteTarget> {
        self.root.as_ref()
    }

    /// Compiled rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Write all compiled rules, root first, one per line.
    pub fn dump_routes<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "[routes] count={} root={}", self.rules.len(), self.root.is_some())?;
        if let Some(root) = &self.root {
            writeln!(out, "[route] / -> {root}")?;
        }
        for rule in &self.rules {
            writeln!(
                out,
                "[route] {} -> {} (regex: {})",
                rule.pattern,
                rule.target,
                rule.matcher.as_str()
            )?;
        }
        Ok(())
    }

    /// Select the rule for a normalized path.
    ///
    /// The root path goes straight to the `/` rule. Any other path is tried
    /// against every rule in declaration order; the first match that captured
    /// at least one group wins.
    pub fn route(&self, path: &NormalizedPath) -> Result<RouteMatch, DispatchError> {
        debug!(path = %path, "Route match attempt");

        if path.is_root() {
            return match &self.root {
                Some(target) => {
                    info!(path = "/", target = %target, "Root route selected");
                    Ok(RouteMatch {
                        rule: MatchedRule::Root,
                        pattern: "/".to_string(),
                        target: target.clone(),
                        captures: CaptureVec::new(),
                        capture_segments: SmallVec::new(),
                        first_placeholder: 0,
                    })
                }
                None => {
                    warn!(path = "/", "No root route declared");
                    Err(DispatchError::RouteNotFound {
                        path: String::new(),
                    })
                }
            };
        }

        let match_start = Instant::now();
        for (index, rule) in self.rules.iter().enumerate() {
            let Some(caps) = rule.matcher.captures(path.as_str()) else {
                continue;
            };
            if !caps.iter().skip(1).any(|group| group.is_some()) {
                continue;
            }

            let captures: CaptureVec = caps
                .iter()
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect();
            let subject = path.as_str();
            let capture_segments = caps
                .iter()
                .skip(1)
                .zip(&rule.capture_segments)
                .map(|(group, &declared)| match group {
                    Some(m) if m.end() > m.start() => segment_at(subject, m.end() - 1),
                    Some(m) => segment_at(subject, m.start()),
                    None => declared,
                })
                .collect();
            let first_placeholder = caps
                .get(1)
                .map_or(rule.first_placeholder(), |m| segment_at(subject, m.start()));
            let duration = match_start.elapsed();
            if duration > Duration::from_millis(1) {
                warn!(
                    path = %path,
                    route_pattern = %rule.pattern,
                    rule_index = index,
                    duration_us = duration.as_micros(),
                    "Slow route matching detected"
                );
            } else {
                info!(
                    path = %path,
                    route_pattern = %rule.pattern,
                    rule_index = index,
                    captures = ?captures,
                    duration_us = duration.as_micros(),
                    "Route matched"
                );
            }

            return Ok(RouteMatch {
                rule: MatchedRule::Index(index),
                pattern: rule.pattern.clone(),
                target: rule.target.clone(),
                captures,
                capture_segments,
                first_placeholder,
            });
        }

        warn!(
            path = %path,
            duration_us = match_start.elapsed().as_micros(),
            "No route matched"
        );
        Err(DispatchError::RouteNotFound {
            path: path.as_str().to_string(),
        })
    }
}
