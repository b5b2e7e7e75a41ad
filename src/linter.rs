//! # Route Table Linter
//!
//! Static checks over a declared route table, run by `microroute lint`.
//!
//! ## Checks Performed
//!
//! 1. **Invalid pattern** - the rule does not compile (empty segment, bad placeholder regex)
//! 2. **Unreachable rule** - no placeholders, so no match can ever populate a capture group
//! 3. **Shadowed rule** - the same pattern was declared earlier; first match wins
//! 4. **Indirection out of range** - `@N` names a group the pattern does not have
//! 5. **Unknown placeholder** - a `(:token)` segment that no placeholder table defines
//! 6. **Duplicate root** - `/` declared more than once; the last one wins
//!
//! ## Usage
//!
//! ```rust
//! use microroute::linter::{lint_table, LintSeverity};
//! use microroute::table::RouteTable;
//!
//! let table = RouteTable::new().route("about", "Page", "about");
//! let issues = lint_table(&table);
//! assert_eq!(issues[0].kind, "unreachable_rule");
//! assert_eq!(issues[0].severity, LintSeverity::Warning);
//! ```

use crate::router::{compile_rule, Compiled, PlaceholderTable};
use crate::table::{RouteTable, TargetDescriptor};
use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};


/// Severity level for lint issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// Error - the rule fails at compile time or on every request it matches
    Error,
    /// Warning - the rule compiles but never does what it looks like it does
    Warning,
}

impl fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintSeverity::Error => f.write_str("error"),
            LintSeverity::Warning => f.write_str("warning"),
        }
    }
}

/// A lint issue found in a route table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    /// Rule position and pattern, e.g. `routes[2]: user/(:int)`
    pub location: String,
    pub severity: LintSeverity,
    /// Machine-readable kind, e.g. `unreachable_rule`
    pub kind: String,
    /// Human-readable description of the problem
    pub message: String,
}

impl LintIssue {
    pub fn new(
        location: impl Into<String>,
        severity: LintSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LintIssue {
            location: location.into(),
            severity,
            kind: kind.into(),
            message: message.into(),
        }
    }
}

fn check_indirection(
    location: &str,
    role: &str,
    descriptor: &TargetDescriptor,
    capture_count: usize,
    issues: &mut Vec<LintIssue>,
) {
    let TargetDescriptor::Capture(group) = descriptor else {
        return;
    };
    if *group == 0 || *group > capture_count {
        issues.push(LintIssue::new(
            location,
            LintSeverity::Error,
            "indirection_out_of_range",
            format!(
                "{role} {descriptor} not found in regex (pattern has {capture_count} capture group(s))"
            ),
        ));
    }
}

/// Lint a route table. Issues come back in declaration order.
#[must_use]
pub fn lint_table(table: &RouteTable) -> Vec<LintIssue> {
    let mut issues = Vec::new();

    let placeholders = match PlaceholderTable::with_declared(&table.placeholders) {
        Ok(placeholders) => placeholders,
        Err(e) => {
            issues.push(LintIssue::new(
                "placeholders",
                LintSeverity::Error,
                "invalid_placeholder",
                e.to_string(),
            ));
            PlaceholderTable::default()
        }
    };

    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut root_seen = false;

    for (index, rule) in table.routes.iter().enumerate() {
        let location = format!("routes[{index}]: {}", rule.pattern);

        let compiled = match compile_rule(rule, &placeholders) {
            Ok(compiled) => compiled,
            Err(e) => {
                issues.push(LintIssue::new(
                    &location,
                    LintSeverity::Error,
                    "invalid_pattern",
                    e.to_string(),
                ));
                continue;
            }
        };

        let compiled = match compiled {
            Compiled::Root(target) => {
                if root_seen {
                    issues.push(LintIssue::new(
                        &location,
                        LintSeverity::Warning,
                        "duplicate_root",
                        format!("root rule declared again; {target} replaces the earlier one"),
                    ));
                }
                root_seen = true;
                check_indirection(&location, "controller", &target.controller, 0, &mut issues);
                check_indirection(&location, "method", &target.method, 0, &mut issues);
                continue;
            }
            Compiled::Rule(compiled) => compiled,
        };

        for segment in rule.pattern.split('/') {
            if segment.starts_with("(:") && placeholders.fragment(segment).is_none() {
                issues.push(LintIssue::new(
                    &location,
                    LintSeverity::Warning,
                    "unknown_placeholder",
                    format!("{segment} is not a known placeholder and matches literally"),
                ));
            }
        }

        if compiled.capture_count() == 0 {
            issues.push(LintIssue::new(
                &location,
                LintSeverity::Warning,
                "unreachable_rule",
                "pattern has no placeholders; a match must capture at least one group",
            ));
        }

        if let Some(first) = seen.get(rule.pattern.as_str()) {
            issues.push(LintIssue::new(
                &location,
                LintSeverity::Warning,
                "shadowed_rule",
                format!("same pattern as routes[{first}], which always matches first"),
            ));
        } else {
            seen.insert(rule.pattern.as_str(), index);
        }

        check_indirection(
            &location,
            "controller",
            &rule.target.controller,
            compiled.capture_count(),
            &mut issues,
        );
        check_indirection(
            &location,
            "method",
            &rule.target.method,
            compiled.capture_count(),
            &mut issues,
        );
    }

    issues
}

#[must_use]
pub fn has_errors(issues: &[LintIssue]) -> bool {
    issues.iter().any(|i| i.severity == LintSeverity::Error)
}

/// Write issues grouped by severity.
pub fn write_lint_issues<W: Write>(out: &mut W, issues: &[LintIssue]) -> io::Result<()> {
    if issues.is_empty() {
        writeln!(out, "✅ No lint issues found!")?;
        return Ok(());
    }

    let (errors, warnings): (Vec<_>, Vec<_>) = issues
        .iter()
        .partition(|i| i.severity == LintSeverity::Error);

    writeln!(out, "\n📋 Lint Results:")?;
    writeln!(out, "   {} error(s), {} warning(s)\n", errors.len(), warnings.len())?;

    for (title, group) in [("❌ Errors (must fix):", &errors), ("⚠️  Warnings (should fix):", &warnings)] {
        if group.is_empty() {
            continue;
        }
        writeln!(out, "{title}")?;
        for issue in group {
            writeln!(out, "   [{}] {}", issue.kind, issue.location)?;
            writeln!(out, "      {}", issue.message)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
