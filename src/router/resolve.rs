use super::core::RouteMatch;
use crate::error::DispatchError;
use crate::table::TargetDescriptor;
use tracing::debug;

/// Concrete controller/method names and where positional arguments begin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub controller: String,
    pub method: String,
    /// Index into the normalized path's segments of the first argument segment
    pub arg_start: usize,
}

/// Resolve one descriptor. Returns the name and, for `@N`, the segment index
/// just past the segment group N captured.
fn resolve_descriptor(
    descriptor: &TargetDescriptor,
    route_match: &RouteMatch,
) -> Result<(String, Option<usize>), DispatchError> {
    match descriptor {
        TargetDescriptor::Literal(name) => Ok((name.clone(), None)),
        TargetDescriptor::Capture(group) => {
            let out_of_range = || DispatchError::IndirectionOutOfRange {
                descriptor: descriptor.to_string(),
                available: route_match.capture_count(),
            };
            if *group == 0 {
                return Err(out_of_range());
            }
            let value = route_match.capture(*group).ok_or_else(out_of_range)?;
            let segment = route_match
                .capture_segments
                .get(group - 1)
                .copied()
                .ok_or_else(out_of_range)?;
            Ok((value.to_string(), Some(segment + 1)))
        }
    }
}

/// Turn the matched rule's descriptors into a [`ResolvedTarget`].
///
/// Leftover binding starts after the furthest segment consumed to name the
/// handler. When both names are literal it starts at the first placeholder,
/// so `user/(:int)` → `User::show` binds the id.
pub fn resolve_target(route_match: &RouteMatch) -> Result<ResolvedTarget, DispatchError> {
    let (controller, controller_next) =
        resolve_descriptor(&route_match.target.controller, route_match)?;
    let (method, method_next) = resolve_descriptor(&route_match.target.method, route_match)?;

    let arg_start = match (controller_next, method_next) {
        (Some(a), Some(b)) => a.max(b),
        (Some(a), None) | (None, Some(a)) => a,
        (None, None) => route_match.first_placeholder,
    };

    debug!(
        pattern = %route_match.pattern,
        controller = %controller,
        method = %method,
        arg_start = arg_start,
        "Target resolved"
    );

    Ok(ResolvedTarget {
        controller,
        method,
        arg_start,
    })
}
