use crate::error::DispatchError;
use crate::path::NormalizedPath;
use serde_json::Value;
use smallvec::SmallVec;
use std::fmt;
use tracing::debug;

/// Maximum number of bound arguments kept inline before heap allocation.
pub const MAX_INLINE_ARGS: usize = 8;

/// One declared handler parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    /// Value bound when no path segment is left for this position
    pub default: Option<Value>,
}

impl Param {
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// Ordered parameter list of one handler method.
///
/// Declared once at registration time; binding never inspects the handler
/// itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandlerSignature {
    params: Vec<Param>,
}

impl HandlerSignature {
    /// A method taking no arguments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter that must come from the path.
    #[must_use]
    pub fn required(mut self, name: &str) -> Self {
        self.params.push(Param {
            name: name.to_string(),
            default: None,
        });
        self
    }

    /// Append a parameter that falls back to `default`.
    #[must_use]
    pub fn optional(mut self, name: &str, default: impl Into<Value>) -> Self {
        self.params.push(Param {
            name: name.to_string(),
            default: Some(default.into()),
        });
        self
    }

    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// A bound argument: either a leftover path segment or a declared default.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Segment(String),
    Default(Value),
}

impl Argument {
    /// The segment text, or the default when it is a JSON string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Argument::Segment(s) => Some(s),
            Argument::Default(v) => v.as_str(),
        }
    }

    /// Parse the argument as an integer: segments are parsed, defaults read as JSON numbers.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Argument::Segment(s) => s.parse().ok(),
            Argument::Default(v) => v.as_i64(),
        }
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, Argument::Default(_))
    }

    /// JSON view of the argument; segments become JSON strings.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Argument::Segment(s) => Value::String(s.clone()),
            Argument::Default(v) => v.clone(),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Segment(s) => f.write_str(s),
            Argument::Default(v) => write!(f, "{v}"),
        }
    }
}

/// Arguments in signature order (stack-allocated for ≤8 parameters).
pub type ArgVec = SmallVec<[Argument; MAX_INLINE_ARGS]>;

/// Arguments bound for one handler call, same length as its signature.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundArguments {
    args: ArgVec,
}

impl BoundArguments {
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Argument> {
        self.args.get(index)
    }

    /// Text of argument `index`, for handlers that take plain segments.
    #[must_use]
    pub fn str(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(Argument::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        self.args.iter()
    }

    #[must_use]
    pub fn into_vec(self) -> ArgVec {
        self.args
    }
}

impl From<ArgVec> for BoundArguments {
    fn from(args: ArgVec) -> Self {
        Self { args }
    }
}

/// Bind leftover segments positionally onto a signature.
///
/// Parameter `i` takes `segments[arg_start + i]` when it exists, else its
/// default. A required parameter with neither fails the request. Segments
/// beyond the signature's length are ignored.
pub fn bind_arguments(
    signature: &HandlerSignature,
    path: &NormalizedPath,
    arg_start: usize,
) -> Result<BoundArguments, DispatchError> {
    let mut leftover = path.segments().skip(arg_start);
    let mut args = ArgVec::with_capacity(signature.len());

    for (position, param) in signature.params().iter().enumerate() {
        let arg = match (leftover.next(), &param.default) {
            (Some(segment), _) => Argument::Segment(segment.to_string()),
            (None, Some(default)) => Argument::Default(default.clone()),
            (None, None) => {
                debug!(position = position, param = %param.name, path = %path, "Required argument missing");
                return Err(DispatchError::MissingRequiredArgument {
                    position,
                    name: param.name.clone(),
                });
            }
        };
        args.push(arg);
    }

    Ok(BoundArguments { args })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::normalize;
    use serde_json::json;

    fn sig() -> HandlerSignature {
        HandlerSignature::new().required("a").optional("b", 5)
    }

    #[test]
    fn test_segment_then_default() {
        let path = normalize("/x/7", "/index.php");
        let bound = bind_arguments(&sig(), &path, 1).unwrap();
        assert_eq!(
            bound.into_vec().to_vec(),
            vec![Argument::Segment("7".into()), Argument::Default(json!(5))]
        );
    }

    #[test]
    fn test_missing_required_names_parameter() {
        let path = normalize("/x", "/index.php");
        match bind_arguments(&sig(), &path, 1).unwrap_err() {
            DispatchError::MissingRequiredArgument { position, name } => {
                assert_eq!(position, 0);
                assert_eq!(name, "a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_surplus_segments_are_ignored() {
        let path = normalize("/x/1/2/3", "/index.php");
        let bound = bind_arguments(&sig(), &path, 1).unwrap();
        assert_eq!(bound.len(), 2);
        assert_eq!(bound.str(1), Some("2"));
    }

    #[test]
    fn test_empty_signature_binds_nothing() {
        let path = normalize("/x/1", "/index.php");
        assert!(bind_arguments(&HandlerSignature::new(), &path, 0).unwrap().is_empty());
    }

    #[test]
    fn test_argument_accessors() {
        assert_eq!(Argument::Segment("42".into()).as_i64(), Some(42));
        assert_eq!(Argument::Default(json!(5)).as_i64(), Some(5));
        assert_eq!(Argument::Default(json!(null)).as_str(), None);
        assert_eq!(Argument::Default(json!(5)).to_string(), "5");
        assert_eq!(Argument::Segment("x".into()).to_value(), json!("x"));
    }
}
