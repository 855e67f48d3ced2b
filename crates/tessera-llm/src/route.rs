//! Route types and the upstream routing table

use std::fmt;
use std::str::FromStr;

use http::Method;

/// Logical API style targeted by a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteType {
    /// Structured turns (`llm/v1/chat`)
    Chat,
    /// Single flattened prompt (`llm/v1/completions`)
    Completions,
    /// Pass-through without transformation
    Preserve,
}

/// Route string not in the known set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown route type: {0}")]
pub struct UnknownRouteType(pub String);

/// Path and method of an upstream endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRoute {
    /// Path appended to the provider base URL
    pub path: &'static str,
    /// HTTP method
    pub method: Method,
}

impl RouteType {
    /// Wire name of the route type
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chat => "llm/v1/chat",
            Self::Completions => "llm/v1/completions",
            Self::Preserve => "preserve",
        }
    }

    /// Upstream endpoint for this route; `Preserve` has none
    pub fn upstream(self) -> Option<UpstreamRoute> {
        match self {
            Self::Chat => Some(UpstreamRoute {
                path: "/v1/messages",
                method: Method::POST,
            }),
            Self::Completions => Some(UpstreamRoute {
                path: "/v1/complete",
                method: Method::POST,
            }),
            Self::Preserve => None,
        }
    }
}

impl FromStr for RouteType {
    type Err = UnknownRouteType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "llm/v1/chat" => Ok(Self::Chat),
            "llm/v1/completions" => Ok(Self::Completions),
            "preserve" => Ok(Self::Preserve),
            other => Err(UnknownRouteType(other.to_owned())),
        }
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
