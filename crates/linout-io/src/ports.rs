//! Named JACK port sets.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Ordered set of audio server port names.
///
/// The first port maps to soundfile channel 1, the second to channel 2, and so
/// on. An empty set leaves port selection to the engine's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PortSet(Vec<String>);

impl PortSet {
    /// Build a port set from individual names. Blank names are dropped.
    pub fn new<I, S>(ports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            ports
                .into_iter()
                .map(Into::into)
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
        )
    }

    /// Whether the engine defaults apply.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of ports.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Port names in channel order.
    pub fn names(&self) -> &[String] {
        &self.0
    }
}

/// Parses a comma-separated list such as `"system:capture_1,system:capture_2"`.
impl FromStr for PortSet {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.split(',')))
    }
}

impl From<&str> for PortSet {
    fn from(s: &str) -> Self {
        Self::new(s.split(','))
    }
}

impl fmt::Display for PortSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}
