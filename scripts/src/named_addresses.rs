//! Named address mapping handed to the Move toolchain

use std::fmt;

use crate::errors::ScriptError;

/// Ordered `name -> address` mapping.
///
/// Rendered as `name=address,name=address` for `--named-addresses`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamedAddresses(Vec<(String, String)>);

impl NamedAddresses {
    /// An empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `address`, replacing any earlier binding of `name`
    pub fn insert(&mut self, name: impl Into<String>, address: impl Into<String>) -> &mut Self {
        let (name, address) = (name.into(), address.into());
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, current)) => *current = address,
            None => self.0.push((name, address)),
        }
        self
    }

    /// Address bound to `name`
    #[cfg(test)]
    fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, address)| address.as_str())
    }

    /// Whether no name is bound
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bindings in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(name, address)| (name.as_str(), address.as_str()))
    }
}

impl<N, A> Extend<(N, A)> for NamedAddresses
where
    N: Into<String>,
    A: Into<String>,
{
    fn extend<I: IntoIterator<Item = (N, A)>>(&mut self, iter: I) {
        for (name, address) in iter {
            self.insert(name, address);
        }
    }
}

impl fmt::Display for NamedAddresses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, address)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{name}={address}")?;
        }
        Ok(())
    }
}

/// Parse a single `name=address` pair
pub fn parse_named_address(s: &str) -> Result<(String, String), ScriptError> {
    let invalid = || ScriptError::InvalidNamedAddress(s.to_string());
    let (name, address) = s.split_once('=').ok_or_else(invalid)?;
    let (name, address) = (name.trim(), address.trim());
    if name.is_empty() || address.is_empty() || address.contains(',') {
        return Err(invalid());
    }
    Ok((name.to_string(), address.to_string()))
}
