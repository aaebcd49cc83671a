//! Units of measure.
//!
//! Unit decoding is owned by an external parser; [`UnitParser`] is the seam and
//! [`BasicUnitParser`] is a small default that accepts UDUNITS-style product
//! expressions (`m s-1`, `kg.m^2`, `W/m2`, `degrees_north`).

use std::fmt;
use thiserror::Error;

/// A decoded unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Unit {
    spec: String,
}

impl Unit {
    /// Create a unit from its canonical specification.
    pub fn new(spec: impl Into<String>) -> Self {
        Self { spec: spec.into() }
    }

    /// The unit's canonical specification.
    pub fn spec(&self) -> &str {
        &self.spec
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spec)
    }
}

/// A unit specification could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot decode unit \"{spec}\": {reason}")]
pub struct UnitError {
    /// The rejected specification.
    pub spec: String,
    /// Why it was rejected.
    pub reason: String,
}

impl UnitError {
    fn new(spec: &str, reason: impl Into<String>) -> Self {
        Self {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }
}

/// Parses unit specifications.
pub trait UnitParser: fmt::Debug + Send + Sync {
    /// Decode `spec` into a [`Unit`].
    fn parse(&self, spec: &str) -> Result<Unit, UnitError>;
}

/// Default parser for product/quotient expressions of named factors.
///
/// The result's canonical form joins factors with a single space and writes
/// exponents as `^n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicUnitParser;

impl BasicUnitParser {
    fn factor(token: &str, spec: &str, negate: bool) -> Result<String, UnitError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(UnitError::new(spec, "empty factor"));
        }
        if token.parse::<f64>().is_ok() {
            return Ok(token.to_string());
        }

        let split = token
            .find(|c: char| c == '^' || c == '-' || c == '+' || c.is_ascii_digit())
            .unwrap_or(token.len());
        let (name, exponent) = token.split_at(split);
        if name.is_empty() {
            return Err(UnitError::new(spec, format!("factor \"{token}\" has no name")));
        }
        if !name
            .chars()
            .all(|c| c.is_alphabetic() || c == '_' || c == '%' || c == '\'' || c == '"')
        {
            return Err(UnitError::new(spec, format!("invalid unit name \"{name}\"")));
        }

        let exponent = exponent.strip_prefix('^').unwrap_or(exponent);
        let mut power: i32 = if exponent.is_empty() {
            1
        } else {
            exponent
                .parse()
                .map_err(|_| UnitError::new(spec, format!("invalid exponent \"{exponent}\"")))?
        };
        if negate {
            power = -power;
        }

        Ok(match power {
            1 => name.to_string(),
            0 => String::new(),
            p => format!("{name}^{p}"),
        })
    }
}

impl UnitParser for BasicUnitParser {
    fn parse(&self, spec: &str) -> Result<Unit, UnitError> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Err(UnitError::new(spec, "empty specification"));
        }

        let words: Vec<&str> = trimmed.split_whitespace().collect();
        if let Some(at) = words.iter().position(|w| w.eq_ignore_ascii_case("since")) {
            let (unit, origin) = (&words[..at], &words[at + 1..]);
            if unit.is_empty() || origin.is_empty() {
                return Err(UnitError::new(spec, "incomplete time reference"));
            }
            let unit = self.parse(&unit.join(" "))?;
            return Ok(Unit::new(format!("{} since {}", unit.spec(), origin.join(" "))));
        }

        let mut factors = Vec::new();
        for (i, part) in trimmed.split('/').enumerate() {
            let negate = i > 0;
            if i > 1 {
                return Err(UnitError::new(spec, "more than one '/'"));
            }
            for token in part.split(|c: char| c.is_whitespace() || c == '.' || c == '*') {
                if token.is_empty() {
                    continue;
                }
                let factor = Self::factor(token, spec, negate)?;
                if !factor.is_empty() {
                    factors.push(factor);
                }
            }
        }

        if factors.is_empty() {
            return Err(UnitError::new(spec, "no factors"));
        }
        Ok(Unit::new(factors.join(" ")))
    }
}
