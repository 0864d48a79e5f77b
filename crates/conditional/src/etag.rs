//! Entity tags and parsed conditional header values.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::error::ConditionalError;

/// An opaque entity tag, optionally weak (`W/"..."`).
///
/// Tags are never mutated once issued; a changed resource gets a new
/// tag. Comparison strength follows RFC 7232 §2.3.2: `If-Match` uses
/// the strong function, `If-None-Match` the weak one.
///
/// # Examples
///
/// ```
/// use grappelli_conditional::EntityTag;
///
/// let strong = EntityTag::parse("\"xyzzy\"").unwrap();
/// let weak = EntityTag::parse("W/\"xyzzy\"").unwrap();
///
/// assert!(strong.weak_eq(&weak));
/// assert!(!strong.strong_eq(&weak));
/// assert_eq!(weak.to_string(), "W/\"xyzzy\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTag {
	weak: bool,
	tag: String,
}

impl EntityTag {
	/// A strong tag. The value is the unquoted opaque string.
	pub fn strong(tag: impl Into<String>) -> Self {
		Self {
			weak: false,
			tag: tag.into(),
		}
	}

	/// A weak tag.
	pub fn weak(tag: impl Into<String>) -> Self {
		Self {
			weak: true,
			tag: tag.into(),
		}
	}

	/// Parse the wire form: `"tag"` or `W/"tag"`.
	///
	/// Unquoted values and embedded quotes are rejected; the empty tag
	/// `""` is valid.
	pub fn parse(raw: &str) -> Result<EntityTag, ConditionalError> {
		let malformed = || ConditionalError::MalformedEntityTag {
			value: raw.to_string(),
		};

		let trimmed = raw.trim();
		let (weak, quoted) = match trimmed.strip_prefix("W/") {
			Some(rest) => (true, rest),
			None => (false, trimmed),
		};

		let inner = quoted
			.strip_prefix('"')
			.and_then(|s| s.strip_suffix('"'))
			.ok_or_else(malformed)?;
		if inner.contains('"') {
			return Err(malformed());
		}

		Ok(EntityTag {
			weak,
			tag: inner.to_string(),
		})
	}

	/// Derive a strong tag from a response body: SHA-256, truncated to
	/// 16 bytes, hex-encoded.
	pub fn from_body(body: &[u8]) -> EntityTag {
		let mut hasher = Sha256::new();
		hasher.update(body);
		let digest = hasher.finalize();
		EntityTag::strong(hex::encode(&digest[..16]))
	}

	pub fn is_weak(&self) -> bool {
		self.weak
	}

	/// The opaque value without quotes or the weakness prefix.
	pub fn tag(&self) -> &str {
		&self.tag
	}

	/// Strong comparison: equal opaque values, neither tag weak.
	pub fn strong_eq(&self, other: &EntityTag) -> bool {
		!self.weak && !other.weak && self.tag == other.tag
	}

	/// Weak comparison: equal opaque values, weakness ignored.
	pub fn weak_eq(&self, other: &EntityTag) -> bool {
		self.tag == other.tag
	}
}

impl fmt::Display for EntityTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.weak {
			write!(f, "W/\"{}\"", self.tag)
		} else {
			write!(f, "\"{}\"", self.tag)
		}
	}
}

/// A parsed `If-Match` or `If-None-Match` value: the wildcard, or a
/// list of entity tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Precondition {
	/// `*` — any current representation.
	Any,
	/// One or more entity tags.
	Tags(Vec<EntityTag>),
}

impl Precondition {
	/// Parse a conditional header value.
	///
	/// Either `*` alone, or a comma-separated entity tag list. Empty
	/// list elements are skipped; an entirely empty value is malformed.
	pub fn parse(value: &str) -> Result<Precondition, ConditionalError> {
		let trimmed = value.trim();
		if trimmed == "*" {
			return Ok(Precondition::Any);
		}

		let tags = trimmed
			.split(',')
			.map(str::trim)
			.filter(|element| !element.is_empty())
			.map(EntityTag::parse)
			.collect::<Result<Vec<_>, _>>()?;
		if tags.is_empty() {
			return Err(ConditionalError::MalformedEntityTag {
				value: value.to_string(),
			});
		}
		Ok(Precondition::Tags(tags))
	}

	/// Whether any listed tag strongly matches the given tag. `Any`
	/// matches everything.
	pub fn matches_strong(&self, current: &EntityTag) -> bool {
		match self {
			Precondition::Any => true,
			Precondition::Tags(tags) => tags.iter().any(|tag| tag.strong_eq(current)),
		}
	}

	/// Weak-comparison counterpart of [`matches_strong`](Self::matches_strong).
	pub fn matches_weak(&self, current: &EntityTag) -> bool {
		match self {
			Precondition::Any => true,
			Precondition::Tags(tags) => tags.iter().any(|tag| tag.weak_eq(current)),
		}
	}
}
