//! Media ranges and `Accept` negotiation.

use std::fmt;

use tracing::debug;

use crate::error::NegotiationError;
use crate::quality::Quality;

/// One media range out of an `Accept` header, or a concrete media type
/// out of a server's supported list.
///
/// Parameters keep their insertion order: rendered parameter order is
/// part of the wire contract with deployed clients, so `Display` must
/// reproduce what was parsed.
///
/// # Examples
///
/// ```
/// use grappelli_negotiation::MediaType;
///
/// let range = MediaType::parse("text/html;level=1;q=0.5").unwrap();
/// assert_eq!(range.type_, "text");
/// assert_eq!(range.subtype, "html");
/// assert_eq!(range.quality.millis(), 500);
/// assert_eq!(range.parameters, vec![("level".to_string(), "1".to_string())]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
	pub type_: String,
	pub subtype: String,
	/// Non-quality parameters, in source order.
	pub parameters: Vec<(String, String)>,
	pub quality: Quality,
}

fn is_token(s: &str) -> bool {
	!s.is_empty()
		&& s.bytes().all(|b| {
			b.is_ascii_alphanumeric()
				|| matches!(
					b,
					b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.'
						| b'^' | b'_' | b'`' | b'|' | b'~'
				)
		})
}

impl MediaType {
	/// Parse a single media range such as `text/html;level=1;q=0.5`.
	///
	/// `q` is peeled off into [`quality`](Self::quality); every other
	/// parameter is kept verbatim. `*/subtype` is rejected: the only
	/// wildcard forms are `*/*` and `type/*`.
	pub fn parse(range: &str) -> Result<MediaType, NegotiationError> {
		let malformed = || NegotiationError::MalformedAcceptHeader {
			range: range.to_string(),
		};

		let mut segments = range.split(';');
		let full_type = segments.next().ok_or_else(malformed)?.trim();
		let (type_, subtype) = full_type.split_once('/').ok_or_else(malformed)?;

		let type_valid = type_ == "*" || is_token(type_);
		let subtype_valid = subtype == "*" || is_token(subtype);
		if !type_valid || !subtype_valid || (type_ == "*" && subtype != "*") {
			return Err(malformed());
		}

		let mut parameters = Vec::new();
		let mut quality = Quality::DEFAULT;
		for segment in segments {
			let segment = segment.trim();
			let (key, value) = segment.split_once('=').ok_or_else(malformed)?;
			let (key, value) = (key.trim(), value.trim());
			if !is_token(key) || value.is_empty() {
				return Err(malformed());
			}
			if key.eq_ignore_ascii_case("q") {
				quality = Quality::parse(value)?;
			} else {
				parameters.push((key.to_string(), value.to_string()));
			}
		}

		Ok(MediaType {
			type_: type_.to_string(),
			subtype: subtype.to_string(),
			parameters,
			quality,
		})
	}

	/// Specificity tier: `*/*` is 0, `type/*` is 1, `type/subtype` is 2.
	pub fn specificity(&self) -> u8 {
		match (self.type_.as_str(), self.subtype.as_str()) {
			("*", _) => 0,
			(_, "*") => 1,
			_ => 2,
		}
	}

	/// Whether this range covers the given concrete media type.
	///
	/// Only the type and subtype take part: parameters never affect
	/// matching, and `charset` in particular is the charset
	/// negotiator's business, not this one's.
	pub fn matches(&self, concrete: &MediaType) -> bool {
		let type_ok = self.type_ == "*" || self.type_.eq_ignore_ascii_case(&concrete.type_);
		let subtype_ok =
			self.subtype == "*" || self.subtype.eq_ignore_ascii_case(&concrete.subtype);
		type_ok && subtype_ok
	}
}

impl fmt::Display for MediaType {
	/// Renders `type/subtype` followed by the parameters in their
	/// original order. A non-default quality is re-emitted last.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.type_, self.subtype)?;
		for (key, value) in &self.parameters {
			write!(f, ";{}={}", key, value)?;
		}
		if self.quality != Quality::DEFAULT {
			write!(f, ";q={}", self.quality)?;
		}
		Ok(())
	}
}

/// Parse a comma-separated `Accept` header into its ranges.
///
/// Empty elements (`a/b,,c/d`, leading or trailing commas) are skipped,
/// matching the HTTP list grammar; a non-empty element that fails to
/// parse is a hard error.
pub fn parse_accept_header(header: &str) -> Result<Vec<MediaType>, NegotiationError> {
	header
		.split(',')
		.map(str::trim)
		.filter(|segment| !segment.is_empty())
		.map(MediaType::parse)
		.collect()
}

/// Server-side `Accept` negotiation.
///
/// Stateless; build one and share it across requests.
#[derive(Debug, Default, Clone)]
pub struct MediaTypeNegotiator;

impl MediaTypeNegotiator {
	pub fn new() -> Self {
		Self
	}

	/// Select the best supported media type for an `Accept` header.
	///
	/// A blank header means the client has no preference and the
	/// server's first supported type wins. Otherwise each candidate is
	/// governed by its most specific matching range; a `q=0` governing
	/// range excludes the candidate outright. Candidates rank by
	/// specificity of the governing range, then quality, then the
	/// server's preference order.
	///
	/// Returns `Ok(None)` when nothing is acceptable — the caller
	/// decides between 406 and 415.
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_negotiation::MediaTypeNegotiator;
	///
	/// let negotiator = MediaTypeNegotiator::new();
	/// let supported = ["application/json", "application/xml"];
	///
	/// let chosen = negotiator.select("application/xml;q=0.9", &supported).unwrap();
	/// assert_eq!(chosen, Some("application/xml"));
	///
	/// let chosen = negotiator.select("image/png", &supported).unwrap();
	/// assert_eq!(chosen, None);
	/// ```
	pub fn select<'a>(
		&self,
		accept: &str,
		supported: &'a [&'a str],
	) -> Result<Option<&'a str>, NegotiationError> {
		if accept.trim().is_empty() {
			return Ok(supported.first().copied());
		}

		let ranges = parse_accept_header(accept)?;
		let mut best: Option<(usize, u8, Quality)> = None;

		for (index, raw) in supported.iter().enumerate() {
			let candidate = MediaType::parse(raw)?;
			let governing = ranges
				.iter()
				.filter(|range| range.matches(&candidate))
				.max_by_key(|range| (range.specificity(), range.quality));
			let Some(range) = governing else { continue };
			if range.quality.is_zero() {
				continue;
			}
			let key = (range.specificity(), range.quality);
			let better = match best {
				None => true,
				Some((_, spec, quality)) => key > (spec, quality),
			};
			if better {
				best = Some((index, key.0, key.1));
			}
		}

		let selected = best.map(|(index, _, _)| supported[index]);
		debug!(accept, ?selected, "negotiated media type");
		Ok(selected)
	}

	/// Select from a fixed set the response MUST come from.
	///
	/// Like [`select`](Self::select), but never returns `None`: when no
	/// required type matches, a supplied fallback is returned provided
	/// some non-zero wildcard range would admit it; otherwise the whole
	/// negotiation fails with [`NegotiationError::NotAcceptable`].
	pub fn select_required<'a>(
		&self,
		accept: &str,
		required: &'a [&'a str],
		fallback: Option<&'a str>,
	) -> Result<&'a str, NegotiationError> {
		let not_acceptable = || NegotiationError::NotAcceptable {
			accept: accept.to_string(),
			supported: required.iter().map(|s| s.to_string()).collect(),
		};

		if accept.trim().is_empty() {
			return required.first().copied().ok_or_else(not_acceptable);
		}

		if let Some(found) = self.select(accept, required)? {
			return Ok(found);
		}

		if let Some(fallback) = fallback {
			let fallback_type = MediaType::parse(fallback)?;
			let ranges = parse_accept_header(accept)?;
			let admitted = ranges.iter().any(|range| {
				range.specificity() < 2 && !range.quality.is_zero() && range.matches(&fallback_type)
			});
			if admitted {
				debug!(accept, fallback, "falling back to inexact media type");
				return Ok(fallback);
			}
		}

		Err(not_acceptable())
	}
}
