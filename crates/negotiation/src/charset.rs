//! `Accept-Charset` parsing and selection.

use tracing::debug;

use crate::error::NegotiationError;
use crate::quality::Quality;

/// One weighted charset token out of an `Accept-Charset` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharsetPart {
	pub name: String,
	pub quality: Quality,
}

fn is_token_byte(b: u8) -> bool {
	b.is_ascii_alphanumeric()
		|| matches!(
			b,
			b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^' | b'_'
				| b'`' | b'|' | b'~'
		)
}

/// Lazily parse an `Accept-Charset` header into its weighted parts.
///
/// The returned iterator is single-pass and non-restartable: nothing is
/// validated up front, and a malformed token surfaces as the `Err`
/// element at the position where it is reached. A caller that only
/// consumes a prefix never observes an error hiding further along.
///
/// Blank and all-separator input (`" , , "`) yields an empty sequence.
///
/// # Examples
///
/// ```
/// use grappelli_negotiation::parse_accept_charset_parts;
///
/// let parts: Result<Vec<_>, _> = parse_accept_charset_parts("utf-8, iso-8859-5;q=0.8").collect();
/// let parts = parts.unwrap();
/// assert_eq!(parts.len(), 2);
/// assert_eq!(parts[1].name, "iso-8859-5");
/// assert_eq!(parts[1].quality.millis(), 800);
/// ```
pub fn parse_accept_charset_parts(header: &str) -> AcceptCharsetParts<'_> {
	AcceptCharsetParts {
		header,
		position: 0,
		failed: false,
	}
}

/// Iterator over [`CharsetPart`]s; see [`parse_accept_charset_parts`].
#[derive(Debug)]
pub struct AcceptCharsetParts<'a> {
	header: &'a str,
	position: usize,
	failed: bool,
}

impl<'a> AcceptCharsetParts<'a> {
	fn skip_whitespace(&mut self) {
		let bytes = self.header.as_bytes();
		while self.position < bytes.len() && bytes[self.position].is_ascii_whitespace() {
			self.position += 1;
		}
	}

	fn fail(&mut self) -> Option<Result<CharsetPart, NegotiationError>> {
		self.failed = true;
		// Token scanning only advances over ASCII, so `position` is
		// always a char boundary. Past the end means a truncated tail
		// such as "utf-8;": report the last char of the header.
		let (found, position) = match self.header[self.position.min(self.header.len())..]
			.chars()
			.next()
		{
			Some(c) => (c, self.position),
			None => (
				self.header.chars().last().unwrap_or(','),
				self.header.len().saturating_sub(1),
			),
		};
		Some(Err(NegotiationError::MalformedCharsetList { found, position }))
	}
}

impl<'a> Iterator for AcceptCharsetParts<'a> {
	type Item = Result<CharsetPart, NegotiationError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed {
			return None;
		}
		let bytes = self.header.as_bytes();

		// leading whitespace and empty list elements
		while self.position < bytes.len()
			&& (bytes[self.position] == b',' || bytes[self.position].is_ascii_whitespace())
		{
			self.position += 1;
		}
		if self.position >= bytes.len() {
			return None;
		}

		let start = self.position;
		while self.position < bytes.len() && is_token_byte(bytes[self.position]) {
			self.position += 1;
		}
		if self.position == start {
			return self.fail();
		}
		let name = self.header[start..self.position].to_string();

		self.skip_whitespace();
		let mut quality = Quality::DEFAULT;
		if self.position < bytes.len() && bytes[self.position] == b';' {
			self.position += 1;
			self.skip_whitespace();
			if self.position >= bytes.len() || !matches!(bytes[self.position], b'q' | b'Q') {
				return self.fail();
			}
			self.position += 1;
			self.skip_whitespace();
			if self.position >= bytes.len() || bytes[self.position] != b'=' {
				return self.fail();
			}
			self.position += 1;
			self.skip_whitespace();

			let value_start = self.position;
			while self.position < bytes.len()
				&& bytes[self.position] != b','
				&& !bytes[self.position].is_ascii_whitespace()
			{
				self.position += 1;
			}
			match Quality::parse(&self.header[value_start..self.position]) {
				Ok(parsed) => quality = parsed,
				Err(err) => {
					self.failed = true;
					return Some(Err(err));
				}
			}
			self.skip_whitespace();
		}

		// a part may only be followed by a separator or the end
		if self.position < bytes.len() && bytes[self.position] != b',' {
			return self.fail();
		}

		Some(Ok(CharsetPart { name, quality }))
	}
}

/// Server-side `Accept-Charset` negotiation.
///
/// Picks the highest-quality supported charset; ties break on the
/// client's listing order. A blank header, or a header admitting none
/// of the supported charsets, falls back to the configured default
/// (UTF-8 unless overridden). Parse errors always propagate — a
/// malformed header is never silently defaulted.
#[derive(Debug, Clone)]
pub struct CharsetNegotiator {
	default_charset: String,
}

impl CharsetNegotiator {
	pub fn new() -> Self {
		Self {
			default_charset: "utf-8".to_string(),
		}
	}

	/// Use a default charset other than UTF-8.
	pub fn with_default(charset: impl Into<String>) -> Self {
		Self {
			default_charset: charset.into(),
		}
	}

	/// Select the response charset for an `Accept-Charset` header.
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_negotiation::CharsetNegotiator;
	///
	/// let negotiator = CharsetNegotiator::new();
	/// let supported = ["utf-8", "iso-8859-5"];
	///
	/// let chosen = negotiator.select("iso-8859-5;q=0.9, utf-8;q=0.5", &supported).unwrap();
	/// assert_eq!(chosen, "iso-8859-5");
	///
	/// assert_eq!(negotiator.select("", &supported).unwrap(), "utf-8");
	/// ```
	pub fn select(&self, header: &str, supported: &[&str]) -> Result<String, NegotiationError> {
		if header.trim().is_empty() {
			return Ok(self.default_charset.clone());
		}

		let mut best: Option<(&str, Quality)> = None;
		for part in parse_accept_charset_parts(header) {
			let part = part?;
			if part.quality.is_zero() {
				continue;
			}
			let matched = if part.name == "*" {
				// the wildcard admits the default when the server offers
				// it, otherwise the server's first choice
				supported
					.iter()
					.copied()
					.find(|s| s.eq_ignore_ascii_case(&self.default_charset))
					.or_else(|| supported.first().copied())
			} else {
				supported
					.iter()
					.copied()
					.find(|s| s.eq_ignore_ascii_case(&part.name))
			};
			if let Some(name) = matched {
				let better = match best {
					None => true,
					Some((_, quality)) => part.quality > quality,
				};
				if better {
					best = Some((name, part.quality));
				}
			}
		}

		let selected = best
			.map(|(name, _)| name.to_string())
			.unwrap_or_else(|| self.default_charset.clone());
		debug!(header, %selected, "negotiated charset");
		Ok(selected)
	}
}

impl Default for CharsetNegotiator {
	fn default() -> Self {
		Self::new()
	}
}
