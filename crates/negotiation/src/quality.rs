//! Fixed-point quality values.

use std::fmt;

use crate::error::NegotiationError;

/// An RFC 2616 quality value, stored as thousandths in `[0, 1000]`.
///
/// Floats lose `q=0.001` to rounding and admit garbage like `q=0.30000`;
/// the grammar only permits three fractional digits, so thousandths are
/// exact.
///
/// # Examples
///
/// ```
/// use grappelli_negotiation::Quality;
///
/// assert_eq!(Quality::parse("0.5").unwrap().millis(), 500);
/// assert_eq!(Quality::parse("0.001").unwrap().millis(), 1);
/// assert_eq!(Quality::parse("1.000").unwrap(), Quality::DEFAULT);
/// assert!(Quality::parse("1.0000").is_err());
/// assert!(Quality::parse("2").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u16);

impl Quality {
	/// `q=1`, the value an unspecified quality defaults to.
	pub const DEFAULT: Quality = Quality(1000);

	/// `q=0`, which excludes whatever it is attached to.
	pub const ZERO: Quality = Quality(0);

	/// Parse a quality value.
	///
	/// Grammar: `("0" ["." 0*3DIGIT]) / ("1" ["." 0*3("0")])`, per
	/// RFC 2616 §3.9. More than three fractional digits, values above 1,
	/// signs, and non-digits are all rejected.
	pub fn parse(value: &str) -> Result<Quality, NegotiationError> {
		let malformed = || NegotiationError::MalformedQualityValue {
			value: value.to_string(),
		};

		let (int_part, frac_part) = match value.split_once('.') {
			Some((i, f)) => (i, Some(f)),
			None => (value, None),
		};

		let lead: u16 = match int_part {
			"0" => 0,
			"1" => 1,
			_ => return Err(malformed()),
		};

		let frac: u16 = match frac_part {
			None => 0,
			Some(f) => {
				if f.is_empty() || f.len() > 3 || !f.bytes().all(|b| b.is_ascii_digit()) {
					return Err(malformed());
				}
				// "5" means 0.500, not 0.005
				let scale = 10u16.pow(3 - f.len() as u32);
				f.parse::<u16>().map_err(|_| malformed())? * scale
			}
		};

		let millis = lead * 1000 + frac;
		if millis > 1000 {
			return Err(malformed());
		}
		Ok(Quality(millis))
	}

	/// Construct from thousandths; `None` above 1000.
	pub fn from_millis(millis: u16) -> Option<Quality> {
		(millis <= 1000).then_some(Quality(millis))
	}

	/// The value in thousandths (`q=0.5` is 500).
	pub fn millis(&self) -> u16 {
		self.0
	}

	/// Whether this quality excludes its subject.
	pub fn is_zero(&self) -> bool {
		self.0 == 0
	}
}

impl Default for Quality {
	fn default() -> Self {
		Quality::DEFAULT
	}
}

impl fmt::Display for Quality {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.0 {
			1000 => write!(f, "1"),
			0 => write!(f, "0"),
			millis => {
				let digits = format!("{:03}", millis);
				write!(f, "0.{}", digits.trim_end_matches('0'))
			}
		}
	}
}
