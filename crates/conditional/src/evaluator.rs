//! The `If-Match`/`If-None-Match` decision table.

use tracing::trace;

use crate::etag::{EntityTag, Precondition};

/// What a conditional request resolves to.
///
/// `PreconditionFailed` (a stale write, 412) and `NotModified` (a cache
/// hit, 304) are distinct outcomes and are never conflated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionalOutcome {
	/// Preconditions hold (or none were sent); serve the request.
	Proceed,
	/// The client's cached representation is current; respond 304 with
	/// the restricted header set and no body.
	NotModified,
	/// A precondition did not hold against the current state; respond
	/// 412.
	PreconditionFailed,
	/// The conditional headers are not applicable to this resource;
	/// respond 400.
	BadRequest,
}

/// Evaluate conditional headers against the resource's current entity
/// tag.
///
/// `current` is the tag of the representation as it exists right now,
/// or `None` when the resource has no representation (or no meaningful
/// ETag). Pure and stateless: identical inputs always produce the
/// identical outcome.
///
/// The table:
///
/// 1. Both headers present — `BadRequest` (mutually exclusive here).
/// 2. Concrete tags against a tag-less resource — `BadRequest`; only
///    `*` has meaning without an ETag.
/// 3. `If-Match: *` — `Proceed` if a representation exists, otherwise
///    `PreconditionFailed`.
/// 4. `If-Match: tags` — `Proceed` on a strong match, otherwise
///    `PreconditionFailed`.
/// 5. `If-None-Match: *` — `NotModified` if a representation exists,
///    otherwise `Proceed`.
/// 6. `If-None-Match: tags` — `NotModified` on a weak match, otherwise
///    `Proceed`.
/// 7. Neither header — `Proceed`.
///
/// # Examples
///
/// ```
/// use grappelli_conditional::{ConditionalOutcome, EntityTag, Precondition, evaluate};
///
/// let current = EntityTag::strong("abc");
/// let if_match = Precondition::parse("\"abc\"").unwrap();
///
/// let outcome = evaluate(Some(&current), Some(&if_match), None);
/// assert_eq!(outcome, ConditionalOutcome::Proceed);
/// ```
pub fn evaluate(
	current: Option<&EntityTag>,
	if_match: Option<&Precondition>,
	if_none_match: Option<&Precondition>,
) -> ConditionalOutcome {
	let outcome = evaluate_inner(current, if_match, if_none_match);
	trace!(?current, ?if_match, ?if_none_match, ?outcome, "evaluated preconditions");
	outcome
}

fn evaluate_inner(
	current: Option<&EntityTag>,
	if_match: Option<&Precondition>,
	if_none_match: Option<&Precondition>,
) -> ConditionalOutcome {
	if if_match.is_some() && if_none_match.is_some() {
		return ConditionalOutcome::BadRequest;
	}

	let concrete = |precondition: Option<&Precondition>| {
		matches!(precondition, Some(Precondition::Tags(_)))
	};
	if current.is_none() && (concrete(if_match) || concrete(if_none_match)) {
		return ConditionalOutcome::BadRequest;
	}

	if let Some(precondition) = if_match {
		return match current {
			Some(tag) if precondition.matches_strong(tag) => ConditionalOutcome::Proceed,
			// covers both a mismatch and If-Match: * on a resource with
			// no representation
			_ => ConditionalOutcome::PreconditionFailed,
		};
	}

	if let Some(precondition) = if_none_match {
		return match current {
			Some(tag) if precondition.matches_weak(tag) => ConditionalOutcome::NotModified,
			Some(_) => ConditionalOutcome::Proceed,
			// If-None-Match: * against nothing
			None => ConditionalOutcome::Proceed,
		};
	}

	ConditionalOutcome::Proceed
}
