use grappelli_negotiation::{MediaType, MediaTypeNegotiator, NegotiationError, parse_accept_header};
use rstest::rstest;

#[test]
fn test_media_type_parse_simple() {
	let mt = MediaType::parse("application/json").unwrap();
	assert_eq!(mt.type_, "application");
	assert_eq!(mt.subtype, "json");
	assert!(mt.parameters.is_empty());
	assert_eq!(mt.quality.millis(), 1000);
}

#[test]
fn test_media_type_parse_with_quality() {
	let mt = MediaType::parse("text/html;q=0.8").unwrap();
	assert_eq!(mt.quality.millis(), 800);
	assert!(mt.parameters.is_empty());
}

#[test]
fn test_media_type_parse_keeps_parameter_order() {
	let mt = MediaType::parse("application/atom+xml;type=feed;charset=utf-8").unwrap();
	assert_eq!(
		mt.parameters,
		vec![
			("type".to_string(), "feed".to_string()),
			("charset".to_string(), "utf-8".to_string()),
		]
	);
	assert_eq!(mt.to_string(), "application/atom+xml;type=feed;charset=utf-8");
}

#[rstest]
#[case("application")]
#[case("application/")]
#[case("/json")]
#[case("*/json")]
#[case("text/html;level")]
#[case("text/html;=1")]
#[case("te xt/html")]
fn test_media_type_parse_malformed(#[case] input: &str) {
	assert!(
		matches!(
			MediaType::parse(input),
			Err(NegotiationError::MalformedAcceptHeader { .. })
		),
		"input: {}",
		input
	);
}

#[test]
fn test_media_type_parse_bad_quality_is_quality_error() {
	assert!(matches!(
		MediaType::parse("text/html;q=2"),
		Err(NegotiationError::MalformedQualityValue { .. })
	));
}

#[test]
fn test_media_type_matching_ignores_parameters() {
	let range = MediaType::parse("application/json;odata.metadata=full").unwrap();
	let concrete = MediaType::parse("application/json;charset=utf-8").unwrap();
	assert!(range.matches(&concrete));
}

#[test]
fn test_parse_accept_header_skips_empty_elements() {
	let ranges = parse_accept_header("text/html,, ,application/json,").unwrap();
	assert_eq!(ranges.len(), 2);
	assert_eq!(ranges[0].subtype, "html");
	assert_eq!(ranges[1].subtype, "json");
}

#[test]
fn test_select_blank_accept_uses_server_default() {
	let negotiator = MediaTypeNegotiator::new();
	assert_eq!(
		negotiator.select("", &["text/plain"]).unwrap(),
		Some("text/plain")
	);
	assert_eq!(
		negotiator.select("   ", &["application/json", "text/plain"]).unwrap(),
		Some("application/json")
	);
}

#[test]
fn test_select_zero_quality_excludes() {
	// text/html is excluded by its exact q=0 range even though text/*
	// would admit it; text/plain wins on its own range
	let negotiator = MediaTypeNegotiator::new();
	let selected = negotiator
		.select(
			"text/*,text/html;q=0,text/plain;q=0.5",
			&["text/html", "text/plain"],
		)
		.unwrap();
	assert_eq!(selected, Some("text/plain"));
}

#[test]
fn test_select_exact_beats_wildcard() {
	let negotiator = MediaTypeNegotiator::new();
	let selected = negotiator
		.select(
			"application/*;q=1, application/json;q=0.5",
			&["application/json", "application/xml"],
		)
		.unwrap();
	// json is governed by its exact range; the higher-quality wildcard
	// governs xml, but exact specificity outranks it
	assert_eq!(selected, Some("application/json"));
}

#[test]
fn test_select_quality_breaks_equal_specificity() {
	let negotiator = MediaTypeNegotiator::new();
	let selected = negotiator
		.select(
			"application/json;q=0.5, application/xml;q=0.9",
			&["application/json", "application/xml"],
		)
		.unwrap();
	assert_eq!(selected, Some("application/xml"));
}

#[test]
fn test_select_server_order_breaks_full_ties() {
	let negotiator = MediaTypeNegotiator::new();
	let selected = negotiator
		.select("*/*", &["application/xml", "application/json"])
		.unwrap();
	assert_eq!(selected, Some("application/xml"));
}

#[test]
fn test_select_nothing_acceptable_returns_none() {
	let negotiator = MediaTypeNegotiator::new();
	let selected = negotiator
		.select("image/png, image/*;q=0.5", &["application/json"])
		.unwrap();
	assert_eq!(selected, None);
}

#[test]
fn test_select_malformed_accept_is_client_error() {
	let negotiator = MediaTypeNegotiator::new();
	let err = negotiator
		.select("application/json;q=1.0000", &["application/json"])
		.unwrap_err();
	assert_eq!(err.status_code(), hyper::StatusCode::BAD_REQUEST);
}

#[test]
fn test_select_required_exact_match() {
	let negotiator = MediaTypeNegotiator::new();
	let selected = negotiator
		.select_required(
			"application/json",
			&["application/json", "application/xml"],
			None,
		)
		.unwrap();
	assert_eq!(selected, "application/json");
}

#[test]
fn test_select_required_wildcard_admits_fallback() {
	let negotiator = MediaTypeNegotiator::new();
	let selected = negotiator
		.select_required(
			"image/png, */*;q=0.1",
			&["application/json"],
			Some("application/octet-stream"),
		)
		.unwrap();
	assert_eq!(selected, "application/json");

	// nothing in the required set matches, but */* admits the fallback
	let selected = negotiator
		.select_required("image/*, */*;q=0.1", &["application/json"], Some("image/png"))
		.unwrap();
	// the exact required match is preferred over the fallback route
	assert_eq!(selected, "application/json");
}

#[test]
fn test_select_required_fallback_via_inexact_wildcard() {
	let negotiator = MediaTypeNegotiator::new();
	let selected = negotiator
		.select_required("image/*", &["application/json"], Some("image/png"))
		.unwrap();
	assert_eq!(selected, "image/png");
}

#[test]
fn test_select_required_fails_without_wildcard() {
	let negotiator = MediaTypeNegotiator::new();
	let err = negotiator
		.select_required("image/png", &["application/json"], Some("application/xml"))
		.unwrap_err();
	assert!(matches!(err, NegotiationError::NotAcceptable { .. }));
	assert_eq!(err.status_code(), hyper::StatusCode::NOT_ACCEPTABLE);
}

#[test]
fn test_negotiation_is_idempotent() {
	let negotiator = MediaTypeNegotiator::new();
	let accept = "text/*;q=0.3, text/html;q=0.7, */*;q=0.5";
	let supported = ["text/plain", "text/html", "image/png"];
	let first = negotiator.select(accept, &supported).unwrap();
	let second = negotiator.select(accept, &supported).unwrap();
	assert_eq!(first, second);
}
