//! Fetching and normalizing the reviews CSV.

use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::components::review_graph::{ReviewRecord, Tone};

/// Why the reviews could not be loaded.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LoadError {
	#[error("could not fetch reviews: {0}")]
	Fetch(String),
	#[error("reviews request failed with HTTP status {0}")]
	Status(u16),
	#[error("reviews response body was not text")]
	Body,
	#[error("malformed reviews CSV: {0}")]
	Csv(String),
}

impl From<csv::Error> for LoadError {
	fn from(err: csv::Error) -> Self {
		LoadError::Csv(err.to_string())
	}
}

impl From<JsValue> for LoadError {
	fn from(err: JsValue) -> Self {
		let message = err
			.dyn_ref::<js_sys::Error>()
			.map(|e| String::from(e.message()))
			.or_else(|| err.as_string())
			.unwrap_or_else(|| format!("{err:?}"));
		LoadError::Fetch(message)
	}
}

/// A row as it appears in the file. Any column may be absent or empty.
#[derive(Debug, Deserialize)]
struct RawRow {
	#[serde(default)]
	city: Option<String>,
	#[serde(default)]
	tone: Option<String>,
	#[serde(default)]
	comment: Option<String>,
}

impl RawRow {
	fn normalize(self, line: usize) -> ReviewRecord {
		let city = self.city.as_deref().map(str::trim).unwrap_or_default();
		if city.is_empty() {
			warn!("line {line}: review has no city");
		}
		let raw_tone = self.tone.unwrap_or_default();
		let (tone, known) = Tone::classify(&raw_tone);
		if !known {
			warn!("line {line}: unknown tone {raw_tone:?}, treating as {tone}");
		}
		ReviewRecord {
			city: city.to_string(),
			tone,
			comment: self.comment.as_deref().map(str::trim).unwrap_or_default().to_string(),
		}
	}
}

/// Parses CSV text with a header row into review records.
pub fn parse_reviews(text: &str) -> Result<Vec<ReviewRecord>, LoadError> {
	let mut reader = csv::ReaderBuilder::new()
		.flexible(true)
		.from_reader(text.as_bytes());

	reader
		.deserialize::<RawRow>()
		.enumerate()
		// header is line 1
		.map(|(i, row)| -> Result<ReviewRecord, LoadError> { Ok(row?.normalize(i + 2)) })
		.collect()
}

/// Fetches `url` and parses it as the reviews CSV.
pub async fn fetch_reviews(url: &str) -> Result<Vec<ReviewRecord>, LoadError> {
	let window = web_sys::window().ok_or_else(|| LoadError::Fetch("no window".into()))?;
	let response: Response = JsFuture::from(window.fetch_with_str(url))
		.await?
		.dyn_into()?;
	if !response.ok() {
		return Err(LoadError::Status(response.status()));
	}
	let text = JsFuture::from(response.text()?)
		.await?
		.as_string()
		.ok_or(LoadError::Body)?;

	let records = parse_reviews(&text)?;
	info!("Loaded {} reviews from {url}", records.len());
	Ok(records)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::review_graph::{Group, build_graph};

	#[test]
	fn normalizes_tone_and_comment() {
		let records = parse_reviews("city,tone,comment\nParis,Positive, nice \n").unwrap();
		assert_eq!(
			records,
			vec![ReviewRecord {
				city: "Paris".into(),
				tone: Tone::Positive,
				comment: "nice".into(),
			}]
		);
	}

	#[test]
	fn empty_tone_and_comment_default() {
		let records = parse_reviews("city,tone,comment\nRome,,\n").unwrap();
		assert_eq!(records[0].tone, Tone::Neutral);
		assert_eq!(records[0].comment, "");
	}

	#[test]
	fn optional_columns_may_be_missing() {
		let records = parse_reviews("city\nLisbon\nPorto\n").unwrap();
		assert_eq!(records.len(), 2);
		assert!(records.iter().all(|r| r.tone == Tone::Neutral && r.comment.is_empty()));
	}

	#[test]
	fn quoted_comments_keep_inner_commas() {
		let text = "city,tone,comment\nBerlin,negative,\"  loud, crowded  \"\n";
		let records = parse_reviews(text).unwrap();
		assert_eq!(records[0].comment, "loud, crowded");
		assert_eq!(records[0].tone, Tone::Negative);
	}

	#[test]
	fn rows_without_city_are_kept_in_place() {
		let text = "city,tone,comment\n,positive,orphan\nMadrid,neutral,ok\n";
		let records = parse_reviews(text).unwrap();
		assert_eq!(records.len(), 2);
		assert_eq!(records[0].city, "");
		assert_eq!(records[0].comment, "orphan");
		assert_eq!(records[1].city, "Madrid");
	}

	#[test]
	fn city_less_row_keeps_review_numbering() {
		let text = "city,tone,comment\n,positive,orphan\nRome,neutral,ok\n";
		let records = parse_reviews(text).unwrap();
		let data = build_graph(&records);

		let review_ids: Vec<&str> = data
			.nodes
			.iter()
			.filter(|n| n.group() != Group::City)
			.map(|n| n.id())
			.collect();
		assert_eq!(review_ids, vec!["review-0", "review-1"]);
		assert_eq!(data.links.len(), 2);
		assert_eq!((data.links[0].source.as_str(), data.links[0].target.as_str()), ("", "review-0"));
		assert_eq!(
			(data.links[1].source.as_str(), data.links[1].target.as_str()),
			("Rome", "review-1")
		);
	}

	#[test]
	fn city_whitespace_is_trimmed_but_case_kept() {
		let records = parse_reviews("city,tone\n  New York ,POSITIVE\n").unwrap();
		assert_eq!(records[0].city, "New York");
		assert_eq!(records[0].tone, Tone::Positive);
	}

	#[test]
	fn short_rows_are_tolerated() {
		let records = parse_reviews("city,tone,comment\nVienna,positive\n").unwrap();
		assert_eq!(records[0].comment, "");
	}
}
