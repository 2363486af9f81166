use std::collections::HashSet;

use log::debug;

use super::types::{GraphData, GraphLink, GraphNode, ReviewRecord};

pub fn review_node_id(index: usize) -> String {
	format!("review-{index}")
}

/// Builds one node per distinct city (first-appearance order), followed by
/// one node per review and a city -> review link for each.
pub fn build_graph(reviews: &[ReviewRecord]) -> GraphData {
	let mut seen = HashSet::new();
	let mut nodes: Vec<GraphNode> = reviews
		.iter()
		.filter(|r| seen.insert(r.city.as_str()))
		.map(|r| GraphNode::City { id: r.city.clone() })
		.collect();
	let cities = nodes.len();

	let mut links = Vec::with_capacity(reviews.len());
	for (i, review) in reviews.iter().enumerate() {
		let id = review_node_id(i);
		links.push(GraphLink {
			source: review.city.clone(),
			target: id.clone(),
		});
		nodes.push(GraphNode::Review {
			id,
			tone: review.tone,
			comment: review.comment.clone(),
		});
	}

	debug!("Built graph: {} cities, {} reviews", cities, reviews.len());
	GraphData { nodes, links }
}

#[cfg(test)]
mod tests {
	use super::super::types::{Group, Tone};
	use super::*;

	fn record(city: &str, tone: Tone, comment: &str) -> ReviewRecord {
		ReviewRecord {
			city: city.into(),
			tone,
			comment: comment.into(),
		}
	}

	fn sample() -> Vec<ReviewRecord> {
		vec![
			record("Paris", Tone::Positive, "lovely"),
			record("Rome", Tone::Negative, "too hot"),
			record("Paris", Tone::Neutral, ""),
			record("Oslo", Tone::Positive, "fjords"),
			record("Rome", Tone::Positive, "pasta"),
		]
	}

	#[test]
	fn single_positive_review() {
		let data = build_graph(&[record("Paris", Tone::Positive, "nice")]);
		assert_eq!(
			data.nodes,
			vec![
				GraphNode::City { id: "Paris".into() },
				GraphNode::Review {
					id: "review-0".into(),
					tone: Tone::Positive,
					comment: "nice".into(),
				},
			]
		);
		assert_eq!(data.nodes[1].group(), Group::Positive);
		assert_eq!(
			data.links,
			vec![GraphLink {
				source: "Paris".into(),
				target: "review-0".into(),
			}]
		);
	}

	#[test]
	fn neutral_review_without_comment() {
		let data = build_graph(&[record("Rome", Tone::Neutral, "")]);
		let review = &data.nodes[1];
		assert_eq!(review.group(), Group::Neutral);
		assert_eq!(review.group() as u8, 3);
		assert!(matches!(review, GraphNode::Review { comment, .. } if comment.is_empty()));
	}

	#[test]
	fn one_city_node_per_distinct_city_in_first_seen_order() {
		let data = build_graph(&sample());
		let cities: Vec<&str> = data
			.nodes
			.iter()
			.filter(|n| n.group() == Group::City)
			.map(GraphNode::id)
			.collect();
		assert_eq!(cities, vec!["Paris", "Rome", "Oslo"]);
	}

	#[test]
	fn one_review_node_and_link_per_row() {
		let reviews = sample();
		let data = build_graph(&reviews);
		let review_ids: Vec<&str> = data
			.nodes
			.iter()
			.filter(|n| matches!(n, GraphNode::Review { .. }))
			.map(GraphNode::id)
			.collect();
		assert_eq!(
			review_ids,
			vec!["review-0", "review-1", "review-2", "review-3", "review-4"]
		);
		assert_eq!(data.links.len(), reviews.len());
		for (i, (link, review)) in data.links.iter().zip(&reviews).enumerate() {
			assert_eq!(link.source, review.city);
			assert_eq!(link.target, review_node_id(i));
		}
	}

	#[test]
	fn every_review_has_exactly_one_incoming_link_from_a_city() {
		let data = build_graph(&sample());
		let city_ids: HashSet<&str> = data
			.nodes
			.iter()
			.filter(|n| n.group() == Group::City)
			.map(GraphNode::id)
			.collect();
		for node in data.nodes.iter().filter(|n| n.group() != Group::City) {
			let incoming: Vec<_> = data.links.iter().filter(|l| l.target == node.id()).collect();
			assert_eq!(incoming.len(), 1);
			assert!(city_ids.contains(incoming[0].source.as_str()));
		}
	}

	#[test]
	fn group_counts_follow_tones() {
		let counts = build_graph(&sample()).group_counts();
		assert_eq!(
			counts,
			[
				(Group::City, 3),
				(Group::Positive, 3),
				(Group::Neutral, 1),
				(Group::Negative, 1),
			]
		);
	}

	#[test]
	fn empty_input_builds_empty_graph() {
		assert_eq!(build_graph(&[]), GraphData::default());
	}
}
