use std::fmt;

/// Sentiment of a single review.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tone {
	Positive,
	#[default]
	Neutral,
	Negative,
}

impl Tone {
	/// Classifies a raw CSV cell. Blank means neutral; anything that isn't
	/// positive or neutral counts as negative. The second value is `false`
	/// when the text wasn't one of the three known tones.
	pub fn classify(raw: &str) -> (Self, bool) {
		match raw.trim().to_lowercase().as_str() {
			"" | "neutral" => (Tone::Neutral, true),
			"positive" => (Tone::Positive, true),
			"negative" => (Tone::Negative, true),
			_ => (Tone::Negative, false),
		}
	}
}

impl fmt::Display for Tone {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Tone::Positive => "positive",
			Tone::Neutral => "neutral",
			Tone::Negative => "negative",
		})
	}
}

/// One normalized row of the reviews file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRecord {
	pub city: String,
	pub tone: Tone,
	pub comment: String,
}

/// Color group of a node. Discriminants follow the numbering used by the legend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Group {
	City = 1,
	Positive = 2,
	Neutral = 3,
	Negative = 4,
}

impl Group {
	pub const ALL: [Group; 4] = [Group::City, Group::Positive, Group::Neutral, Group::Negative];

	pub fn label(self) -> &'static str {
		match self {
			Group::City => "City",
			Group::Positive => "Positive",
			Group::Neutral => "Neutral",
			Group::Negative => "Negative",
		}
	}
}

impl From<Tone> for Group {
	fn from(tone: Tone) -> Self {
		match tone {
			Tone::Positive => Group::Positive,
			Tone::Neutral => Group::Neutral,
			Tone::Negative => Group::Negative,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphNode {
	City {
		id: String,
	},
	Review {
		id: String,
		tone: Tone,
		comment: String,
	},
}

impl GraphNode {
	pub fn id(&self) -> &str {
		match self {
			GraphNode::City { id } | GraphNode::Review { id, .. } => id,
		}
	}

	pub fn group(&self) -> Group {
		match self {
			GraphNode::City { .. } => Group::City,
			GraphNode::Review { tone, .. } => Group::from(*tone),
		}
	}

	/// Text shown on hover: the comment when there is one, otherwise the id.
	pub fn tooltip_text(&self) -> &str {
		match self {
			GraphNode::Review { comment, .. } if !comment.is_empty() => comment,
			_ => self.id(),
		}
	}
}

/// Directed edge from a city to one of its reviews.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Number of nodes in each color group, in legend order.
	pub fn group_counts(&self) -> [(Group, usize); 4] {
		Group::ALL.map(|g| (g, self.nodes.iter().filter(|n| n.group() == g).count()))
	}
}
