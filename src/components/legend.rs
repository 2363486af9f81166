use leptos::prelude::*;

use super::review_graph::{Group, node_fill};

/// Color key for the node groups, with how many nodes fall in each.
#[component]
pub fn Legend(counts: [(Group, usize); 4]) -> impl IntoView {
	view! {
		<ul class="legend">
			{counts
				.into_iter()
				.map(|(group, count)| {
					view! {
						<li>
							<span
								class="swatch"
								style=format!("background-color: {}", node_fill(group))
							></span>
							<span class="legend-label">{group.label()}</span>
							<span class="legend-count">{format!("({count})")}</span>
						</li>
					}
				})
				.collect_view()}
		</ul>
	}
}
