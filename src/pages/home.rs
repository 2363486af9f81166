use leptos::prelude::*;
use log::error;

use crate::components::legend::Legend;
use crate::components::review_graph::{ReviewGraph, build_graph};
use crate::config::GraphConfig;
use crate::loader::{LoadError, fetch_reviews};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let config = GraphConfig::default();
	let url = config.reviews_url.clone();
	let reviews = LocalResource::new(move || {
		let url = url.clone();
		async move { fetch_reviews(&url).await.inspect_err(|e| error!("{e}")) }
	});

	view! {
		<Suspense fallback=|| view! { <p class="loading">"Loading reviews..."</p> }>
			<ErrorBoundary fallback=|errors| {
				view! {
					<h1>"Uh oh! Something went wrong!"</h1>

					<p>"Errors: "</p>
					<ul>
						{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
						}}
					</ul>
				}
			}>
				{move || {
					let config = config.clone();
					Suspend::new(async move {
						let records = reviews.await?;
						let data = build_graph(&records);
						let counts = data.group_counts();
						Ok::<_, LoadError>(
							view! {
								<div class="review-page">
									<div class="graph-overlay">
										<h1>"City Reviews"</h1>
										<p class="subtitle">
											"Drag nodes to reposition. Hover a review to read it."
										</p>
										<Legend counts=counts />
									</div>
									<ReviewGraph data=data config=config />
								</div>
							},
						)
					})
				}}
			</ErrorBoundary>
		</Suspense>
	}
}
