use leptos::prelude::*;

use crate::config::TooltipConfig;

/// What the hover overlay shows and how it is transitioning.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipState {
	pub text: String,
	pub left: f64,
	pub top: f64,
	pub opacity: f64,
	pub transition_ms: u32,
}

impl TooltipState {
	/// Fades in near the pointer's page position. Any running fade is replaced.
	pub fn show(&mut self, config: &TooltipConfig, text: &str, page_x: f64, page_y: f64) {
		self.text = text.to_string();
		self.left = page_x + config.offset.0;
		self.top = page_y + config.offset.1;
		self.opacity = config.visible_opacity;
		self.transition_ms = config.fade_in_ms;
	}

	/// Fades out in place, keeping the last text so it doesn't blank mid-fade.
	pub fn hide(&mut self, config: &TooltipConfig) {
		self.opacity = 0.0;
		self.transition_ms = config.fade_out_ms;
	}

	pub fn style(&self) -> String {
		format!(
			"left: {}px; top: {}px; opacity: {}; transition: opacity {}ms;",
			self.left, self.top, self.opacity, self.transition_ms
		)
	}
}

#[component]
pub fn Tooltip(state: RwSignal<TooltipState>) -> impl IntoView {
	view! {
		<div class="tooltip" style=move || state.with(TooltipState::style)>
			{move || state.with(|s| s.text.clone())}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn starts_hidden() {
		assert_eq!(TooltipState::default().opacity, 0.0);
	}

	#[test]
	fn show_fades_in_quickly_next_to_pointer() {
		let config = TooltipConfig::default();
		let mut tip = TooltipState::default();
		tip.show(&config, "great coffee", 100.0, 200.0);
		assert_eq!(tip.text, "great coffee");
		assert_eq!((tip.left, tip.top), (105.0, 172.0));
		assert_eq!(tip.opacity, 0.9);
		assert_eq!(tip.transition_ms, 200);
	}

	#[test]
	fn hide_fades_out_slowly_and_keeps_text() {
		let config = TooltipConfig::default();
		let mut tip = TooltipState::default();
		tip.show(&config, "Paris", 0.0, 0.0);
		tip.hide(&config);
		assert_eq!(tip.opacity, 0.0);
		assert_eq!(tip.transition_ms, 500);
		assert_eq!(tip.text, "Paris");
	}

	#[test]
	fn hovering_again_restarts_the_fade_in() {
		let config = TooltipConfig::default();
		let mut tip = TooltipState::default();
		tip.show(&config, "review-1", 0.0, 0.0);
		tip.hide(&config);
		tip.show(&config, "review-2", 10.0, 40.0);
		assert_eq!(tip.opacity, 0.9);
		assert_eq!(tip.transition_ms, 200);
		assert_eq!(tip.text, "review-2");
	}

	#[test]
	fn style_carries_position_and_transition() {
		let tip = TooltipState {
			text: String::new(),
			left: 12.0,
			top: 8.5,
			opacity: 0.9,
			transition_ms: 200,
		};
		assert_eq!(tip.style(), "left: 12px; top: 8.5px; opacity: 0.9; transition: opacity 200ms;");
	}
}
