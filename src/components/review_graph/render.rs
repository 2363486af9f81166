use super::state::Point;
use super::types::Group;

pub fn node_fill(group: Group) -> &'static str {
	match group {
		Group::City => "#1f77b4",
		Group::Positive => "#4caf50",
		Group::Neutral => "#ffeb3b",
		Group::Negative => "#f44336",
	}
}

/// Formats a coordinate for an SVG attribute.
pub fn coord(v: f64) -> String {
	format!("{v:.2}")
}

/// The SVG's `0 0 width height` viewBox, laid out with `xMidYMid meet`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBox {
	pub width: f64,
	pub height: f64,
}

/// Client-space rectangle the SVG occupies on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClientRect {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
}

impl ViewBox {
	pub fn attr(&self) -> String {
		format!("0 0 {} {}", self.width, self.height)
	}

	/// Maps a pointer position in client space into viewBox units. `meet`
	/// scales uniformly and letterboxes the spare axis around the middle.
	pub fn client_to_view(&self, rect: ClientRect, client: Point) -> Point {
		let scale = (rect.width / self.width).min(rect.height / self.height);
		if !scale.is_finite() || scale <= 0.0 {
			return Point::new(client.x - rect.left, client.y - rect.top);
		}
		let pad_x = (rect.width - self.width * scale) / 2.0;
		let pad_y = (rect.height - self.height * scale) / 2.0;
		Point::new(
			(client.x - rect.left - pad_x) / scale,
			(client.y - rect.top - pad_y) / scale,
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_group_has_its_own_color() {
		let fills: Vec<&str> = Group::ALL.iter().map(|g| node_fill(*g)).collect();
		assert_eq!(fills, vec!["#1f77b4", "#4caf50", "#ffeb3b", "#f44336"]);
	}

	#[test]
	fn identity_mapping_when_rect_matches_view_box() {
		let vb = ViewBox { width: 800.0, height: 600.0 };
		let rect = ClientRect { left: 10.0, top: 20.0, width: 800.0, height: 600.0 };
		assert_eq!(vb.client_to_view(rect, Point::new(110.0, 70.0)), Point::new(100.0, 50.0));
	}

	#[test]
	fn letterboxed_axis_is_centered() {
		let vb = ViewBox { width: 800.0, height: 600.0 };
		// twice as wide: scale 1, 400px of horizontal padding split evenly
		let rect = ClientRect { left: 0.0, top: 0.0, width: 1200.0, height: 600.0 };
		assert_eq!(vb.client_to_view(rect, Point::new(200.0, 300.0)), Point::new(0.0, 300.0));
		// half size: scale 0.5
		let rect = ClientRect { left: 0.0, top: 0.0, width: 400.0, height: 300.0 };
		assert_eq!(vb.client_to_view(rect, Point::new(200.0, 150.0)), Point::new(400.0, 300.0));
	}

	#[test]
	fn pointer_outside_the_rect_maps_outside_the_view_box() {
		let vb = ViewBox { width: 800.0, height: 600.0 };
		let rect = ClientRect { left: 100.0, top: 50.0, width: 800.0, height: 600.0 };
		assert_eq!(vb.client_to_view(rect, Point::new(60.0, 700.0)), Point::new(-40.0, 650.0));
	}

	#[test]
	fn collapsed_rect_falls_back_to_offsets() {
		let vb = ViewBox { width: 800.0, height: 600.0 };
		let rect = ClientRect { left: 5.0, top: 5.0, width: 0.0, height: 0.0 };
		assert_eq!(vb.client_to_view(rect, Point::new(15.0, 25.0)), Point::new(10.0, 20.0));
	}

	#[test]
	fn view_box_attribute() {
		assert_eq!(ViewBox { width: 640.0, height: 480.5 }.attr(), "0 0 640 480.5");
	}
}
