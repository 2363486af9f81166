//! Tunable parameters for loading and laying out the review graph.

/// Where the reviews come from and how the graph behaves once they arrive.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
	/// URL of the reviews CSV, relative to the page.
	pub reviews_url: String,
	/// DOM id of the element hosting the SVG.
	pub container_id: String,
	/// Size used when the container measures zero.
	pub fallback_size: (f64, f64),
	pub node_radius: f64,
	pub forces: ForceConfig,
	pub energy: EnergyConfig,
	pub tooltip: TooltipConfig,
	/// Simulated seconds advanced per animation frame.
	pub frame_step: f32,
}

/// Physics parameters handed to the force simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct ForceConfig {
	pub charge: f32,
	pub spring: f32,
	pub max_force: f32,
	pub node_speed: f32,
	pub damping: f32,
	pub node_mass: f32,
	/// Strength of the separate horizontal and vertical pulls toward the center.
	pub center_spring: f64,
	/// Fraction of the layout's mean offset removed each step (1.0 recenters fully).
	pub center_strength: f64,
}

/// Cooling schedule: `alpha` decays toward `alpha_target` and stepping stops below `alpha_min`.
#[derive(Clone, Debug, PartialEq)]
pub struct EnergyConfig {
	pub alpha_start: f64,
	pub alpha_min: f64,
	pub alpha_decay: f64,
	/// Target energy while a node is being dragged.
	pub reheat_target: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TooltipConfig {
	pub fade_in_ms: u32,
	pub fade_out_ms: u32,
	pub visible_opacity: f64,
	/// Offset from the pointer's page position.
	pub offset: (f64, f64),
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			reviews_url: "reviews.csv".into(),
			container_id: "graph-container".into(),
			fallback_size: (800.0, 600.0),
			node_radius: 5.0,
			forces: ForceConfig::default(),
			energy: EnergyConfig::default(),
			tooltip: TooltipConfig::default(),
			frame_step: 0.016,
		}
	}
}

impl Default for ForceConfig {
	fn default() -> Self {
		Self {
			charge: 150.0,
			spring: 0.05,
			max_force: 100.0,
			node_speed: 3000.0,
			damping: 0.9,
			node_mass: 10.0,
			center_spring: 0.05,
			center_strength: 1.0,
		}
	}
}

impl Default for EnergyConfig {
	fn default() -> Self {
		let alpha_min: f64 = 0.001;
		Self {
			alpha_start: 1.0,
			alpha_min,
			// reaches alpha_min after ~300 steps from a cold start
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			reheat_target: 0.3,
		}
	}
}

impl Default for TooltipConfig {
	fn default() -> Self {
		Self {
			fade_in_ms: 200,
			fade_out_ms: 500,
			visible_opacity: 0.9,
			offset: (5.0, -28.0),
		}
	}
}
