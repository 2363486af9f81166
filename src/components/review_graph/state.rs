use std::collections::HashMap;
use std::f64::consts::PI;
use std::ops::{Add, Sub};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::{debug, warn};

use super::types::{GraphData, GraphNode};
use crate::config::{EnergyConfig, ForceConfig, GraphConfig};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

impl Add for Point {
	type Output = Point;
	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Point {
	type Output = Point;
	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

/// Links a simulated node back to its position in `GraphData::nodes`.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub slot: usize,
}

/// Screen-ready positions, indexed like `GraphData::nodes` and `GraphData::links`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
	pub nodes: Vec<Point>,
	pub links: Vec<(Point, Point)>,
}

/// Where a drag gesture grabbed its node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grab {
	pub pointer_start: Point,
	pub node_start: Point,
}

/// In-progress drag gestures keyed by node slot.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub grabs: HashMap<usize, Grab>,
}

impl DragState {
	pub fn active(&self) -> usize {
		self.grabs.len()
	}

	/// Any node currently held; a mouse holds at most one.
	pub fn held(&self) -> Option<usize> {
		self.grabs.keys().next().copied()
	}
}

/// Cooling schedule driving how far each step may move nodes.
#[derive(Clone, Debug)]
pub struct Energy {
	pub alpha: f64,
	pub alpha_target: f64,
	alpha_min: f64,
	alpha_decay: f64,
}

impl Energy {
	pub fn new(config: &EnergyConfig) -> Self {
		Self {
			alpha: config.alpha_start,
			alpha_target: 0.0,
			alpha_min: config.alpha_min,
			alpha_decay: config.alpha_decay,
		}
	}

	fn step(&mut self) -> f64 {
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;
		self.alpha
	}

	pub fn settled(&self) -> bool {
		self.alpha < self.alpha_min
	}
}

/// Initial offset of the `i`th node on a sunflower spiral, so no two nodes coincide.
fn phyllotaxis(i: usize, radius: f64) -> Point {
	let angle = i as f64 * PI * (3.0 - 5f64.sqrt());
	let r = radius * (0.5 + i as f64).sqrt();
	Point::new(r * angle.cos(), r * angle.sin())
}

pub struct ReviewGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub drag: DragState,
	pub energy: Energy,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	forces: ForceConfig,
	reheat_target: f64,
	slots: Vec<DefaultNodeIdx>,
	links: Vec<(usize, usize)>,
}

impl ReviewGraphState {
	pub fn new(data: &GraphData, config: &GraphConfig, width: f64, height: f64) -> Self {
		let forces = config.forces.clone();
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: forces.charge,
			force_spring: forces.spring,
			force_max: forces.max_force,
			node_speed: forces.node_speed,
			damping_factor: forces.damping,
		});
		let center = Point::new(width / 2.0, height / 2.0);

		let mut slots = Vec::with_capacity(data.nodes.len());
		// links run city -> review, so each end is looked up among its own kind
		let (mut city_slots, mut review_slots) = (HashMap::new(), HashMap::new());
		for (slot, node) in data.nodes.iter().enumerate() {
			// cities start at the center, nudged apart so the charge force has a direction
			let start = match node {
				GraphNode::City { .. } => center + phyllotaxis(slot, 0.5),
				GraphNode::Review { .. } => center + phyllotaxis(slot, 10.0),
			};
			let idx = graph.add_node(NodeData {
				x: start.x as f32,
				y: start.y as f32,
				mass: forces.node_mass,
				is_anchor: false,
				user_data: NodeInfo { slot },
			});
			slots.push(idx);
			let by_id = match node {
				GraphNode::City { .. } => &mut city_slots,
				GraphNode::Review { .. } => &mut review_slots,
			};
			if by_id.insert(node.id(), slot).is_some() {
				warn!("duplicate node id {:?}; links resolve to the last one", node.id());
			}
		}

		let mut links = Vec::with_capacity(data.links.len());
		for link in &data.links {
			match (
				city_slots.get(link.source.as_str()),
				review_slots.get(link.target.as_str()),
			) {
				(Some(&src), Some(&tgt)) => {
					graph.add_edge(slots[src], slots[tgt], EdgeData::default());
					links.push((src, tgt));
				}
				_ => warn!("dropping link {} -> {}: unknown node", link.source, link.target),
			}
		}

		Self {
			graph,
			drag: DragState::default(),
			energy: Energy::new(&config.energy),
			width,
			height,
			animation_running: true,
			forces,
			reheat_target: config.energy.reheat_target,
			slots,
			links,
		}
	}

	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}

	/// Advances the simulation one step. Returns whether it is still running.
	pub fn tick(&mut self, dt: f32) -> bool {
		if !self.animation_running {
			return false;
		}
		let alpha = self.energy.step();
		self.graph.update(dt * alpha as f32);
		self.pull_to_center(alpha);

		if self.energy.settled() {
			self.animation_running = false;
			debug!("Simulation settled (alpha {:.4})", self.energy.alpha);
		}
		self.animation_running
	}

	/// Weak per-axis springs toward the center, then a rigid shift putting the
	/// layout's mean position on the center. Pinned nodes stay put.
	fn pull_to_center(&mut self, alpha: f64) {
		let center = self.center();
		let spring = self.forces.center_spring * alpha;
		self.graph.visit_nodes_mut(|node| {
			if node.data.is_anchor {
				return;
			}
			node.data.x += ((center.x - node.data.x as f64) * spring) as f32;
			node.data.y += ((center.y - node.data.y as f64) * spring) as f32;
		});

		let (mut sum, mut count) = (Point::default(), 0usize);
		self.graph.visit_nodes(|node| {
			sum = sum + Point::new(node.x() as f64, node.y() as f64);
			count += 1;
		});
		if count == 0 {
			return;
		}
		let strength = self.forces.center_strength;
		let shift = Point::new(
			(center.x - sum.x / count as f64) * strength,
			(center.y - sum.y / count as f64) * strength,
		);
		self.graph.visit_nodes_mut(|node| {
			if !node.data.is_anchor {
				node.data.x += shift.x as f32;
				node.data.y += shift.y as f32;
			}
		});
	}

	pub fn restart(&mut self) {
		if !self.animation_running {
			debug!("Simulation restarted (alpha {:.4})", self.energy.alpha);
		}
		self.animation_running = true;
	}

	pub fn position(&self, slot: usize) -> Option<Point> {
		let idx = *self.slots.get(slot)?;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(Point::new(node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	#[cfg(test)]
	pub fn is_pinned(&self, slot: usize) -> bool {
		let Some(&idx) = self.slots.get(slot) else {
			return false;
		};
		let mut pinned = false;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				pinned = node.data.is_anchor;
			}
		});
		pinned
	}

	fn set_pin(&mut self, slot: usize, at: Option<Point>) {
		let Some(&idx) = self.slots.get(slot) else {
			return;
		};
		self.graph.visit_nodes_mut(|node| {
			if node.index() != idx {
				return;
			}
			match at {
				Some(p) => {
					node.data.x = p.x as f32;
					node.data.y = p.y as f32;
					node.data.is_anchor = true;
				}
				None => node.data.is_anchor = false,
			}
		});
	}

	/// Grabs a node: reheats the simulation if nothing else is held, and pins
	/// the node where it is. Returns `true` when a settled simulation was woken.
	pub fn drag_start(&mut self, slot: usize, pointer: Point) -> bool {
		let Some(node_start) = self.position(slot) else {
			return false;
		};
		let was_running = self.animation_running;
		if self.drag.active() == 0 {
			self.energy.alpha_target = self.reheat_target;
			self.restart();
		}
		self.drag.grabs.insert(
			slot,
			Grab {
				pointer_start: pointer,
				node_start,
			},
		);
		self.set_pin(slot, Some(node_start));
		!was_running && self.animation_running
	}

	/// Moves the pinned node with the pointer, keeping the grab offset.
	pub fn drag_move(&mut self, slot: usize, pointer: Point) {
		let Some(grab) = self.drag.grabs.get(&slot).copied() else {
			return;
		};
		self.set_pin(slot, Some(grab.node_start + (pointer - grab.pointer_start)));
	}

	/// Releases a node back to the physics; lets the simulation cool once
	/// the last held node is let go.
	pub fn drag_end(&mut self, slot: usize) {
		if self.drag.grabs.remove(&slot).is_none() {
			return;
		}
		if self.drag.active() == 0 {
			self.energy.alpha_target = 0.0;
		}
		self.set_pin(slot, None);
	}

	pub fn frame(&self) -> Frame {
		let mut nodes = vec![Point::default(); self.slots.len()];
		self.graph.visit_nodes(|node| {
			if let Some(p) = nodes.get_mut(node.data.user_data.slot) {
				*p = Point::new(node.x() as f64, node.y() as f64);
			}
		});
		let links = self
			.links
			.iter()
			.map(|&(src, tgt)| (nodes[src], nodes[tgt]))
			.collect();
		Frame { nodes, links }
	}
}
