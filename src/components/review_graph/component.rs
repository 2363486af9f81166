use leptos::prelude::*;
use leptos::{ev, html};
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::MouseEvent;

use super::render::{ClientRect, ViewBox, coord, node_fill};
use super::state::{Frame, Point, ReviewGraphState};
use super::tooltip::{Tooltip, TooltipState};
use super::types::GraphData;
use crate::config::GraphConfig;

fn node_coord(
	frame: RwSignal<Frame>,
	slot: usize,
	pick: fn(&Point) -> f64,
) -> impl Fn() -> String + Copy + Send + Sync + 'static {
	move || frame.with(|f| f.nodes.get(slot).map(pick).map(coord).unwrap_or_default())
}

fn link_coord(
	frame: RwSignal<Frame>,
	link: usize,
	pick: fn(&(Point, Point)) -> f64,
) -> impl Fn() -> String + Copy + Send + Sync + 'static {
	move || frame.with(|f| f.links.get(link).map(pick).map(coord).unwrap_or_default())
}

type FrameCallback = StoredValue<Option<Closure<dyn FnMut()>>, LocalStorage>;

/// Schedules `animate` for the next animation frame unless one is already pending.
fn request_frame(animate: FrameCallback, pending: StoredValue<Option<i32>>) {
	if pending.try_get_value().flatten().is_some() {
		return;
	}
	let handle = animate.try_with_value(|cb| {
		let (cb, win) = (cb.as_ref()?, web_sys::window()?);
		win.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
	});
	pending.try_set_value(handle.flatten());
}

/// Force-directed SVG view of a review graph, sized to its container when mounted.
#[component]
pub fn ReviewGraph(
	data: GraphData,
	#[prop(optional)] config: GraphConfig,
) -> impl IntoView {
	let container_ref = NodeRef::<html::Div>::new();
	let state = StoredValue::new_local(None::<ReviewGraphState>);
	let animate: FrameCallback = StoredValue::new_local(None);
	let pending = StoredValue::new(None::<i32>);
	let view_box = RwSignal::new(None::<ViewBox>);
	let frame = RwSignal::new(Frame::default());
	let tooltip = RwSignal::new(TooltipState::default());

	let (data_init, config_init) = (data.clone(), config.clone());
	Effect::new(move |_| {
		let Some(container) = container_ref.get() else {
			return;
		};
		if state.with_value(Option::is_some) {
			return;
		}

		let (w, h) = match (container.client_width(), container.client_height()) {
			(w, h) if w > 0 && h > 0 => (w as f64, h as f64),
			(w, h) => {
				let (fw, fh) = config_init.fallback_size;
				warn!("#{} measures {w}x{h}; using {fw}x{fh}", config_init.container_id);
				(fw, fh)
			}
		};
		let graph = ReviewGraphState::new(&data_init, &config_init, w, h);
		frame.set(graph.frame());
		state.set_value(Some(graph));
		view_box.set(Some(ViewBox {
			width: w,
			height: h,
		}));
		info!(
			"Review graph started: {} nodes, {} links in {w}x{h}",
			data_init.nodes.len(),
			data_init.links.len()
		);

		let dt = config_init.frame_step;
		animate.set_value(Some(Closure::new(move || {
			pending.try_set_value(None);
			let running = state
				.try_update_value(|s| {
					let Some(s) = s.as_mut() else {
						return false;
					};
					let running = s.tick(dt);
					frame.set(s.frame());
					running
				})
				.unwrap_or(false);
			// a settled simulation stops asking for frames until a drag wakes it
			if running {
				request_frame(animate, pending);
			}
		})));
		request_frame(animate, pending);
	});

	let to_view = move |ev: &MouseEvent| -> Option<Point> {
		let container = container_ref.get_untracked()?;
		let vb = view_box.get_untracked()?;
		let r = container.get_bounding_client_rect();
		let rect = ClientRect {
			left: r.left(),
			top: r.top(),
			width: r.width(),
			height: r.height(),
		};
		Some(vb.client_to_view(
			rect,
			Point::new(ev.client_x() as f64, ev.client_y() as f64),
		))
	};

	// a held node keeps following the pointer outside the graph, so track it on the window
	let move_handle = window_event_listener(ev::mousemove, move |ev| {
		let Some(p) = to_view(&ev) else {
			return;
		};
		state.try_update_value(|s| {
			if let Some(s) = s {
				if let Some(slot) = s.drag.held() {
					s.drag_move(slot, p);
					frame.set(s.frame());
				}
			}
		});
	});
	let up_handle = window_event_listener(ev::mouseup, move |_| {
		state.try_update_value(|s| {
			if let Some(s) = s {
				while let Some(slot) = s.drag.held() {
					s.drag_end(slot);
				}
			}
		});
	});

	on_cleanup(move || {
		move_handle.remove();
		up_handle.remove();
		if let (Some(Some(id)), Some(win)) = (pending.try_get_value(), web_sys::window()) {
			let _ = win.cancel_animation_frame(id);
		}
		// drops the frame callback and the simulation with it
		animate.try_set_value(None);
		state.try_set_value(None);
	});

	let radius = coord(config.node_radius);
	let links = (0..data.links.len())
		.map(|i| {
			view! {
				<line
					class="link"
					x1=link_coord(frame, i, |(a, _)| a.x)
					y1=link_coord(frame, i, |(a, _)| a.y)
					x2=link_coord(frame, i, |(_, b)| b.x)
					y2=link_coord(frame, i, |(_, b)| b.y)
				/>
			}
		})
		.collect_view();

	let nodes = data
		.nodes
		.iter()
		.enumerate()
		.map(|(slot, node)| {
			let text = node.tooltip_text().to_string();
			let (tip_in, tip_out) = (config.tooltip.clone(), config.tooltip.clone());
			let on_mousedown = move |ev: MouseEvent| {
				ev.prevent_default();
				ev.stop_propagation();
				let Some(p) = to_view(&ev) else {
					return;
				};
				let woke = state
					.try_update_value(|s| s.as_mut().is_some_and(|s| s.drag_start(slot, p)))
					.unwrap_or(false);
				if woke {
					request_frame(animate, pending);
				}
			};
			view! {
				<circle
					class="node"
					r=radius.clone()
					fill=node_fill(node.group())
					cx=node_coord(frame, slot, |p| p.x)
					cy=node_coord(frame, slot, |p| p.y)
					on:mousedown=on_mousedown
					on:mouseover=move |ev: MouseEvent| {
						tooltip
							.update(|t| {
								t.show(&tip_in, &text, ev.page_x() as f64, ev.page_y() as f64)
							})
					}
					on:mouseout=move |_: MouseEvent| tooltip.update(|t| t.hide(&tip_out))
				/>
			}
		})
		.collect_view();

	view! {
		<div id=config.container_id.clone() class="graph-container" node_ref=container_ref>
			<svg
				viewBox=move || view_box.get().map(|vb| vb.attr())
				preserveAspectRatio="xMidYMid meet"
				width="100%"
				height="100%"
			>
				<g class="links">{links}</g>
				<g class="nodes">{nodes}</g>
			</svg>
		</div>
		<Tooltip state=tooltip />
	}
}
