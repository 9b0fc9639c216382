use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::TopologyState;
use super::types::{RawDevice, TopologySnapshot};

/// Canvas-backed topology view. Pan by dragging the background, zoom with
/// the wheel, click a node to open its detail panel. A changed `data`
/// snapshot swaps the graph in place; selection follows the id when it can.
#[component]
pub fn TopologyCanvas(
	#[prop(into)] data: Signal<TopologySnapshot>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional, into)] on_node_click: Option<Callback<(String, RawDevice)>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<TopologyState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let selected = RwSignal::new(None::<RawDevice>);
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let snapshot = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		// After the first run only the graph is swapped; the canvas, the
		// animation loop and the listeners stay put.
		{
			let mut slot = state_init.borrow_mut();
			if let Some(ref mut s) = *slot {
				s.replace_graph(&snapshot);
				selected.set(s.selection.current().cloned());
				return;
			}
		}

		let window: Window = web_sys::window().unwrap();
		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		*state_init.borrow_mut() = Some(TopologyState::new(&snapshot, w, h));

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_md.borrow_mut() {
			if let Some(node) = s.node_at_position(x, y) {
				let (id, record) = (node.id.clone(), node.source.clone());
				s.selection.select(record.clone());
				selected.set(Some(record.clone()));
				if let Some(ref callback) = on_node_click {
					callback.run((id, record));
				}
			} else {
				s.pan.active = true;
				s.pan.start_x = x;
				s.pan.start_y = y;
				s.pan.transform_start_x = s.transform.x;
				s.pan.transform_start_y = s.transform.y;
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.pan.active {
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.pan.active = false;
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pan.active = false;
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / s.transform.k;
			s.transform.x = x - (x - s.transform.x) * ratio;
			s.transform.y = y - (y - s.transform.y) * ratio;
			s.transform.k = new_k;
		}
	};

	// The panel's render closure must stay free of the Rc state handle, so
	// dismissal goes through a counter signal handled here.
	let dismissals = RwSignal::new(0u32);
	let state_close = state.clone();
	Effect::new(move |_| {
		if dismissals.get() == 0 {
			return;
		}
		if let Some(ref mut s) = *state_close.borrow_mut() {
			s.selection.clear();
		}
		selected.set(None);
	});

	view! {
		<div class="topology-view">
			<canvas
				node_ref=canvas_ref
				class="topology-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			{move || {
				selected
					.get()
					.map(|device| detail_panel(&device, move |_| dismissals.update(|n| *n += 1)))
			}}
		</div>
	}
}

/// Side panel for the selected device. Panel fields are opportunistic: an
/// absent field is simply not shown.
fn detail_panel<F>(device: &RawDevice, close: F) -> impl IntoView + use<F>
where
	F: FnMut(MouseEvent) + 'static,
{
	let port = extra_text(device, "port");
	let link_speed = extra_text(device, "link_speed");
	let degraded = extra_flag(device, "degraded");

	view! {
		<aside class="detail-panel">
			<h2>"Details"</h2>
			<p><strong>"ID: "</strong>{device.id.clone()}</p>
			<p><strong>"Type: "</strong>{device.kind.name()}</p>
			{port.map(|port| view! { <p><strong>"Port: "</strong>{port}</p> })}
			{link_speed.map(|speed| view! { <p><strong>"Link speed: "</strong>{speed}</p> })}
			{degraded.then(|| view! { <p class="detail-degraded">"\u{26a0} Degraded link"</p> })}
			{device
				.signal
				.map(|dbm| view! { <p><strong>"Signal: "</strong>{format!("{dbm} dBm")}</p> })}
			<button class="detail-close" on:click=close>
				"Close"
			</button>
		</aside>
	}
}

fn extra_text(device: &RawDevice, key: &str) -> Option<String> {
	device.extra.get(key).and_then(|value| match value {
		Value::String(text) => Some(text.clone()),
		Value::Number(number) => Some(number.to_string()),
		_ => None,
	})
}

fn extra_flag(device: &RawDevice, key: &str) -> bool {
	device
		.extra
		.get(key)
		.and_then(Value::as_bool)
		.unwrap_or(false)
}
