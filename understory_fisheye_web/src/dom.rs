// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The DOM host and the exported entry points.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use js_sys::{Array, Object, Reflect};
use understory_fisheye::classes::STYLE_ELEMENT;
use understory_fisheye::{
    CellIndex, FisheyeGrid, FisheyeOptions, GridHost, GridShape, TriggerOutcome, WalkProgress,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{Document, DomTokenList, Element, Event, HtmlElement, Node, Window};

use crate::options::{read_options, to_js_error};
use crate::{content_size, parse_px};

type Engine = FisheyeGrid<DomGrid>;

/// The container element with its rows and cells.
struct DomGrid {
    document: Document,
    container: HtmlElement,
    rows: Vec<Element>,
    cells: Vec<Vec<Element>>,
}

impl fmt::Debug for DomGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomGrid")
            .field("id", &self.container.id())
            .field("rows", &self.rows.len())
            .finish_non_exhaustive()
    }
}

fn toggle(list: &DomTokenList, class: &str, on: bool) {
    if let Err(err) = list.toggle_with_force(class, on) {
        log::warn!("fisheye class `{class}` could not be toggled: {err:?}");
    }
}

impl GridHost for DomGrid {
    fn insert_stylesheet(&mut self, css: &str) {
        let style = match self.document.create_element("style") {
            Ok(style) => style,
            Err(err) => {
                log::error!("fisheye stylesheet element could not be created: {err:?}");
                return;
            }
        };
        let _ = style.set_attribute("type", "text/css");
        style.set_class_name(STYLE_ELEMENT);
        style.set_text_content(Some(css));
        let Some(head) = self.document.head() else {
            log::error!("fisheye stylesheet not inserted: document has no head");
            return;
        };
        if let Err(err) = head.append_child(&style) {
            log::error!("fisheye stylesheet not inserted: {err:?}");
        }
    }

    fn set_step_id(&mut self, id: &str) {
        self.container.set_id(id);
    }

    fn set_grid_class(&mut self, class: &str, on: bool) {
        toggle(&self.container.class_list(), class, on);
    }

    fn set_row_class(&mut self, row: usize, class: &str, on: bool) {
        if let Some(row) = self.rows.get(row) {
            toggle(&row.class_list(), class, on);
        }
    }

    fn set_cell_class(&mut self, cell: CellIndex, class: &str, on: bool) {
        if let Some(cell) = self.cells.get(cell.row).and_then(|r| r.get(cell.col)) {
            toggle(&cell.class_list(), class, on);
        }
    }
}

/// Turns `container` into a fisheye grid and returns it for chaining.
///
/// `options` must be `undefined` or a plain object; anything else throws
/// before the DOM is modified.
#[wasm_bindgen(js_name = fisheyeGrid)]
pub fn fisheye_grid(container: HtmlElement, options: JsValue) -> Result<HtmlElement, JsValue> {
    let options = read_options(&options).map_err(|err| to_js_error(&err))?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("fisheye grid needs a window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("fisheye grid needs a document"))?;

    let base_id = container.id();
    if base_id.is_empty() {
        log::warn!("fisheye grid container has no id; step selectors will not match");
    }

    let (rows, cells) = collect(&container);
    let shape = GridShape::from_row_lengths(cells.iter().map(Vec::len));
    attach_cell_data(&cells, shape, &options.data_name)?;

    let (width, height) = measure(&window, &container);
    let geometry = options.resolve(width, height);
    let host = DomGrid {
        document,
        container: container.clone(),
        rows,
        cells,
    };
    let engine = Rc::new(RefCell::new(FisheyeGrid::new(
        host, &base_id, shape, &options, geometry,
    )));
    listen(&container, &options, &engine, &window)?;
    Ok(container)
}

/// Applies [`fisheye_grid`] to every element matching `selector`.
///
/// Each grid gets its own engine; returns the initialized containers.
#[wasm_bindgen(js_name = fisheyeGridAll)]
pub fn fisheye_grid_all(selector: &str, options: JsValue) -> Result<Array, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("fisheye grid needs a document"))?;
    let found = document.query_selector_all(selector)?;
    let grids = Array::new();
    for i in 0..found.length() {
        let Some(node) = found.item(i) else {
            continue;
        };
        let Ok(container) = node.dyn_into::<HtmlElement>() else {
            continue;
        };
        grids.push(&fisheye_grid(container, options.clone())?);
    }
    Ok(grids)
}

fn children(element: &Element) -> Vec<Element> {
    let list = element.children();
    (0..list.length()).filter_map(|i| list.item(i)).collect()
}

fn collect(container: &HtmlElement) -> (Vec<Element>, Vec<Vec<Element>>) {
    let rows = children(container);
    let cells = rows.iter().map(children).collect();
    (rows, cells)
}

/// Attaches `{ row, col, rowIndex, colIndex }` to every cell under `data_name`.
///
/// All cells of one row share the same `row` array, and likewise for columns.
fn attach_cell_data(
    cells: &[Vec<Element>],
    shape: GridShape,
    data_name: &str,
) -> Result<(), JsValue> {
    let key = JsValue::from_str(data_name);
    let row_arrays: Vec<Array> = cells
        .iter()
        .map(|row| row.iter().collect::<Array>())
        .collect();
    let col_arrays: Vec<Array> = (0..shape.cols)
        .map(|col| cells.iter().filter_map(|row| row.get(col)).collect::<Array>())
        .collect();

    for (r, row) in cells.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let data = Object::new();
            Reflect::set(&data, &JsValue::from_str("row"), &row_arrays[r])?;
            if let Some(col) = col_arrays.get(c) {
                Reflect::set(&data, &JsValue::from_str("col"), col)?;
            }
            Reflect::set(&data, &JsValue::from_str("rowIndex"), &index_to_js(r))?;
            Reflect::set(&data, &JsValue::from_str("colIndex"), &index_to_js(c))?;
            Reflect::set(cell, &key, &data)?;
        }
    }
    Ok(())
}

#[allow(
    clippy::cast_precision_loss,
    reason = "Grid indices are small; f64 represents them exactly."
)]
fn index_to_js(index: usize) -> JsValue {
    JsValue::from_f64(index as f64)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Only values written by `index_to_js` are read back."
)]
fn index_from_js(value: &JsValue) -> Option<usize> {
    let n = value.as_f64()?;
    (n.is_finite() && n >= 0.0).then_some(n as usize)
}

/// Content-box size of the container, like `$(el).width()`.
///
/// Border-box computed sizes have padding and border removed. When the
/// computed size is unusable, the client size minus padding is used.
fn measure(window: &Window, container: &HtmlElement) -> (u32, u32) {
    let computed = window.get_computed_style(container).ok().flatten();
    let value = |property: &str| {
        computed
            .as_ref()
            .and_then(|style| style.get_property_value(property).ok())
    };
    let px = |property: &str| value(property).and_then(|v| parse_px(&v));
    let sum = |a: &str, b: &str| px(a).unwrap_or(0).saturating_add(px(b).unwrap_or(0));
    let border_box = value("box-sizing").is_some_and(|v| v.trim() == "border-box");

    let axis = |size: &str, client: i32, padding: (&str, &str), border: (&str, &str)| {
        let padding = sum(padding.0, padding.1);
        match px(size) {
            Some(size) => content_size(size, border_box, padding, sum(border.0, border.1)),
            None => content_size(u32::try_from(client).unwrap_or(0), true, padding, 0),
        }
    };
    (
        axis(
            "width",
            container.client_width(),
            ("padding-left", "padding-right"),
            ("border-left-width", "border-right-width"),
        ),
        axis(
            "height",
            container.client_height(),
            ("padding-top", "padding-bottom"),
            ("border-top-width", "border-bottom-width"),
        ),
    )
}

/// Finds the cell an event happened in, if it belongs to `container`.
fn target_cell(event: &Event, container: &HtmlElement, selector: &str) -> Option<Element> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let cell = target.closest(selector).ok()??;
    let node: &Node = &cell;
    container.contains(Some(node)).then_some(cell)
}

fn cell_index(cell: &Element, data_name: &JsValue) -> Option<CellIndex> {
    let data = Reflect::get(cell, data_name).ok()?;
    let row = index_from_js(&Reflect::get(&data, &JsValue::from_str("rowIndex")).ok()?)?;
    let col = index_from_js(&Reflect::get(&data, &JsValue::from_str("colIndex")).ok()?)?;
    Some(CellIndex::new(row, col))
}

fn listen(
    container: &HtmlElement,
    options: &FisheyeOptions,
    engine: &Rc<RefCell<Engine>>,
    window: &Window,
) -> Result<(), JsValue> {
    let selector: String = format!(".{}", options.cell_class);
    let data_name = JsValue::from_str(&options.data_name);
    let engine = Rc::clone(engine);
    let window = window.clone();
    let root = container.clone();

    let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(cell) = target_cell(&event, &root, &selector) else {
            return;
        };
        let Some(index) = cell_index(&cell, &data_name) else {
            return;
        };
        let outcome = engine.borrow_mut().trigger(index);
        if let TriggerOutcome::Started(_) = outcome {
            if let Err(err) = schedule_tick(Rc::clone(&engine), &window) {
                log::error!("fisheye walk not scheduled, finishing it: {err:?}");
                engine.borrow_mut().finish();
            }
        }
    });
    for kind in options.event_kinds() {
        container.add_event_listener_with_callback(kind, handler.as_ref().unchecked_ref())?;
    }
    // The listener lives as long as the page.
    handler.forget();
    Ok(())
}

/// Schedules the next tick of the running walk.
fn schedule_tick(engine: Rc<RefCell<Engine>>, window: &Window) -> Result<(), JsValue> {
    let delay = i32::try_from(engine.borrow().speed_ms()).unwrap_or(i32::MAX);
    let next_window = window.clone();
    let callback = Closure::once_into_js(move || {
        let progress = engine.borrow_mut().tick();
        if let WalkProgress::Step(_) = progress {
            if let Err(err) = schedule_tick(Rc::clone(&engine), &next_window) {
                log::error!("fisheye step not scheduled, finishing the walk: {err:?}");
                engine.borrow_mut().finish();
            }
        }
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)?;
    Ok(())
}
