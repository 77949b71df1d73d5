// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reading [`FisheyeOptions`] from a JavaScript options bag.

use alloc::string::String;

use js_sys::{Array, Object, Reflect};
use understory_fisheye::{FisheyeOptions, OptionsError};
use wasm_bindgen::JsValue;

use crate::round_px;

/// Builds options from `undefined` or a plain object.
///
/// Keys holding a value of the wrong type are skipped and keep their default.
pub(crate) fn read_options(value: &JsValue) -> Result<FisheyeOptions, OptionsError> {
    let mut opts = FisheyeOptions::default();
    if value.is_undefined() {
        return Ok(opts);
    }
    if !is_plain_object(value) {
        return Err(OptionsError::NotAnObject);
    }

    if let Some(px) = read_px(value, "minWidth") {
        opts.min_width = px;
    }
    if let Some(px) = read_px(value, "minHeight") {
        opts.min_height = px;
    }
    if let Some(steps) = read_px(value, "steps") {
        opts.steps = steps;
    }
    if let Some(ms) = read_px(value, "speed") {
        opts.speed_ms = ms;
    }
    opts.width = read_px(value, "width");
    opts.height = read_px(value, "height");
    if let Some(class) = read_string(value, "cellClass") {
        opts.cell_class = class;
    }
    if let Some(class) = read_string(value, "rowClass") {
        opts.row_class = class;
    }
    if let Some(name) = read_string(value, "dataName") {
        opts.data_name = name;
    }
    if let Some(events) = read_string(value, "events") {
        opts.events = events;
    }
    Ok(opts)
}

/// `true` for object literals and `Object.create(null)`, like `$.isPlainObject`.
fn is_plain_object(value: &JsValue) -> bool {
    if !value.is_object() || value.is_function() || Array::is_array(value) {
        return false;
    }
    let proto = Object::get_prototype_of(value);
    proto.is_null() || Object::get_prototype_of(&proto).is_null()
}

fn field(bag: &JsValue, key: &str) -> Option<JsValue> {
    let value = Reflect::get(bag, &JsValue::from_str(key)).ok()?;
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value)
    }
}

fn read_px(bag: &JsValue, key: &str) -> Option<u32> {
    let value = field(bag, key)?;
    let px = value.as_f64().and_then(round_px);
    if px.is_none() {
        log::warn!("fisheye option `{key}` ignored: expected a non-negative number");
    }
    px
}

fn read_string(bag: &JsValue, key: &str) -> Option<String> {
    let value = field(bag, key)?;
    let text = value.as_string();
    if text.is_none() {
        log::warn!("fisheye option `{key}` ignored: expected a string");
    }
    text
}

/// Converts a setup failure into the value thrown to JavaScript.
pub(crate) fn to_js_error(err: &OptionsError) -> JsValue {
    let message = alloc::format!("{err}");
    js_sys::Error::new(&message).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use js_sys::{Date, Function};
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn undefined_gives_the_defaults() {
        assert_eq!(
            read_options(&JsValue::UNDEFINED),
            Ok(FisheyeOptions::default())
        );
    }

    #[wasm_bindgen_test]
    fn non_plain_objects_are_rejected() {
        let rejected = [
            JsValue::NULL,
            JsValue::from_f64(3.0),
            JsValue::from_str("steps"),
            Array::new().into(),
            Function::new_no_args("").into(),
            Date::new_0().into(),
        ];
        for value in &rejected {
            assert_eq!(read_options(value), Err(OptionsError::NotAnObject));
        }
    }

    #[wasm_bindgen_test]
    fn plain_object_keys_are_read() {
        let bag = Object::new();
        Reflect::set(&bag, &"minWidth".into(), &JsValue::from_f64(20.0)).unwrap();
        Reflect::set(&bag, &"speed".into(), &JsValue::from_f64(7.6)).unwrap();
        Reflect::set(&bag, &"cellClass".into(), &"tile".into()).unwrap();
        Reflect::set(&bag, &"steps".into(), &"many".into()).unwrap();

        let opts = read_options(&bag.into()).unwrap();
        assert_eq!(opts.min_width, 20);
        assert_eq!(opts.speed_ms, 8);
        assert_eq!(opts.cell_class, "tile");
        assert_eq!(opts.steps, FisheyeOptions::default().steps);
    }

    #[wasm_bindgen_test]
    fn null_prototype_objects_are_plain() {
        let bag = Object::create(JsValue::NULL.unchecked_ref());
        assert!(read_options(&bag.into()).is_ok());
    }
}
