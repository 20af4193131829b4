use wasm_bindgen::prelude::*;
use worldgen::{GenerateError, LoadError, ParamsError};

use crate::interop::{new_obj, set_kv};

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn invalid_id(kind: &str, id: u32) -> JsValue {
    let d = new_obj();
    set_kv(&d, "kind", &JsValue::from_str(kind));
    set_kv(&d, "id", &JsValue::from_f64(id as f64));
    err("invalid_id", format!("invalid {} id", kind), Some(d.into()))
}

pub fn invalid_json(e: &LoadError) -> JsValue {
    err("invalid_json", e.to_string(), None)
}

pub fn invalid_params(e: &ParamsError) -> JsValue {
    let d = new_obj();
    let param = match e {
        ParamsError::NonFinite(name) => name,
        ParamsError::NotPositive { name, .. }
        | ParamsError::Negative { name, .. }
        | ParamsError::TooSmall { name, .. } => name,
    };
    set_kv(&d, "param", &JsValue::from_str(param));
    err("invalid_params", e.to_string(), Some(d.into()))
}

pub fn generate_failed(e: &GenerateError) -> JsValue {
    match e {
        GenerateError::Params(p) => invalid_params(p),
        _ => err("generate_failed", e.to_string(), None),
    }
}

pub fn unknown_marking(name: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "type", &JsValue::from_str(name));
    err("invalid_params", format!("unknown marking type '{}'", name), Some(d.into()))
}
