//! Ticket Printing
//!
//! The backend renders the printable HTML; we hand it to a fresh window.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlDocument;

pub const POPUP_BLOCKED: &str = "El navegador bloqueó la ventana emergente";

/// Paper width sent to the backend, in millimetres
pub const RECEIPT_WIDTH_MM: u32 = 80;

fn js_err(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

/// Open a blank window and write `html` into it
pub fn open_print_window(html: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "Ventana no disponible".to_string())?;
    let popup = window
        .open_with_url_and_target("", "_blank")
        .map_err(js_err)?
        .ok_or_else(|| POPUP_BLOCKED.to_string())?;
    let document = popup
        .document()
        .ok_or_else(|| POPUP_BLOCKED.to_string())?
        .dyn_into::<HtmlDocument>()
        .map_err(|_| "Documento de impresión no válido".to_string())?;

    document.open().map_err(js_err)?;
    document
        .write(&js_sys::Array::of1(&JsValue::from_str(html)))
        .map_err(js_err)?;
    document.close().map_err(js_err)?;
    Ok(())
}
