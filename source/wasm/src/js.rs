use {
    shared::log::Log,
    std::rc::Rc,
    wasm_bindgen::{
        JsCast,
        JsValue,
    },
    web_sys::console,
};

/// Best effort text of a thrown js value.
pub fn js_err_string(e: &JsValue) -> String {
    if let Some(e) = e.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    if let Some(s) = e.as_string() {
        return s;
    }
    return format!("{:?}", e);
}

pub struct ConsoleLog;

impl Log for ConsoleLog {
    fn log(&self, message: &str) {
        console::log_1(&JsValue::from(message));
    }
}

pub trait LogJsErr {
    fn log(self, log: &Rc<dyn Log>, message: &str);
}

impl<T> LogJsErr for Result<T, JsValue> {
    fn log(self, log: &Rc<dyn Log>, message: &str) {
        match self {
            Ok(_) => { },
            Err(e) => {
                log.log(&format!("{}: {}", message, js_err_string(&e)));
            },
        }
    }
}
