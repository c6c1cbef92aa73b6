use {
    crate::js::js_err_string,
    gloo::utils::format::JsValueSerdeExt,
    js_sys::Promise,
    shared::{
        bridge::NotificationSurface,
        error::DisplayError,
        interface::wire::push::DisplayRequest,
        log::Log,
    },
    std::rc::Rc,
    wasm_bindgen::{
        JsCast,
        JsValue,
    },
    wasm_bindgen_futures::{
        future_to_promise,
        JsFuture,
    },
    web_sys::{
        NotificationOptions,
        ServiceWorkerRegistration,
    },
};

pub fn notification_options(request: &DisplayRequest) -> Result<NotificationOptions, DisplayError> {
    return Ok(
        <JsValue as JsValueSerdeExt>::from_serde(
            request,
        )
            .map_err(|e| DisplayError(format!("Error converting notification options to js value: {}", e)))?
            .unchecked_into::<NotificationOptions>(),
    );
}

/// Wrap a pending display so a late rejection is handled like a synchronous
/// one: logged, and only rethrown when `propagate` is set.
pub fn settle_display(pending: Promise, log: Rc<dyn Log>, propagate: bool) -> Promise {
    return future_to_promise(async move {
        match JsFuture::from(pending).await {
            Ok(v) => return Ok(v),
            Err(e) => {
                let e = DisplayError(js_err_string(&e));
                log.log(&e.to_string());
                if propagate {
                    return Err(js_sys::Error::new(&e.to_string()).into());
                }
                return Ok(JsValue::UNDEFINED);
            },
        }
    });
}

/// Shows notifications through the worker's registration.
pub struct RegistrationSurface {
    pub registration: ServiceWorkerRegistration,
    pub log: Rc<dyn Log>,
    pub propagate: bool,
}

impl NotificationSurface for RegistrationSurface {
    type Pending = Promise;

    fn show_notification(&self, request: &DisplayRequest) -> Result<Promise, DisplayError> {
        let pending =
            self
                .registration
                .show_notification_with_options(&request.title, &notification_options(request)?)
                .map_err(|e| DisplayError(js_err_string(&e)))?;
        return Ok(settle_display(pending, self.log.clone(), self.propagate));
    }
}
