//! Bindings to the Firebase compat SDK (`firebase-app-compat.js`,
//! `firebase-messaging-compat.js`) as loaded into a worker by `importScripts`.
use {
    crate::js::js_err_string,
    gloo::utils::format::JsValueSerdeExt,
    js_sys::{
        Function,
        Promise,
        Reflect,
    },
    shared::{
        bridge::{
            BackgroundHandler,
            MessagingBackend,
        },
        error::ConfigurationError,
        interface::config::FirebaseConfig,
    },
    std::cell::RefCell,
    wasm_bindgen::{
        prelude::{
            wasm_bindgen,
            Closure,
        },
        JsCast,
        JsValue,
    },
    web_sys::WorkerGlobalScope,
};

pub const DEFAULT_SDK_VERSION: &str = "11.5.0";

#[wasm_bindgen]
extern "C" {
    pub type FirebaseMessaging;

    #[wasm_bindgen(catch, js_namespace = firebase, js_name = initializeApp)]
    fn firebase_initialize_app(options: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = firebase, js_name = messaging)]
    fn firebase_messaging(app: &JsValue) -> Result<FirebaseMessaging, JsValue>;

    #[wasm_bindgen(catch, method, js_name = onBackgroundMessage)]
    fn on_background_message(this: &FirebaseMessaging, handler: &Function) -> Result<JsValue, JsValue>;
}

pub fn sdk_urls(version: &str) -> Vec<String> {
    return vec![
        format!("https://www.gstatic.com/firebasejs/{}/firebase-app-compat.js", version),
        format!("https://www.gstatic.com/firebasejs/{}/firebase-messaging-compat.js", version)
    ];
}

/// Load the SDK scripts unless a loader already did.  Workers only allow this
/// during the initial script evaluation.
pub fn import_sdk(scope: &WorkerGlobalScope, urls: &[String]) -> Result<(), ConfigurationError> {
    if Reflect::has(scope, &JsValue::from_str("firebase")).unwrap_or(false) {
        return Ok(());
    }
    for url in urls {
        scope
            .import_scripts_1(url)
            .map_err(|e| ConfigurationError::Platform(format!("Error importing [{}]: {}", url, js_err_string(&e))))?;
    }
    return Ok(());
}

pub struct FirebaseClient {
    pub app: JsValue,
    pub messaging: FirebaseMessaging,
}

type JsHandler = Closure<dyn FnMut(JsValue) -> Result<JsValue, JsValue>>;

/// Keeps registered handler closures alive as long as the backend.
#[derive(Default)]
pub struct FirebaseBackend {
    handlers: RefCell<Vec<JsHandler>>,
}

impl MessagingBackend for FirebaseBackend {
    type Client = FirebaseClient;
    type Pending = Promise;

    fn initialize_app(&self, config: &FirebaseConfig) -> Result<FirebaseClient, ConfigurationError> {
        let options =
            <JsValue as JsValueSerdeExt>::from_serde(
                config,
            ).map_err(|e| ConfigurationError::Platform(format!("Error converting config to js value: {}", e)))?;
        let app =
            firebase_initialize_app(
                &options,
            ).map_err(|e| ConfigurationError::Platform(format!("Error initializing app: {}", js_err_string(&e))))?;
        let messaging =
            firebase_messaging(
                &app,
            ).map_err(
                |e| ConfigurationError::Platform(format!("Error creating messaging client: {}", js_err_string(&e))),
            )?;
        return Ok(FirebaseClient {
            app,
            messaging,
        });
    }

    fn on_background_message(
        &self,
        client: &FirebaseClient,
        mut handler: BackgroundHandler<Promise>,
    ) -> Result<(), ConfigurationError> {
        let closure = JsHandler::new(move |payload: JsValue| {
            // Undecodable payloads still reach the handler so the configured policy applies
            let payload = payload.into_serde::<serde_json::Value>().unwrap_or(serde_json::Value::Null);
            match handler(payload) {
                Ok(Some(pending)) => return Ok(pending.into()),
                Ok(None) => return Ok(JsValue::UNDEFINED),
                Err(e) => return Err(js_sys::Error::new(&e.to_string()).into()),
            }
        });
        client
            .messaging
            .on_background_message(closure.as_ref().unchecked_ref())
            .map_err(
                |e| ConfigurationError::Platform(
                    format!("Error registering background message handler: {}", js_err_string(&e)),
                ),
            )?;
        self.handlers.borrow_mut().push(closure);
        return Ok(());
    }
}
