use {
    flowcontrol::ta_return,
    gloo::events::EventListener,
    rooting::set_root_non_dom,
    shared::{
        bridge::NotificationBridge,
        log::Log,
    },
    std::rc::Rc,
    wasm::{
        firebase::{
            import_sdk,
            sdk_urls,
            FirebaseBackend,
        },
        js::{
            js_err_string,
            ConsoleLog,
            LogJsErr,
        },
        params::WorkerParams,
        surface::RegistrationSurface,
    },
    wasm_bindgen::JsCast,
    wasm_bindgen_futures::{
        spawn_local,
        JsFuture,
    },
    web_sys::{
        ExtendableEvent,
        ServiceWorkerGlobalScope,
    },
};

struct Root {
    _listeners: Vec<EventListener>,
    _bridge: NotificationBridge<FirebaseBackend, RegistrationSurface>,
}

fn start(log: &Rc<dyn Log>) -> Result<Root, String> {
    let self_ =
        js_sys::global()
            .dyn_into::<ServiceWorkerGlobalScope>()
            .map_err(|_| "Global scope is not a service worker scope".to_string())?;
    let params = WorkerParams::parse(&self_.location().search()).map_err(|e| e.to_string())?;
    let settings = params.bridge_settings().map_err(|e| e.to_string())?;
    let mut listeners = vec![];
    listeners.push(EventListener::new(&self_, "install", {
        let self_ = self_.clone();
        let log = log.clone();
        move |_ev| {
            let self_ = self_.clone();
            let log = log.clone();
            spawn_local(async move {
                match async {
                    ta_return!((), String);
                    let f1 =
                        self_
                            .skip_waiting()
                            .map_err(
                                |e| format!(
                                    "Error skipping waiting for service worker installation: {}",
                                    js_err_string(&e)
                                ),
                            )?;
                    JsFuture::from(f1)
                        .await
                        .map_err(|e| format!("Error completing skip_waiting call: {}", js_err_string(&e)))?;
                    return Ok(());
                }.await {
                    Ok(_) => { },
                    Err(e) => {
                        log.log(&e);
                    },
                }
            });
        }
    }));
    listeners.push(EventListener::new(&self_, "activate", {
        let self_ = self_.clone();
        let log = log.clone();
        move |ev| {
            let Some(ev) = ev.dyn_ref::<ExtendableEvent>() else {
                return;
            };
            ev.wait_until(&self_.clients().claim()).log(&log, "Error claiming clients on activation");
        }
    }));

    // Subscribe to background messages
    import_sdk(&self_, &sdk_urls(params.sdk_version())).map_err(|e| e.to_string())?;
    let mut bridge =
        NotificationBridge::new(FirebaseBackend::default(), RegistrationSurface {
            registration: self_.registration(),
            log: log.clone(),
            propagate: settings.propagates_errors(),
        }, settings, log.clone());
    bridge.initialize(&params.firebase).map_err(|e| e.to_string())?;
    bridge.on_background_message().map_err(|e| e.to_string())?;
    return Ok(Root {
        _listeners: listeners,
        _bridge: bridge,
    });
}

fn main() {
    console_error_panic_hook::set_once();
    let log: Rc<dyn Log> = Rc::new(ConsoleLog);
    match start(&log) {
        Ok(root) => {
            log.log("Notification service worker listening for background messages");
            set_root_non_dom(root);
        },
        Err(e) => {
            log.log(&format!("Notification service worker not started: {}", e));
        },
    }
}
