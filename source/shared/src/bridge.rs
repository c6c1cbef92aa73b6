//! Wires a messaging client to the notification surface.
//!
//! The bridge goes `uninitialized -> initialized -> listening` and holds the
//! client handle itself; nothing is kept in module globals.  The platform sides
//! are behind `MessagingBackend` (client setup, background message
//! subscription) and `NotificationSurface` (showing notifications).
use {
    crate::{
        error::{
            BridgeError,
            ConfigurationError,
            DisplayError,
        },
        interface::{
            config::{
                BridgeSettings,
                FirebaseConfig,
                MalformedPayloadPolicy,
            },
            wire::push::{
                display_request,
                DisplayRequest,
                PushPayload,
            },
        },
        log::Log,
    },
    std::rc::Rc,
};

pub type BackgroundHandler<P> = Box<dyn FnMut(serde_json::Value) -> Result<Option<P>, BridgeError>>;

pub trait MessagingBackend {
    type Client;

    /// Completion handle of a display request, returned to the host.
    type Pending;

    fn initialize_app(&self, config: &FirebaseConfig) -> Result<Self::Client, ConfigurationError>;
    fn on_background_message(
        &self,
        client: &Self::Client,
        handler: BackgroundHandler<Self::Pending>,
    ) -> Result<(), ConfigurationError>;
}

pub trait NotificationSurface {
    type Pending;

    fn show_notification(&self, request: &DisplayRequest) -> Result<Self::Pending, DisplayError>;
}

pub struct NotificationBridge<B: MessagingBackend, S: NotificationSurface<Pending = B::Pending>> {
    backend: B,
    surface: Rc<S>,
    settings: Rc<BridgeSettings>,
    log: Rc<dyn Log>,
    client: Option<(FirebaseConfig, B::Client)>,
    listening: bool,
}

impl<
    B: MessagingBackend,
    S: 'static + NotificationSurface<Pending = B::Pending>,
> NotificationBridge<B, S> where B::Pending: 'static {
    pub fn new(backend: B, surface: S, settings: BridgeSettings, log: Rc<dyn Log>) -> Self {
        return NotificationBridge {
            backend,
            surface: Rc::new(surface),
            settings: Rc::new(settings),
            log,
            client: None,
            listening: false,
        };
    }

    pub fn backend(&self) -> &B {
        return &self.backend;
    }

    pub fn is_listening(&self) -> bool {
        return self.listening;
    }

    /// Set up the messaging client.  Repeating with the same config returns the
    /// existing client.
    pub fn initialize(&mut self, config: &FirebaseConfig) -> Result<&B::Client, ConfigurationError> {
        match &mut self.client {
            Some((current, client)) => {
                if current != config {
                    return Err(ConfigurationError::AlreadyInitialized);
                }
                self
                    .log
                    .log(&format!("Messaging client for project [{}] already initialized", config.project_id));
                return Ok(&*client);
            },
            slot @ None => {
                let client = self.backend.initialize_app(config)?;
                self.log.log(&format!("Initialized messaging client for project [{}]", config.project_id));
                let (_, client) = slot.insert((config.clone(), client));
                return Ok(&*client);
            },
        }
    }

    /// Subscribe `handle_background_message` to background messages.  Only the
    /// first call registers anything.
    pub fn on_background_message(&mut self) -> Result<(), ConfigurationError> {
        let Some((_, client)) = &self.client else {
            return Err(ConfigurationError::NotInitialized);
        };
        if self.listening {
            self.log.log("Background message listener already registered");
            return Ok(());
        }
        self.backend.on_background_message(client, Box::new({
            let surface = self.surface.clone();
            let settings = self.settings.clone();
            let log = self.log.clone();
            move |payload: serde_json::Value| {
                return handle_background_message(surface.as_ref(), &settings, log.as_ref(), payload);
            }
        }))?;
        self.listening = true;
        return Ok(());
    }
}

/// Turn one background message into a display request and issue it.
///
/// `Ok(None)` means nothing was shown and the failure (if any) was logged per
/// the settings.
pub fn handle_background_message<S: NotificationSurface + ?Sized>(
    surface: &S,
    settings: &BridgeSettings,
    log: &dyn Log,
    raw: serde_json::Value,
) -> Result<Option<S::Pending>, BridgeError> {
    log.log(&format!("Background message received: {}", raw));
    let decoded = PushPayload::decode(raw);
    let label = match &decoded {
        Ok(p) => p.label(),
        Err(_) => "[undecodable]".to_string(),
    };
    let request = match decoded.as_ref().map_err(|e| e.clone()).and_then(|p| display_request(p, &settings.assets)) {
        Ok(r) => r,
        Err(e) => match &settings.on_malformed {
            MalformedPayloadPolicy::Suppress => {
                log.log(&format!("Dropping background message {}: {}", label, e));
                return Ok(None);
            },
            MalformedPayloadPolicy::Propagate => {
                return Err(e.into());
            },
            MalformedPayloadPolicy::Fallback { title, body } => {
                log.log(&format!("Showing fallback notification for background message {}: {}", label, e));
                fallback_request(decoded.ok(), settings, title, body)
            },
        },
    };
    match surface.show_notification(&request) {
        Ok(p) => return Ok(Some(p)),
        Err(e) => {
            if settings.propagates_errors() {
                return Err(e.into());
            }
            log.log(&format!("Background message {}: {}", label, e));
            return Ok(None);
        },
    }
}

fn fallback_request(
    payload: Option<PushPayload>,
    settings: &BridgeSettings,
    title: &str,
    body: &str,
) -> DisplayRequest {
    return DisplayRequest {
        title: title.to_string(),
        body: body.to_string(),
        icon: settings.assets.icon.clone(),
        badge: settings.assets.badge.clone(),
        data: payload.and_then(|p| p.data),
    };
}
