//! `MediaAdapter` over an `HTMLMediaElement`

use crate::adapter::{MediaAdapter, MediaEvent};
use crate::types::SourceId;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, HtmlMediaElement};

/// Queue between DOM listeners and the session
///
/// Listeners push events and ask for a drain. The drain callback is
/// installed by the component and skips silently when the session is
/// already borrowed; whoever holds the borrow drains the queue before
/// releasing it.
#[derive(Default)]
pub struct Dispatch {
    queue: RefCell<VecDeque<MediaEvent>>,
    drain: RefCell<Option<Box<dyn Fn()>>>,
}

impl Dispatch {
    pub fn push(&self, event: MediaEvent) {
        self.queue.borrow_mut().push_back(event);
        self.flush();
    }

    pub fn pop(&self) -> Option<MediaEvent> {
        self.queue.borrow_mut().pop_front()
    }

    pub fn set_drain(&self, drain: Box<dyn Fn()>) {
        *self.drain.borrow_mut() = Some(drain);
    }

    fn flush(&self) {
        if let Ok(drain) = self.drain.try_borrow() {
            if let Some(drain) = drain.as_ref() {
                drain();
            }
        }
    }
}

type Listener = Closure<dyn FnMut(Event)>;

/// Browser media adapter
///
/// Tags source-scoped DOM events with the id of the load that is current
/// when they fire. `emptied` reports the oldest replaced source.
pub struct HtmlMediaAdapter {
    element: HtmlMediaElement,
    dispatch: Rc<Dispatch>,
    current: Rc<Cell<Option<SourceId>>>,
    outgoing: Rc<RefCell<VecDeque<SourceId>>>,
    listeners: Vec<(&'static str, Listener)>,
}

impl HtmlMediaAdapter {
    /// Attach to `element` and start listening
    pub fn new(element: HtmlMediaElement, dispatch: Rc<Dispatch>) -> Self {
        let mut adapter = Self {
            element,
            dispatch,
            current: Rc::new(Cell::new(None)),
            outgoing: Rc::new(RefCell::new(VecDeque::new())),
            listeners: Vec::new(),
        };

        adapter.listen("loadedmetadata", |el, source, _| {
            source.map(|source| MediaEvent::Ready {
                source,
                duration: el.duration(),
            })
        });
        adapter.listen("timeupdate", |el, source, _| {
            source.map(|source| MediaEvent::TimeAdvanced {
                source,
                position: el.current_time(),
            })
        });
        adapter.listen("ended", |_, source, _| {
            source.map(|source| MediaEvent::Ended { source })
        });
        adapter.listen("emptied", |_, _, outgoing| {
            outgoing
                .borrow_mut()
                .pop_front()
                .map(|source| MediaEvent::SourceCleared { source })
        });
        adapter.listen("volumechange", |el, _, _| {
            Some(MediaEvent::VolumeChanged {
                level: el.volume(),
                muted: el.muted(),
            })
        });
        adapter.listen("play", |_, _, _| {
            Some(MediaEvent::PlayStateChanged { playing: true })
        });
        adapter.listen("pause", |_, _, _| {
            Some(MediaEvent::PlayStateChanged { playing: false })
        });

        adapter
    }

    fn listen<F>(&mut self, name: &'static str, translate: F)
    where
        F: Fn(&HtmlMediaElement, Option<SourceId>, &RefCell<VecDeque<SourceId>>) -> Option<MediaEvent>
            + 'static,
    {
        let element = self.element.clone();
        let dispatch = Rc::clone(&self.dispatch);
        let current = Rc::clone(&self.current);
        let outgoing = Rc::clone(&self.outgoing);

        let listener = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            if let Some(event) = translate(&element, current.get(), &outgoing) {
                dispatch.push(event);
            }
        });

        if let Err(err) = self
            .element
            .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
        {
            warn!(event = name, error = ?err, "Could not attach media listener");
            return;
        }

        self.listeners.push((name, listener));
    }

    fn retire_current(&self) {
        // Swapping the source pauses a playing element without a `pause` event
        if !self.element.paused() {
            self.dispatch
                .push(MediaEvent::PlayStateChanged { playing: false });
        }

        if let Some(previous) = self.current.take() {
            self.outgoing.borrow_mut().push_back(previous);
        }
    }
}

impl MediaAdapter for HtmlMediaAdapter {
    fn load(&mut self, source: SourceId, uri: &str) {
        self.retire_current();
        self.current.set(Some(source));
        self.element.set_src(uri);
    }

    fn unload(&mut self) {
        self.retire_current();

        if let Err(err) = self.element.remove_attribute("src") {
            warn!(error = ?err, "Could not clear media source");
        }
        self.element.load();
    }

    fn play(&mut self) {
        let Some(source) = self.current.get() else {
            debug!("Play requested with no source loaded");
            return;
        };

        let promise = match self.element.play() {
            Ok(promise) => promise,
            Err(err) => {
                self.dispatch.push(MediaEvent::PlayRejected {
                    source,
                    reason: describe(&err),
                });
                return;
            }
        };

        // Settles after any later load, so keep the id it was issued for
        let dispatch = Rc::clone(&self.dispatch);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                debug!(%source, "Play promise rejected");
                dispatch.push(MediaEvent::PlayRejected {
                    source,
                    reason: describe(&err),
                });
            }
        });
    }

    fn pause(&mut self) {
        if let Err(err) = self.element.pause() {
            warn!(error = ?err, "Pause failed");
        }
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn volume(&self) -> f64 {
        self.element.volume()
    }

    fn set_volume(&mut self, level: f64) {
        self.element.set_volume(level);
    }

    fn muted(&self) -> bool {
        self.element.muted()
    }

    fn set_muted(&mut self, muted: bool) {
        self.element.set_muted(muted);
    }

    fn looping(&self) -> bool {
        self.element.loop_()
    }

    fn set_looping(&mut self, looping: bool) {
        self.element.set_loop(looping);
    }
}

impl Drop for HtmlMediaAdapter {
    fn drop(&mut self) {
        for (name, listener) in self.listeners.drain(..) {
            self.element
                .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
                .ok();
        }
    }
}

/// Best-effort message from a rejected promise (usually a `DOMException`)
fn describe(err: &wasm_bindgen::JsValue) -> String {
    if let Some(message) = err.as_string() {
        return message;
    }

    js_sys::Reflect::get(err, &"message".into())
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| "play() was rejected".to_string())
}
