//! JavaScript-facing player component

use super::adapter::{Dispatch, HtmlMediaAdapter};
use crate::config::PlayerConfig;
use crate::confirm::ShuffleConfirmation;
use crate::error::PlaybackError;
use crate::session::PlaybackSession;
use crate::types::SeekTarget;
use crate::view::project;
use js_sys::{Function, Promise};
use plvylist_core::{Catalog, CatalogLoadError, CatalogSource, MediaTag, TrackRecord};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use tracing::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys::{Element, HtmlMediaElement, Response};

const SHUFFLE_PROMPT: &str = "This will stop your current track and start you over fresh, okay?";

struct Inner {
    session: PlaybackSession<HtmlMediaAdapter>,
    dispatch: Rc<Dispatch>,
    on_change: Option<Function>,
}

impl Inner {
    /// Feed queued adapter events to the session, then tell the host
    fn pump(&mut self) {
        while let Some(event) = self.dispatch.pop() {
            self.session.handle_event(event);
        }

        if let Some(ref cb) = self.on_change {
            cb.call0(&JsValue::NULL).ok();
        }
    }
}

/// Asks through `window.confirm`
struct WindowConfirm;

impl ShuffleConfirmation for WindowConfirm {
    fn confirm_shuffle(&mut self) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(SHUFFLE_PROMPT).ok())
            .unwrap_or(false)
    }
}

/// Player component for JavaScript hosts
///
/// Wraps a [`PlaybackSession`] driving the given `<audio>` element. The host
/// renders `view()` whenever the `onChange` callback fires and may forward
/// `drainEvents()` to the platform media session.
#[wasm_bindgen]
pub struct WasmPlvylist {
    inner: Rc<RefCell<Inner>>,
    generation: Rc<Cell<u64>>,
}

#[wasm_bindgen]
impl WasmPlvylist {
    /// Create a player around `element`
    ///
    /// `attributes` is an optional object of attribute name to string value,
    /// e.g. `{ file: "./tracks.json", "starting-volume": "0.75" }`.
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlMediaElement, attributes: JsValue) -> Result<WasmPlvylist, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let config = if attributes.is_undefined() || attributes.is_null() {
            PlayerConfig::default()
        } else {
            let pairs: BTreeMap<String, String> = serde_wasm_bindgen::from_value(attributes)
                .map_err(|e| JsValue::from_str(&format!("Invalid attributes: {e}")))?;
            PlayerConfig::from_attributes(pairs).map_err(to_js)?
        };

        let dispatch = Rc::new(Dispatch::default());
        let adapter = HtmlMediaAdapter::new(element, Rc::clone(&dispatch));

        let inner = Rc::new(RefCell::new(Inner {
            session: PlaybackSession::new(adapter, config),
            dispatch: Rc::clone(&dispatch),
            on_change: None,
        }));

        let weak: Weak<RefCell<Inner>> = Rc::downgrade(&inner);
        dispatch.set_drain(Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            // Already borrowed: the holder drains before releasing
            if let Ok(mut inner) = inner.try_borrow_mut() {
                inner.pump();
            }
        }));

        Ok(Self {
            inner,
            generation: Rc::new(Cell::new(0)),
        })
    }

    // ===== Transport =====

    #[wasm_bindgen(js_name = playOrPause)]
    pub fn play_or_pause(&self) -> Result<(), JsValue> {
        self.command(|s| s.play_or_pause())
    }

    pub fn previous(&self) -> Result<(), JsValue> {
        self.command(|s| s.previous())
    }

    pub fn next(&self) -> Result<(), JsValue> {
        self.command(|s| s.next())
    }

    #[wasm_bindgen(js_name = selectTrack)]
    pub fn select_track(&self, index: usize) -> Result<(), JsValue> {
        self.command(|s| s.select_track(index))
    }

    /// Track-list row clicked
    #[wasm_bindgen(js_name = activateRow)]
    pub fn activate_row(&self, index: usize) -> Result<(), JsValue> {
        self.command(|s| s.activate_row(index))
    }

    pub fn reset(&self) {
        self.update(|s| s.reset());
    }

    // ===== Seeking =====

    /// Seek bar `input` event, `ratio` in `[0, 1]`
    #[wasm_bindgen(js_name = seekPreview)]
    pub fn seek_preview(&self, ratio: f64) -> Result<(), JsValue> {
        self.command(|s| s.seek_preview(SeekTarget::Ratio(ratio)))
    }

    /// Seek bar `change` event, `ratio` in `[0, 1]`
    #[wasm_bindgen(js_name = seekCommit)]
    pub fn seek_commit(&self, ratio: f64) -> Result<(), JsValue> {
        self.command(|s| s.seek_commit(SeekTarget::Ratio(ratio)))
    }

    /// Absolute seek, for media-session `seekto`
    #[wasm_bindgen(js_name = seekTo)]
    pub fn seek_to(&self, seconds: f64) -> Result<(), JsValue> {
        self.command(|s| s.seek_commit(SeekTarget::Seconds(seconds)))
    }

    #[wasm_bindgen(js_name = skipForward)]
    pub fn skip_forward(&self) -> Result<(), JsValue> {
        self.command(|s| s.skip_forward())
    }

    #[wasm_bindgen(js_name = skipBackward)]
    pub fn skip_backward(&self) -> Result<(), JsValue> {
        self.command(|s| s.skip_backward())
    }

    // ===== Volume / loop / shuffle =====

    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, level: f64) {
        self.update(|s| s.set_volume(level));
    }

    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&self) {
        self.update(|s| s.toggle_mute());
    }

    #[wasm_bindgen(js_name = toggleLoop)]
    pub fn toggle_loop(&self) {
        self.update(|s| s.toggle_loop());
    }

    /// Confirm with the user, then shuffle and restart
    ///
    /// Resolves to `false` when the user declined.
    pub fn shuffle(&self) -> Result<bool, JsValue> {
        self.command(|s| s.shuffle_and_restart(&mut WindowConfirm))
    }

    // ===== Catalog =====

    /// Install a catalog from a JSON document string
    #[wasm_bindgen(js_name = loadCatalogJson)]
    pub fn load_catalog_json(&self, json: &str) {
        self.bump_generation();
        let result = Catalog::from_json(json);
        self.install(result);
    }

    /// Install a catalog from an array of track objects
    #[wasm_bindgen(js_name = setTracks)]
    pub fn set_tracks(&self, tracks: JsValue) {
        self.bump_generation();
        let result = serde_wasm_bindgen::from_value::<Vec<TrackRecord>>(tracks)
            .map_err(|e| CatalogLoadError::malformed(e.to_string()))
            .and_then(Catalog::new);
        self.install(result);
    }

    /// Install a catalog from `<audio>`/`<source>` tags under `root`
    #[wasm_bindgen(js_name = harvestMarkup)]
    pub fn harvest_markup(&self, root: &Element) -> Result<(), JsValue> {
        self.bump_generation();
        let tags = collect_media_tags(root)?;
        self.install(plvylist_core::harvest(&tags));
        Ok(())
    }

    /// Load from the first available source
    ///
    /// Inline `tracks` win over the configured `file` URI, which wins over
    /// markup under `root`. Returns a promise that settles once the catalog
    /// is installed or has failed.
    pub fn load(&self, tracks: JsValue, root: Option<Element>) -> Result<Promise, JsValue> {
        let inline = if tracks.is_undefined() || tracks.is_null() {
            None
        } else {
            Some(
                serde_wasm_bindgen::from_value::<Vec<TrackRecord>>(tracks)
                    .map_err(|e| JsValue::from_str(&format!("Invalid tracks: {e}")))?,
            )
        };

        let markup = match root {
            Some(root) => collect_media_tags(&root)?,
            None => Vec::new(),
        };

        let uri = self.inner.borrow().session.config().track_source.clone();

        let Some(source) = CatalogSource::resolve(inline, uri.as_deref(), markup) else {
            self.bump_generation();
            self.install(Err(CatalogLoadError::NoSource));
            return Ok(Promise::resolve(&JsValue::FALSE));
        };

        debug!(source = source.kind(), "Loading catalog");

        match source.into_local_catalog() {
            Ok(result) => {
                self.bump_generation();
                let ok = result.is_ok();
                self.install(result);
                Ok(Promise::resolve(&JsValue::from_bool(ok)))
            }
            Err(uri) => Ok(self.fetch_catalog(uri)),
        }
    }

    /// Fetch and install the catalog at `uri`
    ///
    /// A later load supersedes this one; a superseded fetch is dropped
    /// without touching the session and resolves to `false`.
    #[wasm_bindgen(js_name = fetchCatalog)]
    pub fn fetch_catalog(&self, uri: String) -> Promise {
        let generation = self.bump_generation();
        let current = Rc::clone(&self.generation);
        let inner = Rc::downgrade(&self.inner);

        future_to_promise(async move {
            let result = fetch_document(&uri).await;

            if current.get() != generation {
                debug!(uri = %uri, "Discarding superseded catalog fetch");
                return Ok(JsValue::FALSE);
            }

            let Some(inner) = inner.upgrade() else {
                return Ok(JsValue::FALSE);
            };

            let ok = result.is_ok();
            install_into(&inner, result);
            Ok(JsValue::from_bool(ok))
        })
    }

    // ===== View =====

    /// Current renderable view
    pub fn view(&self) -> Result<JsValue, JsValue> {
        let inner = self.inner.borrow();
        serde_wasm_bindgen::to_value(&project(&inner.session))
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Take queued session events
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&self) -> Result<JsValue, JsValue> {
        let events = self.inner.borrow_mut().session.drain_events();
        serde_wasm_bindgen::to_value(&events)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Register the re-render callback
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: Function) {
        self.inner.borrow_mut().on_change = Some(callback);
    }
}

impl WasmPlvylist {
    fn command<T>(
        &self,
        f: impl FnOnce(&mut PlaybackSession<HtmlMediaAdapter>) -> crate::Result<T>,
    ) -> Result<T, JsValue> {
        let mut inner = self.inner.borrow_mut();
        let result = f(&mut inner.session);
        inner.pump();
        result.map_err(to_js)
    }

    fn update(&self, f: impl FnOnce(&mut PlaybackSession<HtmlMediaAdapter>)) {
        let mut inner = self.inner.borrow_mut();
        f(&mut inner.session);
        inner.pump();
    }

    fn bump_generation(&self) -> u64 {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        next
    }

    fn install(&self, result: plvylist_core::Result<Catalog>) {
        install_into(&self.inner, result);
    }
}

fn install_into(inner: &RefCell<Inner>, result: plvylist_core::Result<Catalog>) {
    let mut inner = inner.borrow_mut();

    match result {
        Ok(catalog) => {
            info!(tracks = catalog.len(), "Catalog installed");
            inner.session.set_catalog(catalog);
        }
        Err(err) => inner.session.catalog_failed(err),
    }

    inner.pump();
}

fn to_js(err: PlaybackError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn collect_media_tags(root: &Element) -> Result<Vec<MediaTag>, JsValue> {
    let nodes = root.query_selector_all("audio, source")?;
    let mut tags = Vec::with_capacity(nodes.length() as usize);

    for i in 0..nodes.length() {
        let Some(element) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };

        let mut tag = MediaTag::new();
        for name in element.get_attribute_names().iter() {
            let Some(name) = name.as_string() else {
                continue;
            };
            if let Some(value) = element.get_attribute(&name) {
                tag.set_attribute(&name, value);
            }
        }
        tags.push(tag);
    }

    Ok(tags)
}

async fn fetch_document(uri: &str) -> plvylist_core::Result<Catalog> {
    let window = web_sys::window().ok_or_else(|| CatalogLoadError::network("no window"))?;

    let response = JsFuture::from(window.fetch_with_str(uri))
        .await
        .map_err(|e| CatalogLoadError::network(format!("{e:?}")))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| CatalogLoadError::network("fetch did not return a Response"))?;

    if !response.ok() {
        return Err(CatalogLoadError::Status {
            status: response.status(),
        });
    }

    let text = response
        .text()
        .map_err(|e| CatalogLoadError::network(format!("{e:?}")))?;
    let text = JsFuture::from(text)
        .await
        .map_err(|e| CatalogLoadError::network(format!("{e:?}")))?;

    let body = text
        .as_string()
        .ok_or_else(|| CatalogLoadError::malformed("response body is not text"))?;

    Catalog::from_json(&body)
}
