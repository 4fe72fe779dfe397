//! `wasm-bindgen` entry points and the animation-frame driver
//!
//! Only compiled on `wasm32` targets.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use kalaa_fire::{FIRE_CANVAS_ID, FireConfig, FireEnvironment, FireHost, SurfaceSize};
use log::{LevelFilter, debug, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::canvas::CanvasSurface;
use crate::console;
use crate::runner::{AnimationFrameScheduler, FrameRequests, seed_from_units, viewport_size};

/// Event fired by Astro after a client-side navigation swaps the page
const PAGE_LOAD_EVENT: &str = "astro:page-load";

/// The browser window as seen by a [`FireHost`]
struct BrowserPage {
    window: Window,
    document: Document,
    requests: FrameRequests,
}

impl FireEnvironment for BrowserPage {
    type Surface = CanvasSurface;
    type Scheduler = AnimationFrameScheduler;
    type Rng = StdRng;

    fn locate_surface(&mut self, id: &str) -> Option<CanvasSurface> {
        CanvasSurface::find(&self.document, id)
    }

    fn viewport(&self) -> SurfaceSize {
        viewport_size(
            self.window.inner_width().ok().and_then(|v| v.as_f64()),
            self.window.inner_height().ok().and_then(|v| v.as_f64()),
        )
    }

    fn scheduler(&mut self) -> AnimationFrameScheduler {
        self.requests.scheduler()
    }

    fn rng(&mut self) -> StdRng {
        StdRng::seed_from_u64(seed_from_units(
            js_sys::Math::random(),
            js_sys::Math::random(),
        ))
    }
}

type FrameCallback = Closure<dyn FnMut(f64)>;

/// One host plus the `requestAnimationFrame` chain that drives it
struct FireLoop {
    host: RefCell<FireHost<BrowserPage>>,
    window: Window,
    requests: FrameRequests,
    /// A browser frame callback is outstanding
    scheduled: Cell<bool>,
    callback: RefCell<Option<FrameCallback>>,
}

impl FireLoop {
    fn new(window: Window, document: Document, surface_id: &str) -> Rc<Self> {
        let requests = FrameRequests::new();
        let page = BrowserPage {
            window: window.clone(),
            document,
            requests: requests.clone(),
        };
        let host = FireHost::with_surface_id(page, FireConfig::default(), surface_id);

        let this = Rc::new(Self {
            host: RefCell::new(host),
            window,
            requests,
            scheduled: Cell::new(false),
            callback: RefCell::new(None),
        });

        let weak: Weak<Self> = Rc::downgrade(&this);
        let callback = Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
            if let Some(fire) = weak.upgrade() {
                fire.on_frame(timestamp);
            }
        });
        *this.callback.borrow_mut() = Some(callback);
        this
    }

    /// Build a fresh engine for the current page and start its frames
    fn restart(&self) -> bool {
        let started = self.host.borrow_mut().page_load();
        self.pump();
        started
    }

    fn resize(&self) {
        self.host.borrow_mut().viewport_resized();
    }

    fn stop(&self) {
        self.host.borrow_mut().detach();
        self.requests.take();
    }

    fn on_frame(&self, timestamp: f64) {
        self.scheduled.set(false);
        {
            let mut host = self.host.borrow_mut();
            let canvas_gone = host
                .engine()
                .is_some_and(|engine| !engine.surface().is_connected());
            if canvas_gone {
                debug!("Fire canvas left the page, detaching");
                host.detach();
                self.requests.take();
                return;
            }
            host.animation_frame(timestamp);
        }
        self.pump();
    }

    /// Forward an engine's frame request to the browser
    fn pump(&self) {
        if self.scheduled.get() || !self.requests.take() {
            return;
        }
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(_) => self.scheduled.set(true),
            Err(err) => warn!("requestAnimationFrame failed: {err:?}"),
        }
    }
}

/// Handle on a fire effect driven by animation frames
///
/// The module starts one automatically for `#fire-canvas`; pages can create
/// more for other canvases.
#[wasm_bindgen]
pub struct FireAnimation {
    inner: Rc<FireLoop>,
}

#[wasm_bindgen]
impl FireAnimation {
    /// Attach to the canvas with `canvas_id` (default `fire-canvas`)
    ///
    /// Stays idle when the canvas does not exist; call `restart` once it does.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: Option<String>) -> Result<FireAnimation, JsValue> {
        console::install(LevelFilter::Warn);
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let id = canvas_id.unwrap_or_else(|| FIRE_CANVAS_ID.to_string());
        let inner = FireLoop::new(window, document, &id);
        inner.restart();
        Ok(Self { inner })
    }

    /// Replace the engine with a fresh one; returns whether a canvas was found
    pub fn restart(&self) -> bool {
        self.inner.restart()
    }

    /// Resize the canvas to the window
    pub fn resize(&self) {
        self.inner.resize();
    }

    /// Drop the engine; the canvas keeps its last frame
    pub fn stop(&self) {
        self.inner.stop();
    }

    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.inner.host.borrow().is_active()
    }

    #[wasm_bindgen(js_name = emberCount)]
    pub fn ember_count(&self) -> usize {
        self.inner
            .host
            .borrow()
            .engine()
            .map_or(0, |engine| engine.ember_count())
    }

    /// Frames run by the current engine
    #[wasm_bindgen(js_name = frameIdx)]
    pub fn frame_idx(&self) -> u64 {
        self.inner
            .host
            .borrow()
            .engine()
            .map_or(0, |engine| engine.frame_index())
    }
}

fn listen(target: &web_sys::EventTarget, event: &str, fire: &Rc<FireLoop>, action: fn(&FireLoop)) {
    let fire = Rc::clone(fire);
    let listener = Closure::<dyn FnMut()>::new(move || action(&fire));
    if let Err(err) = target.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref()) {
        warn!("Could not listen for {event}: {err:?}");
    }
    // Listeners live as long as the page
    listener.forget();
}

/// Module entry: wire the site canvas to the page lifecycle
#[wasm_bindgen(start)]
pub fn wasm_start() {
    console::install(LevelFilter::Warn);

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let fire = FireLoop::new(window.clone(), document.clone(), FIRE_CANVAS_ID);

    let restart = |fire: &FireLoop| {
        fire.restart();
    };
    listen(&document, "DOMContentLoaded", &fire, restart);
    listen(&document, PAGE_LOAD_EVENT, &fire, restart);
    listen(&window, "resize", &fire, FireLoop::resize);

    // Module scripts may run after DOMContentLoaded already fired
    if document.ready_state() != "loading" {
        fire.restart();
    }
}
