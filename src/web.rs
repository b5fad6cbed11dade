// Wires the page's DOM to the pure Rust pieces: the particle background, the
// stats counters and the scroll chrome. Navigation and the contact form live in
// page.rs. Every element is optional; a missing one just means that feature is
// not on this page.

use crate::animator::{ Animator, ResizeWake, Viewport };
use crate::config::FieldConfig;
use crate::counter::{ self, CounterAnimation };
use crate::page;
use crate::renderer::CanvasRenderer;
use crate::scroll::ScrollChrome;
use crate::utils::Timer;
use rand::rngs::ThreadRng;
use std::cell::{ Cell, RefCell };
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlCanvasElement, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, NodeList, Window,
};

const PARTICLE_CANVAS_ID: &str = "particleCanvas";
const STATS_SECTION_ID: &str = "statsSection";
const STAT_NUMBER_SELECTOR: &str = ".stat-number[data-count]";
const STATS_VISIBLE_THRESHOLD: f64 = 0.4;

type PageAnimator = Animator<CanvasRenderer, ThreadRng>;

pub fn start() -> Result<(), JsValue> {
    let window = window()?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document on window"))?;

    if let Err(e) = start_scroll_chrome(&window, &document) {
        log_error!("scroll chrome setup failed: {:?}", e);
    }
    if let Err(e) = page::start_nav_highlight(&document) {
        log_error!("nav highlight setup failed: {:?}", e);
    }
    if let Err(e) = page::start_mobile_menu(&document) {
        log_error!("mobile menu setup failed: {:?}", e);
    }
    if let Err(e) = start_particles(&window, &document) {
        log_error!("particle background setup failed: {:?}", e);
    }
    if let Err(e) = start_counters(&document) {
        log_error!("counter setup failed: {:?}", e);
    }
    if let Err(e) = page::start_contact_form(&document) {
        log_error!("contact form setup failed: {:?}", e);
    }
    Ok(())
}

pub(crate) fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

pub(crate) fn now() -> Result<f64, JsValue> {
    Ok(window()?
        .performance()
        .map(|performance| performance.now())
        .unwrap_or_else(js_sys::Date::now))
}

pub(crate) fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn viewport(window: &Window) -> Result<Viewport, JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(Viewport {
        width: width.max(0.0) as u32,
        height: height.max(0.0) as u32,
    })
}

fn current_viewport() -> Result<Viewport, JsValue> {
    viewport(&window()?)
}

fn request_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    window()?.request_animation_frame(callback.as_ref().unchecked_ref())
}

// A reusable setTimeout slot: arming replaces any pending timeout
pub(crate) struct Timeout {
    handle: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl Timeout {
    pub(crate) fn new() -> Timeout {
        Timeout {
            handle: Cell::new(None),
            callback: RefCell::new(None),
        }
    }

    pub(crate) fn set_callback(&self, callback: Closure<dyn FnMut()>) {
        *self.callback.borrow_mut() = Some(callback);
    }

    pub(crate) fn arm(&self, ms: f64) -> Result<(), JsValue> {
        self.clear()?;
        if let Some(callback) = self.callback.borrow().as_ref() {
            let handle = window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                ms.max(0.0).ceil() as i32,
            )?;
            self.handle.set(Some(handle));
        }
        Ok(())
    }

    pub(crate) fn clear(&self) -> Result<(), JsValue> {
        if let Some(handle) = self.handle.take() {
            window()?.clear_timeout_with_handle(handle);
        }
        Ok(())
    }

    // Called first thing from the callback
    pub(crate) fn fired(&self) {
        self.handle.set(None);
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.handle.get().is_some()
    }
}

// Owns the requestAnimationFrame chain for one animator
struct FrameLoop {
    animator: Rc<RefCell<PageAnimator>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    handle: Cell<Option<i32>>,
}

impl FrameLoop {
    fn new(animator: Rc<RefCell<PageAnimator>>) -> Rc<FrameLoop> {
        let frame_loop = Rc::new(FrameLoop {
            animator,
            callback: RefCell::new(None),
            handle: Cell::new(None),
        });

        // The closure keeps the loop alive for the life of the page
        let inner = frame_loop.clone();
        let callback = Closure::wrap(Box::new(move |_timestamp: f64| {
            inner.handle.set(None);
            let keep_going = inner.animator.borrow_mut().tick();
            if keep_going {
                if let Err(e) = inner.schedule() {
                    log_error!("failed to schedule particle frame: {:?}", e);
                }
            }
        }) as Box<dyn FnMut(f64)>);
        *frame_loop.callback.borrow_mut() = Some(callback);

        frame_loop
    }

    fn schedule(&self) -> Result<(), JsValue> {
        if self.handle.get().is_some() {
            return Ok(());
        }
        if let Some(callback) = self.callback.borrow().as_ref() {
            self.handle.set(Some(request_frame(callback)?));
        }
        Ok(())
    }

    fn cancel(&self) -> Result<(), JsValue> {
        if let Some(handle) = self.handle.take() {
            window()?.cancel_animation_frame(handle)?;
        }
        Ok(())
    }

    fn on_visibility_change(&self, hidden: bool) -> Result<(), JsValue> {
        if hidden {
            self.animator.borrow_mut().pause();
            self.cancel()
        } else if self.animator.borrow_mut().resume() {
            self.schedule()
        } else {
            Ok(())
        }
    }
}

// Debounced resize. Each event restarts the quiet period; when the timer fires the
// animator decides whether it is due, and an early timer is re-armed for the rest.
struct ResizeTimer {
    animator: Rc<RefCell<PageAnimator>>,
    timeout: Timeout,
}

impl ResizeTimer {
    fn new(animator: Rc<RefCell<PageAnimator>>) -> Rc<ResizeTimer> {
        let resize = Rc::new(ResizeTimer {
            animator,
            timeout: Timeout::new(),
        });
        let inner = resize.clone();
        resize.timeout.set_callback(Closure::wrap(Box::new(move || {
            if let Err(e) = inner.on_timer() {
                log_error!("resize rebuild failed: {:?}", e);
            }
        }) as Box<dyn FnMut()>));
        resize
    }

    fn on_resize(&self, viewport: Viewport) -> Result<(), JsValue> {
        let quiet_ms = {
            let mut animator = self.animator.borrow_mut();
            animator.on_resize(now()?, viewport);
            animator.field().config.resize_quiet_ms
        };
        self.timeout.arm(quiet_ms)
    }

    fn on_timer(&self) -> Result<(), JsValue> {
        self.timeout.fired();
        let wake = {
            let _timer = Timer::new("resize particle field");
            self.animator.borrow_mut().service_resize(now()?)
        };
        if let ResizeWake::Wait(ms) = wake {
            self.timeout.arm(ms)?;
        }
        Ok(())
    }
}

fn start_particles(window: &Window, document: &Document) -> Result<(), JsValue> {
    let canvas = match document
        .get_element_by_id(PARTICLE_CANVAS_ID)
        .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok())
    {
        Some(canvas) => canvas,
        None => {
            log!("no #{} canvas, particle background disabled", PARTICLE_CANVAS_ID);
            return Ok(());
        }
    };
    let renderer = match CanvasRenderer::new(canvas)? {
        Some(renderer) => renderer,
        None => {
            log!("#{} has no 2d context, particle background disabled", PARTICLE_CANVAS_ID);
            return Ok(());
        }
    };

    let animator = Rc::new(RefCell::new(Animator::new(renderer, FieldConfig::default(), rand::thread_rng())));
    let frame_loop = FrameLoop::new(animator.clone());
    let resize = ResizeTimer::new(animator.clone());

    let on_resize = Closure::wrap(Box::new(move || {
        if let Err(e) = current_viewport().and_then(|viewport| resize.on_resize(viewport)) {
            log_error!("resize handling failed: {:?}", e);
        }
    }) as Box<dyn FnMut()>);
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    // Pause while the tab is hidden
    let on_visibility = {
        let frame_loop = frame_loop.clone();
        let document = document.clone();
        Closure::wrap(Box::new(move || {
            if let Err(e) = frame_loop.on_visibility_change(document.hidden()) {
                log_error!("visibility change failed: {:?}", e);
            }
        }) as Box<dyn FnMut()>)
    };
    document.add_event_listener_with_callback("visibilitychange", on_visibility.as_ref().unchecked_ref())?;
    on_visibility.forget();

    let started = animator.borrow_mut().start(viewport(window)?);
    if started {
        if document.hidden() {
            animator.borrow_mut().pause();
        } else {
            frame_loop.schedule()?;
        }
    }
    Ok(())
}

fn start_counters(document: &Document) -> Result<(), JsValue> {
    let section = match document.get_element_by_id(STATS_SECTION_ID) {
        Some(section) => section,
        None => return Ok(()),
    };

    let observed = section.clone();
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
        let visible = entries
            .get(0)
            .dyn_into::<IntersectionObserverEntry>()
            .map(|entry| entry.is_intersecting())
            .unwrap_or(false);
        if !visible {
            return;
        }
        // Counters only run once
        observer.disconnect();
        if let Err(e) = animate_counters(&observed) {
            log_error!("counter animation failed: {:?}", e);
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(STATS_VISIBLE_THRESHOLD));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    observer.observe(&section);
    callback.forget();
    Ok(())
}

fn animate_counters(section: &Element) -> Result<(), JsValue> {
    for element in elements(&section.query_selector_all(STAT_NUMBER_SELECTOR)?) {
        let target = match element
            .get_attribute("data-count")
            .and_then(|raw| counter::parse_count(&raw))
        {
            Some(target) => target,
            None => continue,
        };
        run_counter(element, CounterAnimation::with_default_duration(target))?;
    }
    Ok(())
}

// Each counter gets its own frame chain, dropped once it reaches its target
fn run_counter(element: Element, mut animation: CounterAnimation) -> Result<(), JsValue> {
    let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next = callback.clone();

    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        let frame = animation.sample(timestamp);
        element.set_text_content(Some(&counter::format_pt_br(frame.value)));
        if frame.finished {
            let _ = next.borrow_mut().take();
            return;
        }
        if let Some(callback) = next.borrow().as_ref() {
            if let Err(e) = request_frame(callback) {
                log_error!("failed to schedule counter frame: {:?}", e);
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(callback) = callback.borrow().as_ref() {
        request_frame(callback)?;
    }
    Ok(())
}

fn start_scroll_chrome(window: &Window, document: &Document) -> Result<(), JsValue> {
    let progress = document
        .get_element_by_id("scrollProgress")
        .and_then(|element| element.dyn_into::<HtmlElement>().ok());
    let navbar = document.get_element_by_id("navbar");
    let back_to_top = document.get_element_by_id("backToTop");
    if progress.is_none() && navbar.is_none() && back_to_top.is_none() {
        return Ok(());
    }

    let document = document.clone();
    let on_scroll = Closure::wrap(Box::new(move || {
        let result = update_scroll_chrome(
            &document,
            progress.as_ref(),
            navbar.as_ref(),
            back_to_top.as_ref(),
        );
        if let Err(e) = result {
            log_error!("scroll update failed: {:?}", e);
        }
    }) as Box<dyn FnMut()>);
    window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
    on_scroll.forget();
    Ok(())
}

fn update_scroll_chrome(
    document: &Document,
    progress: Option<&HtmlElement>,
    navbar: Option<&Element>,
    back_to_top: Option<&Element>,
) -> Result<(), JsValue> {
    let window = window()?;
    let scroll_y = window.scroll_y()?;
    let viewport_height = window.inner_height()?.as_f64().unwrap_or(0.0);
    let scroll_height = document
        .document_element()
        .map(|root| root.scroll_height() as f64)
        .unwrap_or(0.0);
    let chrome = ScrollChrome::compute(scroll_y, scroll_height, viewport_height);

    if let Some(bar) = progress {
        bar.style()
            .set_property("width", &format!("{}%", chrome.progress_percent))?;
    }
    if let Some(navbar) = navbar {
        navbar.class_list().toggle_with_force("scrolled", chrome.navbar_scrolled)?;
    }
    if let Some(button) = back_to_top {
        button.class_list().toggle_with_force("visible", chrome.back_to_top_visible)?;
    }
    Ok(())
}
