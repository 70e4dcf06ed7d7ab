//! Browser glue: builds the controller over the live document and forwards
//! events, intersection entries, timers and animation frames to it.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MouseEvent, ScrollBehavior, ScrollToOptions, Window, window,
};

use crate::config::PageConfig;
use crate::counter::Counter;
use crate::dom::{Dom, Role};
use crate::effects::Rect;
use crate::error::{PageError, PageResult};
use crate::page::{PageController, Viewport};

pub mod canvas;
pub mod dom;
pub mod storage;

use canvas::CanvasSurface;
use dom::WebDom;

type WebPage = PageController<WebDom, CanvasSurface>;

thread_local! {
    static PAGE: RefCell<Option<WebPage>> = const { RefCell::new(None) };
}

fn with_page<R>(f: impl FnOnce(&mut WebPage) -> R) -> Option<R> {
    PAGE.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn viewport(win: &Window) -> Viewport {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport {
        width: dim(win.inner_width()),
        height: dim(win.inner_height()),
    }
}

fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) -> PageResult<()> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn mouse_position(evt: &Event) -> Option<(f64, f64)> {
    evt.dyn_ref::<MouseEvent>()
        .map(|m| (f64::from(m.client_x()), f64::from(m.client_y())))
}

/// Arms one timeout per wakeup the controller queued since the last call.
/// A timeout that fires before its task is due re-arms for the remainder.
fn arm_wakeups() {
    for delay in with_page(|p| p.take_wakeups()).unwrap_or_default() {
        Timeout::new(delay, || {
            with_page(|p| p.run_due(now_ms()));
            arm_wakeups();
        })
        .forget();
    }
}

pub fn start(config: PageConfig) -> PageResult<()> {
    if PAGE.with(|cell| cell.borrow().is_some()) {
        log::warn!("page already started; ignoring");
        return Ok(());
    }
    let win = window().ok_or(PageError::NoWindow)?;
    let doc = win.document().ok_or(PageError::NoDocument)?;
    let web_dom = WebDom::new(doc.clone());

    let theme_toggle = web_dom.query(Role::ThemeToggle);
    let language_toggle = web_dom.query(Role::LanguageToggle);
    let menu_toggle = web_dom.query(Role::MenuToggle);
    let nav_links = web_dom.query_all(Role::NavLink);
    let anchors = web_dom.query_all(Role::AnchorLink);
    let interactive = web_dom.query_all(Role::Interactive);
    let cards = web_dom.query_all(Role::ProjectCard);

    let surface = CanvasSurface::attach(&web_dom)?;
    let store = storage::open(&win);
    let reveal_threshold = config.reveal_threshold;
    let reveal_margin = config.reveal_root_margin.clone();
    let progress_threshold = config.progress_threshold;

    let page = PageController::init(web_dom, store, config, viewport(&win), surface, now_ms());
    let reveal_targets = page.reveal_targets().to_vec();
    let progress_targets = page.progress_targets().to_vec();
    PAGE.with(|cell| cell.replace(Some(page)));
    arm_wakeups();

    if let Some(el) = theme_toggle {
        listen(&el, "click", |_| {
            if let Some(Err(err)) = with_page(|p| p.on_theme_toggle()) {
                log::warn!("theme toggle ignored: {err}");
            }
        })?;
    }
    if let Some(el) = language_toggle {
        listen(&el, "click", |_| {
            if let Some(Err(err)) = with_page(|p| p.on_language_toggle()) {
                log::warn!("language toggle ignored: {err}");
            }
        })?;
    }
    if let Some(el) = menu_toggle {
        listen(&el, "click", |_| {
            with_page(|p| p.on_menu_toggle());
        })?;
    }
    for link in &nav_links {
        let win = win.clone();
        listen(link, "click", move |_| {
            let width = viewport(&win).width;
            with_page(|p| p.on_nav_link(width));
        })?;
    }
    for anchor in &anchors {
        let win = win.clone();
        let el = anchor.clone();
        listen(anchor, "click", move |evt| {
            evt.prevent_default();
            let href = el.get_attribute("href").unwrap_or_default();
            if let Some(top) = with_page(|p| p.on_anchor(&href)).flatten() {
                let opts = ScrollToOptions::new();
                opts.set_top(top);
                opts.set_behavior(ScrollBehavior::Smooth);
                win.scroll_to_with_scroll_to_options(&opts);
            }
        })?;
    }
    {
        let scroll_win = win.clone();
        listen(&win, "scroll", move |_| {
            let offset = scroll_win.scroll_y().unwrap_or(0.0);
            with_page(|p| p.on_scroll(offset));
        })?;
    }
    {
        let resize_win = win.clone();
        listen(&win, "resize", move |_| {
            let vp = viewport(&resize_win);
            with_page(|p| p.on_resize(vp));
        })?;
    }
    if doc.ready_state() == "complete" {
        with_page(|p| p.on_load());
    } else {
        listen(&win, "load", |_| {
            with_page(|p| p.on_load());
        })?;
    }
    listen(&doc, "mousemove", |evt| {
        if let Some((x, y)) = mouse_position(&evt) {
            with_page(|p| p.on_mouse_move(x, y));
        }
    })?;
    for el in &interactive {
        listen(el, "mouseenter", |_| {
            with_page(|p| p.on_interactive_hover(true));
        })?;
        listen(el, "mouseleave", |_| {
            with_page(|p| p.on_interactive_hover(false));
        })?;
    }
    for card in &cards {
        let moving = card.clone();
        listen(card, "mousemove", move |evt| {
            let Some((x, y)) = mouse_position(&evt) else {
                return;
            };
            let r = moving.get_bounding_client_rect();
            let rect = Rect {
                left: r.left(),
                top: r.top(),
                width: r.width(),
                height: r.height(),
            };
            with_page(|p| p.on_card_move(&moving, rect, x, y));
        })?;
        let leaving = card.clone();
        listen(card, "mouseleave", move |_| {
            with_page(|p| p.on_card_leave(&leaving));
        })?;
    }

    observe_once(
        &reveal_targets,
        reveal_threshold,
        Some(reveal_margin.as_str()),
        |p, entries, _now| p.on_reveal_entries(entries),
    )?;
    observe_once(&progress_targets, progress_threshold, None, |p, entries, now| {
        p.on_progress_entries(entries, now)
    })?;

    start_frame_loop();
    Ok(())
}

/// IntersectionObserver whose callback forwards entries to the controller
/// and unobserves whatever the controller reports as fired.
fn observe_once(
    targets: &[Element],
    threshold: f64,
    root_margin: Option<&str>,
    handler: impl Fn(&mut WebPage, Vec<(Element, bool)>, f64) -> Vec<Element> + 'static,
) -> PageResult<()> {
    if targets.is_empty() {
        return Ok(());
    }
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            let batch: Vec<(Element, bool)> = entries
                .iter()
                .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|e| (e.target(), e.is_intersecting()))
                .collect();
            let now = now_ms();
            let fired = with_page(|p| handler(p, batch, now)).unwrap_or_default();
            for el in &fired {
                observer.unobserve(el);
            }
            arm_wakeups();
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        init.set_root_margin(margin);
    }
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();
    for el in targets {
        observer.observe(el);
    }
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// requestAnimationFrame loop; ends once every frame task has been stopped.
fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        let running = with_page(|p| {
            p.frame(ts);
            p.animations_running()
        })
        .unwrap_or(false);
        if !running {
            log::debug!("frame loop finished");
            return;
        }
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn stop_animations() {
    with_page(|p| p.stop_animations());
}

/// Counts the element's text up to `target` on the configured tick.
pub fn animate_number(element_id: &str, target: f64, duration_ms: f64) -> PageResult<()> {
    let doc = window()
        .ok_or(PageError::NoWindow)?
        .document()
        .ok_or(PageError::NoDocument)?;
    let el = doc
        .get_element_by_id(element_id)
        .ok_or_else(|| PageError::Js(format!("no element #{element_id}")))?;
    let tick_ms = with_page(|p| p.config().counter_tick_ms)
        .unwrap_or_else(|| PageConfig::default().counter_tick_ms);

    let mut counter = Counter::new(target, duration_ms, f64::from(tick_ms));
    let slot: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));
    let own = slot.clone();
    let interval = Interval::new(tick_ms, move || {
        if let Some(value) = counter.tick() {
            el.set_text_content(Some(&value.to_string()));
        }
        if counter.is_done() {
            // Dropping the interval cancels it; do it outside its own callback.
            if let Some(interval) = own.borrow_mut().take() {
                Timeout::new(0, move || drop(interval)).forget();
            }
        }
    });
    *slot.borrow_mut() = Some(interval);
    Ok(())
}
