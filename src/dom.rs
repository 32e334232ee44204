//! DOM bindings: wires the state model to the page.
//!
//! Expects the stock navbar markup: a `#hamburger` button controlling
//! `#navLinks`, `.dropdown-toggle` buttons each followed by their
//! `.dropdown-content` menu, and `.nested-toggle`/`.nested-content` pairs
//! inside dropdowns. Visibility is mirrored as the `show` class plus
//! `aria-expanded` on the toggle; desktop edge flips become the
//! `align-right` (first-level) and `open-left` (nested) classes.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element, KeyboardEvent, MouseEvent, Window};

use crate::error::NavError;
use crate::menu::{Alignment, MenuId, ResizeEffect};
use crate::model::NavModel;

// Use wee_alloc for smaller WASM binary
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

const SHOW: &str = "show";
const DROPDOWN_FLIP: &str = "align-right";
const NESTED_FLIP: &str = "open-left";
const NAVBAR: &str = ".navbar";

/// Attach the controller as soon as the module loads.
#[wasm_bindgen(start)]
pub fn init() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    NavController::attach().map(|_| ())
}

/// A toggle button and the menu element it owns.
struct Bind {
    toggle: Element,
    menu: Element,
}

struct Shared {
    model: RefCell<NavModel>,
    window: Window,
    hamburger: Element,
    nav_links: Element,
    dropdowns: Vec<Bind>,
    nested: Vec<Bind>,
}

impl Shared {
    fn bind(&self, menu: MenuId) -> Option<(&Bind, &'static str)> {
        match menu {
            MenuId::Dropdown(i) => self.dropdowns.get(i).map(|b| (b, DROPDOWN_FLIP)),
            MenuId::Nested(i) => self.nested.get(i).map(|b| (b, NESTED_FLIP)),
        }
    }

    /// Mirror the whole model onto the page.
    fn sync_all(&self) {
        let model = self.model.borrow();
        let _ = self
            .nav_links
            .class_list()
            .toggle_with_force(SHOW, model.mobile_open());
        set_expanded(&self.hamburger, model.mobile_open());

        for (i, bind) in self.dropdowns.iter().enumerate() {
            let id = MenuId::Dropdown(i);
            sync_menu(
                bind,
                model.is_open(id).unwrap_or(false),
                model.alignment(id).unwrap_or_default(),
                DROPDOWN_FLIP,
            );
        }
        for (i, bind) in self.nested.iter().enumerate() {
            let id = MenuId::Nested(i);
            sync_menu(
                bind,
                model.is_open(id).unwrap_or(false),
                model.alignment(id).unwrap_or_default(),
                NESTED_FLIP,
            );
        }
    }

    /// Shared click path for dropdown and nested toggles.
    fn on_toggle(&self, menu: MenuId) {
        let Ok(will_open) = self.model.borrow_mut().toggle(menu) else {
            return;
        };
        self.sync_all();
        if will_open {
            self.adjust(menu);
        }
    }

    /// Measure a menu and re-apply its alignment class. The `show` class
    /// must already be synced so the rect reflects the rendered menu.
    fn adjust(&self, menu: MenuId) {
        let Some((bind, flip_class)) = self.bind(menu) else {
            return;
        };
        let right = bind.menu.get_bounding_client_rect().right();
        if self.model.borrow_mut().adjust_position(menu, right).is_err() {
            return;
        }
        let flipped = matches!(
            self.model.borrow().alignment(menu),
            Ok(Alignment::FlippedLeft)
        );
        let _ = bind.menu.class_list().toggle_with_force(flip_class, flipped);
    }
}

/// Page-level navigation controller.
///
/// Constructing one scans the page, builds the state model and registers
/// click/keydown/resize listeners. The listeners live for the page
/// lifetime.
#[wasm_bindgen]
pub struct NavController {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl NavController {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<NavController, JsValue> {
        NavController::attach()
    }

    /// Current state as JSON, for inspection from the console.
    pub fn state(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.shared.model.borrow().snapshot())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl NavController {
    pub fn attach() -> Result<NavController, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let hamburger = document
            .get_element_by_id("hamburger")
            .ok_or(NavError::MissingElement("#hamburger"))?;
        let nav_links = document
            .get_element_by_id("navLinks")
            .ok_or(NavError::MissingElement("#navLinks"))?;

        let mut model = NavModel::new(inner_width(&window));

        // First-level dropdowns, keyed by their enclosing <ul> so sibling
        // exclusivity stays per-list.
        let mut lists: Vec<Element> = Vec::new();
        let mut dropdowns = Vec::new();
        for toggle in elements(&document, ".dropdown-toggle")? {
            let Some(menu) = toggle.next_element_sibling() else {
                console::warn_1(&"nav: .dropdown-toggle without a sibling menu, skipping".into());
                continue;
            };
            let list = toggle
                .closest("ul")
                .ok()
                .flatten()
                .map(|ul| key_for(&mut lists, ul));
            model.add_dropdown(list);
            dropdowns.push(Bind { toggle, menu });
        }

        let mut nested = Vec::new();
        for toggle in elements(&document, ".nested-toggle")? {
            let Some(menu) = toggle.next_element_sibling() else {
                console::warn_1(&"nav: .nested-toggle without a sibling menu, skipping".into());
                continue;
            };
            let parent = toggle.closest(".dropdown-content").ok().flatten().and_then(
                |host| {
                    dropdowns
                        .iter()
                        .position(|b| js_sys::Object::is(b.menu.as_ref(), host.as_ref()))
                },
            );
            let Some(parent) = parent else {
                console::warn_1(&"nav: .nested-toggle outside any dropdown, skipping".into());
                continue;
            };
            if model.add_nested(MenuId::Dropdown(parent)).is_ok() {
                nested.push(Bind { toggle, menu });
            }
        }

        let shared = Rc::new(Shared {
            model: RefCell::new(model),
            window,
            hamburger,
            nav_links,
            dropdowns,
            nested,
        });
        register_listeners(&shared, &document)?;
        Ok(NavController { shared })
    }
}

fn register_listeners(shared: &Rc<Shared>, document: &Document) -> Result<(), JsValue> {
    // Hamburger: toggles the mobile menu; opening first collapses any
    // open dropdowns.
    let state = Rc::clone(shared);
    let cb = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
        ev.stop_propagation();
        state.model.borrow_mut().toggle_mobile();
        state.sync_all();
    });
    shared
        .hamburger
        .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();

    for i in 0..shared.dropdowns.len() {
        let state = Rc::clone(shared);
        let cb = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
            ev.stop_propagation();
            state.on_toggle(MenuId::Dropdown(i));
        });
        shared.dropdowns[i]
            .toggle
            .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }

    for i in 0..shared.nested.len() {
        let state = Rc::clone(shared);
        let cb = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
            ev.stop_propagation();
            state.on_toggle(MenuId::Nested(i));
        });
        shared.nested[i]
            .toggle
            .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }

    // Clicks that land outside the navbar reset everything. Toggle
    // handlers stop propagation, so only outside clicks get here.
    let state = Rc::clone(shared);
    let cb = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
        let inside_nav = ev
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(NAVBAR).ok().flatten())
            .is_some();
        if !inside_nav {
            state.model.borrow_mut().close_everything();
            state.sync_all();
        }
    });
    document.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();

    let state = Rc::clone(shared);
    let cb = Closure::<dyn FnMut(KeyboardEvent)>::new(move |ev: KeyboardEvent| {
        if ev.key() == "Escape" {
            state.model.borrow_mut().close_everything();
            state.sync_all();
        }
    });
    document.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref())?;
    cb.forget();

    let state = Rc::clone(shared);
    let cb = Closure::<dyn FnMut()>::new(move || {
        let width = inner_width(&state.window);
        let effect = state.model.borrow_mut().handle_resize(width);
        match effect {
            ResizeEffect::Closed => state.sync_all(),
            ResizeEffect::Remeasure(menus) => {
                for menu in menus {
                    state.adjust(menu);
                }
            }
        }
    });
    shared
        .window
        .add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())?;
    cb.forget();

    Ok(())
}

fn sync_menu(bind: &Bind, open: bool, alignment: Alignment, flip_class: &str) {
    let _ = bind.menu.class_list().toggle_with_force(SHOW, open);
    set_expanded(&bind.toggle, open);
    let _ = bind
        .menu
        .class_list()
        .toggle_with_force(flip_class, alignment == Alignment::FlippedLeft);
}

fn set_expanded(toggle: &Element, open: bool) {
    let _ = toggle.set_attribute("aria-expanded", if open { "true" } else { "false" });
}

fn elements(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    let mut out = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        if let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            out.push(el);
        }
    }
    Ok(out)
}

/// Stable index for a list element, comparing by object identity.
fn key_for(lists: &mut Vec<Element>, list: Element) -> usize {
    match lists
        .iter()
        .position(|l| js_sys::Object::is(l.as_ref(), list.as_ref()))
    {
        Some(i) => i,
        None => {
            lists.push(list);
            lists.len() - 1
        }
    }
}

fn inner_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0)
}
