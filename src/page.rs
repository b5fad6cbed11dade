// DOM wiring for navigation (active link, mobile menu) and the contact form.

use crate::form::{ ButtonView, ContactForm, FormTransition, SubmitOutcome };
use crate::nav::{ self, MenuView, MobileMenu };
use crate::web::{ elements, now, Timeout };
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, HtmlElement, HtmlFormElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

const INVALID_BORDER: &str = "#ef4444";
const SENT_BACKGROUND: &str = "linear-gradient(135deg, #16A34A, #22C55E)";
const SENT_SHADOW: &str = "0 4px 22px rgba(34,197,94,0.4)";

fn on_click<F: FnMut() + 'static>(element: &Element, handler: F) -> Result<(), JsValue> {
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
    element.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

pub fn start_nav_highlight(document: &Document) -> Result<(), JsValue> {
    let sections = elements(&document.query_selector_all("section[id]")?);
    if sections.is_empty() {
        return Ok(());
    }
    let anchors = elements(&document.query_selector_all(".nav-links a")?);
    let hrefs: Vec<String> = anchors
        .iter()
        .map(|anchor| anchor.get_attribute("href").unwrap_or_default())
        .collect();

    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, _observer: IntersectionObserver| {
        let entries: Vec<(String, bool)> = entries
            .iter()
            .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
            .map(|entry| (entry.target().id(), entry.is_intersecting()))
            .collect();
        let current = nav::current_section(entries.iter().map(|(id, hit)| (id.as_str(), *hit)));
        if let Some(id) = current {
            for (anchor, active) in anchors.iter().zip(nav::active_links(&hrefs, id)) {
                if let Err(e) = anchor.class_list().toggle_with_force("active", active) {
                    log_error!("nav link update failed: {:?}", e);
                }
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_root_margin(nav::SECTION_ROOT_MARGIN);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for section in &sections {
        observer.observe(section);
    }
    callback.forget();
    Ok(())
}

struct MenuControls {
    menu: RefCell<MobileMenu>,
    overlay: Element,
    hamburger: Element,
    body: Option<HtmlElement>,
}

impl MenuControls {
    fn apply(&self, view: MenuView) -> Result<(), JsValue> {
        self.overlay.class_list().toggle_with_force("open", view.menu_open)?;
        self.hamburger.class_list().toggle_with_force("active", view.hamburger_active)?;
        if let Some(body) = &self.body {
            body.style().set_property("overflow", view.body_overflow)?;
        }
        Ok(())
    }

    fn toggle(&self) {
        let view = self.menu.borrow_mut().toggle();
        if let Err(e) = self.apply(view) {
            log_error!("mobile menu update failed: {:?}", e);
        }
    }

    fn close(&self) {
        let view = self.menu.borrow_mut().close();
        if let Err(e) = self.apply(view) {
            log_error!("mobile menu update failed: {:?}", e);
        }
    }
}

pub fn start_mobile_menu(document: &Document) -> Result<(), JsValue> {
    let (hamburger, overlay) = match (
        document.get_element_by_id("hamburger"),
        document.get_element_by_id("mobileMenu"),
    ) {
        (Some(hamburger), Some(overlay)) => (hamburger, overlay),
        _ => return Ok(()),
    };
    let controls = Rc::new(MenuControls {
        menu: RefCell::new(MobileMenu::new()),
        overlay,
        hamburger: hamburger.clone(),
        body: document.body(),
    });

    let toggle = controls.clone();
    on_click(&hamburger, move || toggle.toggle())?;

    if let Some(close_button) = document.get_element_by_id("mobileClose") {
        let close = controls.clone();
        on_click(&close_button, move || close.close())?;
    }
    for link in elements(&document.query_selector_all(".mobile-link, .mobile-cta")?) {
        let close = controls.clone();
        on_click(&link, move || close.close())?;
    }
    Ok(())
}

fn field_value(element: &Element) -> String {
    js_sys::Reflect::get(element, &JsValue::from_str("value"))
        .ok()
        .and_then(|value| value.as_string())
        .unwrap_or_default()
}

// Red border until the user types into the field again
fn mark_invalid(element: &Element) -> Result<(), JsValue> {
    let field = match element.dyn_ref::<HtmlElement>() {
        Some(field) => field.clone(),
        None => return Ok(()),
    };
    field.style().set_property("border-color", INVALID_BORDER)?;

    let target = field.clone();
    let clear = Closure::once_into_js(move || {
        let _ = target.style().remove_property("border-color");
    });
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    field.add_event_listener_with_callback_and_add_event_listener_options(
        "input",
        clear.unchecked_ref(),
        &options,
    )?;
    Ok(())
}

struct FormControls {
    state: RefCell<ContactForm>,
    form: HtmlFormElement,
    button: Option<HtmlElement>,
    original_label: RefCell<String>,
    timeout: Timeout,
}

impl FormControls {
    fn on_submit(&self, event: Event) -> Result<(), JsValue> {
        event.prevent_default();
        let required = elements(&self.form.query_selector_all("[required]")?);
        let values: Vec<String> = required.iter().map(field_value).collect();

        let outcome = self.state.borrow_mut().submit(now()?, &values);
        match outcome {
            SubmitOutcome::Rejected(blank) => {
                for i in blank {
                    mark_invalid(&required[i])?;
                }
            }
            SubmitOutcome::Busy => {}
            SubmitOutcome::Sending => {
                if let Some(button) = &self.button {
                    *self.original_label.borrow_mut() = button.inner_html();
                }
                self.show_button()?;
                self.arm_next()?;
            }
        }
        Ok(())
    }

    fn on_timer(&self) -> Result<(), JsValue> {
        self.timeout.fired();
        let transition = self.state.borrow_mut().advance(now()?);
        match transition {
            Some(FormTransition::Sent) => self.show_button()?,
            Some(FormTransition::Reset) => {
                self.show_button()?;
                self.form.reset();
            }
            None => {}
        }
        self.arm_next()
    }

    fn arm_next(&self) -> Result<(), JsValue> {
        let wait = self.state.borrow().time_until_next(now()?);
        match wait {
            Some(ms) => self.timeout.arm(ms),
            None => Ok(()),
        }
    }

    fn show_button(&self) -> Result<(), JsValue> {
        let button = match &self.button {
            Some(button) => button,
            None => return Ok(()),
        };
        let view: ButtonView = self.state.borrow().button();
        button.toggle_attribute_with_force("disabled", view.disabled)?;
        match view.label_html {
            Some(html) => button.set_inner_html(html),
            None => button.set_inner_html(&self.original_label.borrow()),
        }
        let style = button.style();
        if view.success_style {
            style.set_property("background", SENT_BACKGROUND)?;
            style.set_property("box-shadow", SENT_SHADOW)?;
        } else {
            style.remove_property("background")?;
            style.remove_property("box-shadow")?;
        }
        Ok(())
    }
}

pub fn start_contact_form(document: &Document) -> Result<(), JsValue> {
    let form = match document
        .get_element_by_id("contactForm")
        .and_then(|element| element.dyn_into::<HtmlFormElement>().ok())
    {
        Some(form) => form,
        None => return Ok(()),
    };
    let button = document
        .get_element_by_id("submitBtn")
        .and_then(|element| element.dyn_into::<HtmlElement>().ok());

    let controls = Rc::new(FormControls {
        state: RefCell::new(ContactForm::new()),
        form: form.clone(),
        button,
        original_label: RefCell::new(String::new()),
        timeout: Timeout::new(),
    });

    let on_timer = controls.clone();
    controls.timeout.set_callback(Closure::wrap(Box::new(move || {
        if let Err(e) = on_timer.on_timer() {
            log_error!("contact form update failed: {:?}", e);
        }
    }) as Box<dyn FnMut()>));

    let on_submit = controls.clone();
    let submit = Closure::wrap(Box::new(move |event: Event| {
        if let Err(e) = on_submit.on_submit(event) {
            log_error!("contact form submit failed: {:?}", e);
        }
    }) as Box<dyn FnMut(Event)>);
    form.add_event_listener_with_callback("submit", submit.as_ref().unchecked_ref())?;
    submit.forget();
    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::form::FormPhase;
    use crate::web::window;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn form_controls(fields: &[&str]) -> FormControls {
        let document = window().unwrap().document().unwrap();
        let form = document
            .create_element("form")
            .unwrap()
            .dyn_into::<HtmlFormElement>()
            .unwrap();
        for value in fields {
            let input = document.create_element("input").unwrap();
            input.set_attribute("required", "").unwrap();
            js_sys::Reflect::set(&input, &JsValue::from_str("value"), &JsValue::from_str(value)).unwrap();
            form.append_child(&input).unwrap();
        }
        let button = document
            .create_element("button")
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap();
        button.set_inner_html("Enviar");
        let controls = FormControls {
            state: RefCell::new(ContactForm::new()),
            form,
            button: Some(button),
            original_label: RefCell::new(String::new()),
            timeout: Timeout::new(),
        };
        controls.timeout.set_callback(Closure::wrap(Box::new(|| {}) as Box<dyn FnMut()>));
        controls
    }

    #[wasm_bindgen_test]
    fn blank_field_gets_red_border_and_no_submission() {
        let controls = form_controls(&["Maria", "  "]);
        controls.on_submit(Event::new("submit").unwrap()).unwrap();
        assert_eq!(controls.state.borrow().phase(), FormPhase::Idle);

        let inputs = elements(&controls.form.query_selector_all("[required]").unwrap());
        let second = inputs[1].dyn_ref::<HtmlElement>().unwrap();
        assert_eq!(second.style().get_property_value("border-color").unwrap(), "rgb(239, 68, 68)");
        let first = inputs[0].dyn_ref::<HtmlElement>().unwrap();
        assert_eq!(first.style().get_property_value("border-color").unwrap(), "");
    }

    #[wasm_bindgen_test]
    fn valid_submit_disables_button_then_shows_sent_label() {
        let controls = form_controls(&["Maria", "maria@example.com"]);
        controls.on_submit(Event::new("submit").unwrap()).unwrap();
        let button = controls.button.as_ref().unwrap();
        assert!(matches!(controls.state.borrow().phase(), FormPhase::Sending { .. }));
        assert!(button.has_attribute("disabled"));
        assert_eq!(button.inner_html(), ContactForm::SENDING_LABEL);
        assert_eq!(controls.original_label.borrow().as_str(), "Enviar");
        assert!(controls.timeout.is_armed());

        // skip the timeline by backdating the phase
        let long_ago = now().unwrap() - 10_000.0;
        *controls.state.borrow_mut() = ContactForm::new();
        controls.state.borrow_mut().submit(long_ago, &["a"]);
        controls.on_timer().unwrap();
        assert!(matches!(controls.state.borrow().phase(), FormPhase::Sent { .. }));
        assert_eq!(button.inner_html(), ContactForm::SENT_LABEL);
        assert!(controls.timeout.is_armed());
        controls.timeout.clear().unwrap();
    }
}
