// Navigation state: which nav link is highlighted for the section in view, and
// whether the mobile menu overlay is open.

// Band of the viewport a section must cross to count as current
pub const SECTION_ROOT_MARGIN: &str = "-40% 0px -55% 0px";

/// Id of the section to highlight from a batch of observer entries, given as
/// `(section id, is intersecting)`. Entries apply in order, so the last
/// intersecting one wins.
pub fn current_section<'a, I>(entries: I) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, bool)>,
{
    entries
        .into_iter()
        .filter(|(_, intersecting)| *intersecting)
        .map(|(id, _)| id)
        .last()
}

// One flag per nav link: true for links pointing at `#section_id`
pub fn active_links<S: AsRef<str>>(hrefs: &[S], section_id: &str) -> Vec<bool> {
    hrefs
        .iter()
        .map(|href| {
            let href = href.as_ref();
            href.len() == section_id.len() + 1 && href.starts_with('#') && &href[1..] == section_id
        })
        .collect()
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MenuView {
    pub menu_open: bool,
    pub hamburger_active: bool,
    // Value for the body's overflow style; empty string clears it
    pub body_overflow: &'static str,
}

#[derive(Debug, Default)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn new() -> MobileMenu {
        MobileMenu { open: false }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) -> MenuView {
        self.open = true;
        self.view()
    }

    pub fn close(&mut self) -> MenuView {
        self.open = false;
        self.view()
    }

    // Hamburger button
    pub fn toggle(&mut self) -> MenuView {
        if self.open {
            self.close()
        } else {
            self.open()
        }
    }

    pub fn view(&self) -> MenuView {
        MenuView {
            menu_open: self.open,
            hamburger_active: self.open,
            body_overflow: if self.open { "hidden" } else { "" },
        }
    }
}
