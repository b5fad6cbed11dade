// Browser console helpers. Only called from the web glue, never from the simulation.

use web_sys::console;

// Like println!, but to the browser console
macro_rules! log {
    ( $( $t:tt )* ) => {
        web_sys::console::log_1(&format!( $( $t )* ).into())
    }
}

macro_rules! log_error {
    ( $( $t:tt )* ) => {
        web_sys::console::error_1(&format!( $( $t )* ).into())
    }
}

pub fn set_panic_hook() {
    // Better panic messages in the console when the `console_error_panic_hook`
    // feature is enabled.
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// console.time / console.timeEnd around a scope
pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}
