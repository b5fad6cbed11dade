#[macro_use]
mod utils;

pub mod animator;
pub mod color;
pub mod config;
pub mod counter;
pub mod debounce;
pub mod field;
pub mod form;
pub mod nav;
mod page;
pub mod particle;
pub mod random;
pub mod renderer;
pub mod scroll;
pub mod surface;
mod web;

use wasm_bindgen::prelude::*;

pub use animator::{ Animator, AnimatorState, Viewport };
pub use config::FieldConfig;
pub use field::Field;
pub use particle::Particle;
pub use random::{ RandomSource, SequenceSource };
pub use surface::Surface;

// Use `wee_alloc` as the global allocator when the feature is enabled.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// Called once by the page script after the module loads
#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    if let Err(e) = web::start() {
        log_error!("page initialization failed: {:?}", e);
    }
}
