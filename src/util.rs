// Console logging and browser-only helpers.

use crate::state::Jitter;

#[cfg(target_arch = "wasm32")]
pub fn clog(msg: &str) {
    gloo::console::log!(msg);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn clog(msg: &str) {
    let _ = msg; // no console outside the browser
}

/// Samples an open-jitter pair from the JS PRNG.
pub fn sample_jitter() -> Jitter {
    Jitter::new(js_sys::Math::random(), js_sys::Math::random())
}

pub fn session_flag(key: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.session_storage().ok().flatten())
        .and_then(|store| store.get_item(key).ok().flatten())
        .is_some()
}

pub fn set_session_flag(key: &str) {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.session_storage() {
            let _ = store.set_item(key, "1");
        }
    }
}
