//! Entry point for the WASM application

pub fn main() {
    nasdrop::start();
}
