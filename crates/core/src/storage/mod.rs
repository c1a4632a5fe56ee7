pub mod format;
pub mod memory;
pub mod store;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
