// Symbols OBS_DECLARE_MODULE() would generate, plus load/unload

use super::{abi, Plugin};
use crate::config::Config;
use crate::ffi::obs_module_t;
use crate::frontend::ObsFrontend;
use parking_lot::Mutex;
use std::os::raw::c_char;
use std::ptr::null_mut;
use std::sync::atomic::{AtomicPtr, Ordering};
use std::sync::Arc;
use tracing::warn;

static MODULE: AtomicPtr<obs_module_t> = AtomicPtr::new(null_mut());
static PLUGIN: Mutex<Option<Plugin>> = parking_lot::const_mutex(None);

const MODULE_NAME: &str = concat!(env!("CARGO_PKG_NAME"), "\0");
const MODULE_DESC: &str = concat!(env!("CARGO_PKG_DESCRIPTION"), "\0");

#[no_mangle]
pub extern "C" fn obs_module_set_pointer(module: *mut obs_module_t) {
    MODULE.store(module, Ordering::SeqCst);
}

#[no_mangle]
pub extern "C" fn obs_current_module() -> *mut obs_module_t {
    MODULE.load(Ordering::SeqCst)
}

#[no_mangle]
pub extern "C" fn obs_module_ver() -> u32 {
    abi::LIBOBS_API_VER
}

#[no_mangle]
pub extern "C" fn obs_module_name() -> *const c_char {
    MODULE_NAME.as_ptr() as *const c_char
}

#[no_mangle]
pub extern "C" fn obs_module_description() -> *const c_char {
    MODULE_DESC.as_ptr() as *const c_char
}

#[no_mangle]
pub extern "C" fn obs_module_load() -> bool {
    super::log::init();

    let config = match Config::load_for_plugin() {
        Ok(config) => config,
        Err(e) => {
            warn!("Could not read config, using defaults: {:#}", e);
            Config::default()
        }
    };

    let plugin = Plugin::load(Arc::new(ObsFrontend::new()), config);
    *PLUGIN.lock() = Some(plugin);
    true
}

#[no_mangle]
pub extern "C" fn obs_module_unload() {
    if let Some(plugin) = PLUGIN.lock().take() {
        plugin.unload();
    }
}
