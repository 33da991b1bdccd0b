//! Raw declarations for the parts of libobs and obs-frontend-api this plugin uses.

#![allow(non_camel_case_types)]

use std::os::raw::{c_char, c_int, c_void};

#[repr(C)]
pub struct obs_module_t {
    _private: [u8; 0],
}

#[repr(C)]
pub struct config_t {
    _private: [u8; 0],
}

pub type obs_frontend_event_cb = unsafe extern "C" fn(event: c_int, private_data: *mut c_void);

pub const LOG_ERROR: c_int = 100;
pub const LOG_WARNING: c_int = 200;
pub const LOG_INFO: c_int = 300;
pub const LOG_DEBUG: c_int = 400;

pub const CONFIG_SUCCESS: c_int = 0;

#[link(name = "obs")]
extern "C" {
    pub fn blog(log_level: c_int, format: *const c_char, ...);

    pub fn config_get_string(
        config: *mut config_t,
        section: *const c_char,
        name: *const c_char,
    ) -> *const c_char;

    pub fn config_set_string(
        config: *mut config_t,
        section: *const c_char,
        name: *const c_char,
        value: *const c_char,
    );

    pub fn config_save(config: *mut config_t) -> c_int;
}

#[link(name = "obs-frontend-api")]
extern "C" {
    pub fn obs_frontend_recording_start();

    pub fn obs_frontend_recording_stop();

    pub fn obs_frontend_recording_active() -> bool;

    pub fn obs_frontend_get_profile_config() -> *mut config_t;

    pub fn obs_frontend_add_event_callback(callback: obs_frontend_event_cb, private_data: *mut c_void);

    pub fn obs_frontend_remove_event_callback(
        callback: obs_frontend_event_cb,
        private_data: *mut c_void,
    );
}
