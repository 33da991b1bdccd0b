// libobs-backed frontend

use super::{EventHandler, Frontend, FrontendEvent, Subscription};
use crate::error::{ControllerError, Result};
use crate::ffi;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::ffi::{CStr, CString};
use std::os::raw::{c_int, c_void};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

/// [`Frontend`] implementation calling straight into obs-frontend-api
#[derive(Default)]
pub struct ObsFrontend {
    /// Subscription id → leaked `Box<EventHandler>` handed to OBS as private data
    callbacks: Mutex<HashMap<u64, usize>>,
    next_subscription: AtomicU64,
}

impl ObsFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    fn profile_config() -> Result<*mut ffi::config_t> {
        let config = unsafe { ffi::obs_frontend_get_profile_config() };
        if config.is_null() {
            return Err(ControllerError::NoProfileConfig);
        }
        Ok(config)
    }
}

unsafe extern "C" fn dispatch_event(event: c_int, private_data: *mut c_void) {
    if private_data.is_null() {
        return;
    }
    // Clone first: the handler may remove itself, which frees `private_data`
    let handler = (*(private_data as *const EventHandler)).clone();
    handler(FrontendEvent::from_raw(event));
}

impl Frontend for ObsFrontend {
    fn recording_start(&self) {
        unsafe { ffi::obs_frontend_recording_start() }
    }

    fn recording_stop(&self) {
        unsafe { ffi::obs_frontend_recording_stop() }
    }

    fn recording_active(&self) -> bool {
        unsafe { ffi::obs_frontend_recording_active() }
    }

    fn profile_config_get(&self, section: &str, key: &str) -> Result<Option<String>> {
        let config = Self::profile_config()?;
        let section = CString::new(section)?;
        let key = CString::new(key)?;

        let value = unsafe { ffi::config_get_string(config, section.as_ptr(), key.as_ptr()) };
        if value.is_null() {
            return Ok(None);
        }
        let value = unsafe { CStr::from_ptr(value) }.to_str()?;
        Ok(Some(value.to_string()))
    }

    fn profile_config_set(&self, section: &str, key: &str, value: &str) -> Result<()> {
        let config = Self::profile_config()?;
        let section = CString::new(section)?;
        let key = CString::new(key)?;
        let value = CString::new(value)?;

        unsafe { ffi::config_set_string(config, section.as_ptr(), key.as_ptr(), value.as_ptr()) };
        Ok(())
    }

    fn profile_config_save(&self) -> Result<()> {
        let config = Self::profile_config()?;
        match unsafe { ffi::config_save(config) } {
            ffi::CONFIG_SUCCESS => Ok(()),
            code => Err(ControllerError::ConfigSave(code)),
        }
    }

    fn add_event_callback(&self, handler: EventHandler) -> Subscription {
        let id = self.next_subscription.fetch_add(1, Ordering::SeqCst);
        let private_data = Box::into_raw(Box::new(handler));

        self.callbacks.lock().insert(id, private_data as usize);
        unsafe { ffi::obs_frontend_add_event_callback(dispatch_event, private_data as *mut c_void) };

        Subscription::new(id)
    }

    fn remove_event_callback(&self, subscription: Subscription) {
        let Some(private_data) = self.callbacks.lock().remove(&subscription.id()) else {
            warn!("Event callback {} is not registered", subscription.id());
            return;
        };

        let private_data = private_data as *mut EventHandler;
        unsafe {
            ffi::obs_frontend_remove_event_callback(dispatch_event, private_data as *mut c_void);
            drop(Box::from_raw(private_data));
        }
    }
}
