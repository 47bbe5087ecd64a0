use std::{
    fmt,
    sync::{Arc, RwLock},
};

use anyhow::format_err;
use tracing::{debug, warn};

use crate::{
    config::{ParamDescription, Parameter, ParameterSet},
    error::Error,
    traits::ConfigListener,
};

/// Shared by every server of one [`SettingsBridge`](crate::SettingsBridge).
/// Single writes hold it shared, snapshots and batch writes hold it exclusively.
pub(crate) type WriteGate = Arc<RwLock<()>>;

/// One remotely configurable parameter set, e.g. `capture/frame_3`.
pub struct ConfigServer<C> {
    name: String,
    slot: usize,
    gate: WriteGate,
    current: RwLock<C>,
    listeners: RwLock<Vec<Box<dyn ConfigListener<C>>>>,
}

impl<C> fmt::Debug for ConfigServer<C>
where
    C: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigServer")
            .field("name", &self.name)
            .field("slot", &self.slot)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl<C> ConfigServer<C>
where
    C: ParameterSet,
{
    pub fn new(name: impl Into<String>, slot: usize) -> Self {
        Self::with_gate(name, slot, WriteGate::default())
    }

    pub(crate) fn with_gate(name: impl Into<String>, slot: usize, gate: WriteGate) -> Self {
        Self {
            name: name.into(),
            slot,
            gate,
            current: RwLock::new(C::default()),
            listeners: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn defaults(&self) -> C {
        C::default()
    }

    pub fn descriptions(&self) -> Vec<ParamDescription> {
        C::descriptions()
    }

    pub fn current(&self) -> Result<C, Error> {
        Ok(self
            .current
            .read()
            .map_err(|e| format_err!("Failed to lock {} : {}", self.name, e))?
            .clone())
    }

    /// Replaces the whole config. Returns the config as stored, after clamping.
    pub fn set(&self, config: C) -> Result<C, Error> {
        let accepted = {
            let _gate = self
                .gate
                .read()
                .map_err(|e| format_err!("Failed to lock settings : {}", e))?;
            self.store(config)?
        };
        self.notify(&accepted);
        Ok(accepted)
    }

    /// Changes the named parameters only. Nothing changes if any of them is invalid.
    pub fn update(&self, parameters: &[Parameter]) -> Result<C, Error> {
        let accepted = {
            let _gate = self
                .gate
                .read()
                .map_err(|e| format_err!("Failed to lock settings : {}", e))?;
            let mut current = self
                .current
                .write()
                .map_err(|e| format_err!("Failed to lock {} : {}", self.name, e))?;
            let mut next = current.clone();
            for parameter in parameters {
                if next.apply(parameter)? {
                    warn!(
                        server = %self.name,
                        parameter = %parameter.name,
                        "value {} is out of range and was clamped",
                        parameter.value
                    );
                }
            }
            *current = next.clone();
            next
        };
        debug!(server = %self.name, config = ?accepted, "updated");
        self.notify(&accepted);
        Ok(accepted)
    }

    pub fn add_listener(&self, listener: impl ConfigListener<C> + 'static) -> Result<(), Error> {
        self.listeners
            .write()
            .map_err(|e| format_err!("Failed to lock listeners of {} : {}", self.name, e))?
            .push(Box::new(listener));
        Ok(())
    }

    /// Validates and stores `config` without taking the write gate or notifying.
    pub(crate) fn store(&self, config: C) -> Result<C, Error> {
        let accepted = self.validate(config)?;
        self.commit(accepted.clone())?;
        Ok(accepted)
    }

    /// Returns `config` as it would be stored, after clamping. Stores nothing.
    pub(crate) fn validate(&self, config: C) -> Result<C, Error> {
        let mut accepted = C::default();
        for parameter in config.parameters() {
            if accepted.apply(&parameter)? {
                warn!(
                    server = %self.name,
                    parameter = %parameter.name,
                    "value {} is out of range and was clamped",
                    parameter.value
                );
            }
        }
        Ok(accepted)
    }

    /// Stores an already validated config.
    pub(crate) fn commit(&self, config: C) -> Result<(), Error> {
        debug!(server = %self.name, config = ?config, "set");
        *self
            .current
            .write()
            .map_err(|e| format_err!("Failed to lock {} : {}", self.name, e))? = config;
        Ok(())
    }

    pub(crate) fn notify(&self, config: &C) {
        match self.listeners.read() {
            Ok(listeners) => {
                for listener in listeners.iter() {
                    listener.on_change(self.slot, config);
                }
            }
            Err(e) => warn!("Failed to lock listeners of {} : {}", self.name, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    use super::*;
    use crate::config::CaptureFrameConfig;

    #[test]
    fn test_defaults_and_set() {
        let server = ConfigServer::<CaptureFrameConfig>::new("capture/frame_0", 0);
        assert_eq!(server.current().unwrap(), server.defaults());
        let accepted = server
            .set(CaptureFrameConfig {
                enabled: true,
                ..Default::default()
            })
            .unwrap();
        assert!(accepted.enabled);
        assert!(server.current().unwrap().enabled);
        assert!(!server.defaults().enabled);
    }

    #[test]
    fn test_set_clamps() {
        let server = ConfigServer::<CaptureFrameConfig>::new("capture/frame_0", 0);
        let accepted = server
            .set(CaptureFrameConfig {
                exposure_time: 1,
                gain: 100.0,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(accepted.exposure_time, 6500);
        assert_eq!(accepted.gain, 16.0);
        assert_eq!(server.current().unwrap(), accepted);
    }

    #[test]
    fn test_partial_update_is_atomic() {
        let server = ConfigServer::<CaptureFrameConfig>::new("capture/frame_2", 2);
        server
            .update(&[Parameter::new("enabled", true), Parameter::new("iris", 10)])
            .unwrap();
        let current = server.current().unwrap();
        assert!(current.enabled);
        assert_eq!(current.iris, 10);
        assert_eq!(current.gain, 1.0);

        assert!(server
            .update(&[Parameter::new("iris", 20), Parameter::new("no_such", 1)])
            .is_err());
        assert_eq!(server.current().unwrap().iris, 10);
    }

    #[test]
    fn test_listeners() {
        let server = ConfigServer::<CaptureFrameConfig>::new("capture/frame_4", 4);
        let calls = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(Mutex::new(None));
        let calls_for_listener = calls.clone();
        let last_for_listener = last.clone();
        server
            .add_listener(move |slot: usize, config: &CaptureFrameConfig| {
                calls_for_listener.fetch_add(1, Ordering::SeqCst);
                *last_for_listener.lock().unwrap() = Some((slot, config.clone()));
            })
            .unwrap();

        server.update(&[Parameter::new("enabled", true)]).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let (slot, config) = last.lock().unwrap().clone().unwrap();
        assert_eq!(slot, 4);
        assert!(config.enabled);

        // rejected updates are not notified
        let _ = server.update(&[Parameter::new("enabled", 1.0)]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
