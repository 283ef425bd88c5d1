use crate::plug_trait::SmartPlug;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use voxplug_core::{DeviceError, PlugState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    FetchState,
    SetPower(bool),
}

/// In-memory plug with settable state and failure injection. Clones share
/// state, so tests can hand one clone to a controller and inspect another.
#[derive(Clone)]
pub struct MockPlug {
    inner: Arc<MockPlugInner>,
}

struct MockPlugInner {
    is_on: Mutex<bool>,
    fail_fetch: AtomicBool,
    fail_set: AtomicBool,
    calls: Mutex<Vec<MockCall>>,
}

impl MockPlug {
    pub fn new(is_on: bool) -> Self {
        Self {
            inner: Arc::new(MockPlugInner {
                is_on: Mutex::new(is_on),
                fail_fetch: AtomicBool::new(false),
                fail_set: AtomicBool::new(false),
                calls: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn is_on(&self) -> bool {
        *self.inner.is_on.lock().unwrap()
    }

    pub fn set_is_on(&self, on: bool) {
        *self.inner.is_on.lock().unwrap() = on;
    }

    /// Make `fetch_state` fail until turned off again.
    pub fn fail_fetch(&self, fail: bool) {
        self.inner.fail_fetch.store(fail, Ordering::Relaxed);
    }

    /// Make `set_power` fail until turned off again.
    pub fn fail_set(&self, fail: bool) {
        self.inner.fail_set.store(fail, Ordering::Relaxed);
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.inner.calls.lock().unwrap().clone()
    }
}

impl Default for MockPlug {
    fn default() -> Self {
        Self::new(false)
    }
}

#[async_trait]
impl SmartPlug for MockPlug {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_state(&self) -> Result<PlugState, DeviceError> {
        self.inner.calls.lock().unwrap().push(MockCall::FetchState);
        if self.inner.fail_fetch.load(Ordering::Relaxed) {
            return Err(DeviceError::Unreachable("injected fetch failure".to_string()));
        }
        Ok(PlugState {
            is_on: self.is_on(),
            alias: None,
        })
    }

    async fn set_power(&self, on: bool) -> Result<(), DeviceError> {
        self.inner.calls.lock().unwrap().push(MockCall::SetPower(on));
        if self.inner.fail_set.load(Ordering::Relaxed) {
            return Err(DeviceError::Unreachable("injected set failure".to_string()));
        }
        *self.inner.is_on.lock().unwrap() = on;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_plug_records_calls() {
        let plug = MockPlug::new(false);
        plug.fetch_state().await.unwrap();
        plug.set_power(true).await.unwrap();
        assert_eq!(
            plug.calls(),
            vec![MockCall::FetchState, MockCall::SetPower(true)],
        );
    }

    #[tokio::test]
    async fn test_mock_plug_set_power_updates_state() {
        let plug = MockPlug::new(false);
        plug.set_power(true).await.unwrap();
        assert!(plug.is_on());
        assert!(plug.fetch_state().await.unwrap().is_on);
    }

    #[tokio::test]
    async fn test_mock_plug_clones_share_state() {
        let plug = MockPlug::new(false);
        let observer = plug.clone();
        plug.set_power(true).await.unwrap();
        assert!(observer.is_on());
        assert_eq!(observer.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_plug_failure_injection() {
        let plug = MockPlug::new(true);
        plug.fail_fetch(true);
        assert!(plug.fetch_state().await.is_err());
        plug.fail_fetch(false);
        assert!(plug.fetch_state().await.is_ok());
    }
}
