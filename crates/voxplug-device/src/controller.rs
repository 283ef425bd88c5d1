use crate::plug_trait::SmartPlug;
use voxplug_core::{DeviceError, PlugAction, PlugCommand};

/// Decides on/off/toggle against one plug and reports what it did.
///
/// Every operation fetches current state first, then issues the command;
/// each call is an independent session. Failures come back as values so the
/// caller's log-and-continue policy stays visible at the call site.
pub struct PlugController {
    plug: Box<dyn SmartPlug>,
    device_name: String,
}

impl PlugController {
    pub fn new(plug: Box<dyn SmartPlug>, device_name: impl Into<String>) -> Self {
        Self {
            plug,
            device_name: device_name.into(),
        }
    }

    /// Logical name used in log lines.
    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub async fn turn_on(&self) -> Result<PlugAction, DeviceError> {
        let _state = self.plug.fetch_state().await?;
        self.plug.set_power(true).await?;
        Ok(PlugAction::PoweredOn)
    }

    pub async fn turn_off(&self) -> Result<PlugAction, DeviceError> {
        let _state = self.plug.fetch_state().await?;
        self.plug.set_power(false).await?;
        Ok(PlugAction::PoweredOff)
    }

    /// Branches on the fetched state: on goes off, off goes on. The
    /// returned action is the direction actually taken.
    pub async fn toggle(&self) -> Result<PlugAction, DeviceError> {
        let state = self.plug.fetch_state().await?;
        if state.is_on {
            self.plug.set_power(false).await?;
            Ok(PlugAction::PoweredOff)
        } else {
            self.plug.set_power(true).await?;
            Ok(PlugAction::PoweredOn)
        }
    }

    pub async fn dispatch(&self, command: PlugCommand) -> Result<PlugAction, DeviceError> {
        match command {
            PlugCommand::On => self.turn_on().await,
            PlugCommand::Off => self.turn_off().await,
            PlugCommand::Toggle => self.toggle().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_plug::{MockCall, MockPlug};

    #[tokio::test]
    async fn test_turn_on_fetches_state_then_sets_power() {
        let plug = MockPlug::new(false);
        let controller = PlugController::new(Box::new(plug.clone()), "livingroom");

        let action = controller.turn_on().await.unwrap();
        assert_eq!(action, PlugAction::PoweredOn);
        assert_eq!(
            plug.calls(),
            vec![MockCall::FetchState, MockCall::SetPower(true)],
        );
        assert!(plug.is_on());
    }

    #[tokio::test]
    async fn test_turn_off_fetches_state_then_sets_power() {
        let plug = MockPlug::new(true);
        let controller = PlugController::new(Box::new(plug.clone()), "livingroom");

        let action = controller.turn_off().await.unwrap();
        assert_eq!(action, PlugAction::PoweredOff);
        assert_eq!(
            plug.calls(),
            vec![MockCall::FetchState, MockCall::SetPower(false)],
        );
        assert!(!plug.is_on());
    }

    #[tokio::test]
    async fn test_toggle_when_on_powers_off() {
        let plug = MockPlug::new(true);
        let controller = PlugController::new(Box::new(plug.clone()), "livingroom");

        let action = controller.toggle().await.unwrap();
        assert_eq!(action, PlugAction::PoweredOff);
        assert!(!plug.is_on());
    }

    #[tokio::test]
    async fn test_toggle_when_off_powers_on() {
        let plug = MockPlug::new(false);
        let controller = PlugController::new(Box::new(plug.clone()), "livingroom");

        let action = controller.toggle().await.unwrap();
        assert_eq!(action, PlugAction::PoweredOn);
        assert!(plug.is_on());
    }

    #[tokio::test]
    async fn test_fetch_failure_surfaces_as_outcome() {
        let plug = MockPlug::new(false);
        plug.fail_fetch(true);
        let controller = PlugController::new(Box::new(plug.clone()), "livingroom");

        let result = controller.turn_on().await;
        match result {
            Err(DeviceError::Unreachable(_)) => {}
            _ => panic!("expected Unreachable"),
        }
        // Nothing was switched
        assert_eq!(plug.calls(), vec![MockCall::FetchState]);
        assert!(!plug.is_on());
    }

    #[tokio::test]
    async fn test_set_failure_surfaces_as_outcome() {
        let plug = MockPlug::new(false);
        plug.fail_set(true);
        let controller = PlugController::new(Box::new(plug.clone()), "livingroom");

        assert!(controller.turn_on().await.is_err());
        assert!(!plug.is_on());
    }

    #[tokio::test]
    async fn test_dispatch_maps_commands() {
        let plug = MockPlug::new(false);
        let controller = PlugController::new(Box::new(plug.clone()), "livingroom");

        assert_eq!(
            controller.dispatch(PlugCommand::On).await.unwrap(),
            PlugAction::PoweredOn,
        );
        assert_eq!(
            controller.dispatch(PlugCommand::Off).await.unwrap(),
            PlugAction::PoweredOff,
        );
        assert_eq!(
            controller.dispatch(PlugCommand::Toggle).await.unwrap(),
            PlugAction::PoweredOn,
        );
    }

    #[test]
    fn test_controller_device_name() {
        let controller = PlugController::new(Box::new(MockPlug::new(false)), "desk lamp");
        assert_eq!(controller.device_name(), "desk lamp");
    }
}
