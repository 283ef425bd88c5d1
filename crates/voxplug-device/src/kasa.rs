use crate::codec;
use crate::plug_trait::SmartPlug;
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use voxplug_core::{DeviceError, PlugState};

/// TP-Link Kasa plug reached over its local control port. Every request
/// dials a fresh connection; there is no pooling, retry, or timeout beyond
/// what the transport gives us.
pub struct KasaPlug {
    host: String,
    port: u16,
}

impl KasaPlug {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    async fn request(&self, payload: &Value) -> Result<Value, DeviceError> {
        let mut stream = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .map_err(|e| DeviceError::Unreachable(format!("{}:{}: {}", self.host, self.port, e)))?;

        let body = codec::encrypt(payload.to_string().as_bytes());
        stream
            .write_all(&codec::frame(&body))
            .await
            .map_err(|e| DeviceError::Unreachable(e.to_string()))?;

        let mut len_buf = [0u8; 4];
        stream
            .read_exact(&mut len_buf)
            .await
            .map_err(|e| DeviceError::Unreachable(e.to_string()))?;
        let len = u32::from_be_bytes(len_buf) as usize;

        let mut reply_body = vec![0u8; len];
        stream
            .read_exact(&mut reply_body)
            .await
            .map_err(|e| DeviceError::Unreachable(e.to_string()))?;

        let plain = codec::decrypt(&reply_body);
        serde_json::from_slice(&plain)
            .map_err(|e| DeviceError::Protocol(format!("invalid reply JSON: {}", e)))
    }
}

fn check_err_code(section: &Value) -> Result<(), DeviceError> {
    let err_code = section
        .get("err_code")
        .and_then(|v| v.as_i64())
        .unwrap_or(0);
    if err_code != 0 {
        return Err(DeviceError::Refused(err_code));
    }
    Ok(())
}

#[async_trait]
impl SmartPlug for KasaPlug {
    fn name(&self) -> &str {
        "kasa"
    }

    async fn fetch_state(&self) -> Result<PlugState, DeviceError> {
        let reply = self
            .request(&json!({"system": {"get_sysinfo": {}}}))
            .await?;
        let info = reply
            .pointer("/system/get_sysinfo")
            .ok_or_else(|| DeviceError::Protocol("missing get_sysinfo in reply".to_string()))?;
        check_err_code(info)?;

        let is_on = info
            .get("relay_state")
            .and_then(|v| v.as_i64())
            .map(|v| v == 1)
            .ok_or_else(|| DeviceError::Protocol("missing relay_state in reply".to_string()))?;
        let alias = info
            .get("alias")
            .and_then(|v| v.as_str())
            .map(String::from);

        tracing::debug!(host = %self.host, is_on, "fetched plug state");
        Ok(PlugState { is_on, alias })
    }

    async fn set_power(&self, on: bool) -> Result<(), DeviceError> {
        let state = i32::from(on);
        let reply = self
            .request(&json!({"system": {"set_relay_state": {"state": state}}}))
            .await?;
        let section = reply
            .pointer("/system/set_relay_state")
            .ok_or_else(|| DeviceError::Protocol("missing set_relay_state in reply".to_string()))?;
        check_err_code(section)?;

        tracing::debug!(host = %self.host, on, "set relay state");
        Ok(())
    }
}
