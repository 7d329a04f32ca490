use serde::Deserialize;

/// Health record for a device, as returned by the `health` endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatus {
    pub device_id: String,
    pub state: String,
    pub last_updated_date: String,
}

impl DeviceStatus {
    /// Commands may only be issued while the device reports `ONLINE`
    pub fn is_online(&self) -> bool {
        self.state == "ONLINE"
    }
}
