//! REST client for an oVirt-compatible management engine.
//!
//! Entities are located by name through the collection search endpoints,
//! then their sub-collections are fetched by id. Responses use the engine's
//! JSON dialect, where every list is wrapped in a singular-named field
//! (`{"vm": [...]}`, `{"nic": [...]}`).

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use nameip_core::constants::DEFAULT_ENGINE_TIMEOUT_SECS;
use nameip_core::error::{NameIpError, Result};
use nameip_core::traits::{HostQuery, VmQuery};
use nameip_core::types::{EntityKind, IpVersion, MacAddress, Nic, ReportedDevice, ReportedIp};

/// Engine client configuration.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct EngineConfig {
    /// Base API URL, e.g. `https://engine.lab/ovirt-engine/api`
    pub api_url: String,
    /// API user, e.g. `admin@internal`
    pub username: String,
    /// API password
    pub password: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl EngineConfig {
    /// Creates a configuration with the default timeout.
    pub fn new(
        api_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            username: username.into(),
            password: password.into(),
            timeout_seconds: DEFAULT_ENGINE_TIMEOUT_SECS,
        }
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api_url)
            .map_err(|e| NameIpError::ConfigError(format!("invalid api_url: {}", e)))?;
        if self.username.is_empty() {
            return Err(NameIpError::ConfigError("username cannot be empty".into()));
        }
        Ok(())
    }
}

/// REST client for the management engine.
pub struct EngineClient {
    config: EngineConfig,
    http_client: reqwest::Client,
}

impl EngineClient {
    /// Creates a client from a validated configuration.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| NameIpError::ConfigError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Performs an authenticated GET against an API path.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.config.api_url.trim_end_matches('/'), path);

        let response = self
            .http_client
            .get(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| NameIpError::HttpError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NameIpError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| NameIpError::HttpError(e.to_string()))
    }

    /// Locates a VM by name and returns its id.
    #[instrument(skip(self))]
    async fn find_vm_id(&self, vm_name: &str) -> Result<String> {
        let search = format!("name={}", vm_name);
        let list: VmListDto = self.get_json("/vms", &[("search", &search)]).await?;

        let vm = list.vm.into_iter().next().ok_or_else(|| NameIpError::EntityNotFound {
            kind: EntityKind::Vm,
            name: vm_name.to_string(),
        })?;

        debug!(vm_name, id = %vm.id, "Located VM");
        Ok(vm.id)
    }
}

#[async_trait]
impl VmQuery for EngineClient {
    /// Fetches the NIC list of the named VM.
    #[instrument(skip(self))]
    async fn vm_nics(&self, vm_name: &str) -> Result<Vec<Nic>> {
        let id = self.find_vm_id(vm_name).await?;
        let list: NicListDto = self.get_json(&format!("/vms/{}/nics", id), &[]).await?;

        let nics: Vec<Nic> = list.nic.into_iter().map(NicDto::into_nic).collect();
        debug!(vm_name, count = nics.len(), "Fetched NICs");
        Ok(nics)
    }
}

#[async_trait]
impl HostQuery for EngineClient {
    /// Fetches the configured management address of the named host.
    #[instrument(skip(self))]
    async fn host_address(&self, host_name: &str) -> Result<String> {
        let search = format!("name={}", host_name);
        let list: HostListDto = self.get_json("/hosts", &[("search", &search)]).await?;

        let host = list
            .host
            .into_iter()
            .next()
            .ok_or_else(|| NameIpError::EntityNotFound {
                kind: EntityKind::Host,
                name: host_name.to_string(),
            })?;

        let address = host.address.ok_or_else(|| NameIpError::EntityNotFound {
            kind: EntityKind::Host,
            name: host_name.to_string(),
        })?;

        debug!(host_name, %address, "Located host");
        Ok(address)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// WIRE DTOs
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Deserialize)]
struct VmListDto {
    #[serde(default)]
    vm: Vec<VmDto>,
}

#[derive(Deserialize)]
struct VmDto {
    id: String,
}

#[derive(Deserialize)]
struct HostListDto {
    #[serde(default)]
    host: Vec<HostDto>,
}

#[derive(Deserialize)]
struct HostDto {
    #[serde(default)]
    address: Option<String>,
}

#[derive(Deserialize)]
struct NicListDto {
    #[serde(default)]
    nic: Vec<NicDto>,
}

#[derive(Deserialize)]
struct NicDto {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    mac: Option<MacDto>,
    #[serde(default)]
    reported_devices: Option<ReportedDeviceListDto>,
}

impl NicDto {
    fn into_nic(self) -> Nic {
        let mac = self.mac.and_then(|m| match m.address.parse::<MacAddress>() {
            Ok(mac) => Some(mac),
            Err(_) => {
                warn!(address = %m.address, "Skipping unparseable NIC MAC");
                None
            }
        });

        let reported_devices = self
            .reported_devices
            .map(|list| {
                list.reported_device
                    .into_iter()
                    .map(ReportedDeviceDto::into_device)
                    .collect()
            })
            .unwrap_or_default();

        Nic {
            name: self.name.unwrap_or_default(),
            mac,
            reported_devices,
        }
    }
}

#[derive(Deserialize)]
struct MacDto {
    address: String,
}

#[derive(Deserialize)]
struct ReportedDeviceListDto {
    #[serde(default)]
    reported_device: Vec<ReportedDeviceDto>,
}

#[derive(Deserialize)]
struct ReportedDeviceDto {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    ips: Option<IpListDto>,
}

impl ReportedDeviceDto {
    fn into_device(self) -> ReportedDevice {
        ReportedDevice {
            name: self.name,
            ips: self
                .ips
                .map(|list| list.ip.into_iter().map(IpDto::into_reported).collect())
                .unwrap_or_default(),
        }
    }
}

#[derive(Deserialize)]
struct IpListDto {
    #[serde(default)]
    ip: Vec<IpDto>,
}

#[derive(Deserialize)]
struct IpDto {
    address: String,
    #[serde(default)]
    version: Option<String>,
}

impl IpDto {
    fn into_reported(self) -> ReportedIp {
        let version = match self.version.as_deref() {
            Some("v4") => IpVersion::V4,
            Some("v6") => IpVersion::V6,
            _ => IpVersion::Unknown,
        };
        ReportedIp {
            address: self.address,
            version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> EngineClient {
        EngineClient::with_config(EngineConfig::new(server.uri(), "admin@internal", "secret"))
            .unwrap()
    }

    fn nics_payload() -> serde_json::Value {
        json!({
            "nic": [
                {
                    "name": "nic1",
                    "mac": { "address": "00:1a:4a:16:01:51" },
                    "reported_devices": {
                        "reported_device": [
                            {
                                "name": "eth0",
                                "ips": {
                                    "ip": [
                                        { "address": "fe80::1", "version": "v6" },
                                        { "address": "10.0.0.5", "version": "v4" }
                                    ]
                                }
                            }
                        ]
                    }
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_vm_nics_traversal() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/vms"))
            .and(query_param("search", "name=worker-01"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "vm": [{ "id": "abc-123" }] })),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/vms/abc-123/nics"))
            .respond_with(ResponseTemplate::new(200).set_body_json(nics_payload()))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let nics = client.vm_nics("worker-01").await.unwrap();

        assert_eq!(nics.len(), 1);
        assert_eq!(nics[0].name, "nic1");
        assert_eq!(
            nics[0].mac.unwrap().to_string(),
            "00:1a:4a:16:01:51"
        );
        assert_eq!(
            nics[0].reported_v4_addresses(),
            vec!["10.0.0.5".parse::<std::net::Ipv4Addr>().unwrap()]
        );
    }

    #[tokio::test]
    async fn test_vm_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/vms"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "vm": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.vm_nics("ghost").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_vm_nics_without_reported_devices() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/vms"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "vm": [{ "id": "abc-123" }] })),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/vms/abc-123/nics"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({ "nic": [{ "name": "nic1", "mac": { "address": "00:1a:4a:16:01:51" } }] }),
            ))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let nics = client.vm_nics("worker-01").await.unwrap();

        assert_eq!(nics.len(), 1);
        assert!(nics[0].reported_devices.is_empty());
        assert!(nics[0].reported_v4_addresses().is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_mac_becomes_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/vms"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "vm": [{ "id": "abc-123" }] })),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/vms/abc-123/nics"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({ "nic": [{ "name": "nic1", "mac": { "address": "garbage" } }] }),
            ))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let nics = client.vm_nics("worker-01").await.unwrap();
        assert!(nics[0].mac.is_none());
    }

    #[tokio::test]
    async fn test_host_address() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/hosts"))
            .and(query_param("search", "name=node-3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({ "host": [{ "name": "node-3", "address": "10.0.1.13" }] }),
            ))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(client.host_address("node-3").await.unwrap(), "10.0.1.13");
    }

    #[tokio::test]
    async fn test_host_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/hosts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "host": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.host_address("ghost").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_api_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/vms"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.vm_nics("worker-01").await.unwrap_err();
        match err {
            NameIpError::ApiError { status, .. } => assert_eq!(status, 500),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(EngineConfig::new("https://engine.lab/api", "admin@internal", "x")
            .validate()
            .is_ok());
        assert!(EngineConfig::new("not a url", "admin@internal", "x")
            .validate()
            .is_err());
        assert!(EngineConfig::new("https://engine.lab/api", "", "x")
            .validate()
            .is_err());
    }

    #[test]
    fn test_config_builder() {
        let config =
            EngineConfig::new("https://engine.lab/api", "admin@internal", "x").with_timeout(5);
        assert_eq!(config.timeout_seconds, 5);
    }
}
