//! HTTP client for the query and push-subscription endpoints.

use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::carriers::CarrierRegistry;
use crate::config::Config;
use crate::error::TrackError;
use crate::models::{RawLogEntry, TrackingResult, TrackingState};
use crate::signature;

const QUERY_URL: &str = "https://poll.kuaidi100.com/poll/query.do";
const SUBSCRIBE_URL: &str = "https://poll.kuaidi100.com/poll";

/// Query `param` payload. Field order matters: the compact serialization of
/// this struct is the signed string, and the provider recomputes the digest
/// over the exact bytes it receives.
#[derive(Debug, Serialize)]
struct QueryParam<'a> {
    com: &'a str,
    num: &'a str,
    phone: &'a str,
    resultv2: i32,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    message: String,
    state: Option<i64>,
    #[serde(default)]
    data: Vec<RawLogEntry>,
}

/// Subscription `param` payload. Unsigned.
#[derive(Debug, Serialize)]
struct SubscribeParam<'a> {
    company: &'a str,
    number: &'a str,
    key: &'a str,
    parameters: SubscribeParameters<'a>,
}

#[derive(Debug, Serialize)]
struct SubscribeParameters<'a> {
    callbackurl: &'a str,
    salt: String,
    resultv2: &'static str,
    #[serde(rename = "autoCom")]
    auto_com: &'static str,
    phone: &'a str,
}

#[derive(Debug, Deserialize)]
struct SubscribeResponse {
    #[serde(default)]
    result: bool,
    #[serde(rename = "returnCode")]
    return_code: Option<i32>,
}

/// Subscription return codes, reported verbatim. Codes outside the table get
/// an empty message with the code still attached.
fn return_code_message(code: i32) -> &'static str {
    match code {
        200 => "submission accepted",
        701 => "carrier rejects subscription",
        700 => {
            "subscription data error (unsupported carrier / empty or oversized tracking number) or invalid callback URL"
        }
        702 => "tracking number's carrier could not be identified",
        600 => "caller is not an authorized subscriber (bad key)",
        601 => "subscription key has expired",
        500 => "provider server error",
        501 => "duplicate subscription",
        _ => "",
    }
}

/// 32 hex digits of fresh randomness for the subscription salt.
fn fresh_salt() -> String {
    format!("{:032x}", rand::random::<u128>())
}

/// Kuaidi100 API client.
///
/// One best-effort request per call: no retries, no caching, no subscription
/// lifecycle management beyond the single registration. Business failures and
/// transport failures both come back as [`TrackError`].
pub struct Kuaidi100Client {
    config: Config,
    http_client: HttpClient,
    registry: Option<CarrierRegistry>,
    query_url: String,
    subscribe_url: String,
}

impl Kuaidi100Client {
    pub fn new(config: Config) -> Result<Self, TrackError> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            config,
            http_client,
            registry: None,
            query_url: QUERY_URL.to_string(),
            subscribe_url: SUBSCRIBE_URL.to_string(),
        })
    }

    /// Replace the bundled carrier dataset with a caller-supplied registry.
    pub fn with_registry(mut self, registry: CarrierRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Point both endpoints at a different host. Used by tests to talk to a
    /// mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        self.query_url = format!("{base}/poll/query.do");
        self.subscribe_url = format!("{base}/poll");
        self
    }

    /// Display names this client can resolve.
    pub fn carrier_names(&self) -> impl Iterator<Item = &str> {
        self.registry().names()
    }

    /// Query the tracking log of a parcel.
    ///
    /// `mobile` is the phone number bound to the shipment; some carriers (SF
    /// among them) refuse queries without it. Pass `""` otherwise.
    pub async fn query(
        &self,
        carrier_name: &str,
        tracking_number: &str,
        mobile: &str,
    ) -> Result<TrackingResult, TrackError> {
        let com = self.resolve(carrier_name)?;

        // Serialized once; the same string is signed and transmitted.
        let param = serde_json::to_string(&QueryParam {
            com,
            num: tracking_number,
            phone: mobile,
            resultv2: 1,
        })?;
        let sign = signature::sign(&param, &self.config.key, &self.config.customer_id);

        debug!(carrier = com, num = tracking_number, "sending tracking query");

        let response = self
            .http_client
            .post(&self.query_url)
            .form(&[
                ("customer", self.config.customer_id.as_str()),
                ("sign", sign.as_str()),
                ("param", param.as_str()),
            ])
            .send()
            .await?;

        let body = response.text().await?;
        let parsed: QueryResponse = serde_json::from_str(&body)?;

        if !parsed.message.eq_ignore_ascii_case("ok") {
            return Err(TrackError::Rejected {
                message: parsed.message,
                code: None,
            });
        }

        let state = parsed
            .state
            .ok_or_else(|| TrackError::Decode("response is missing the state field".into()))?;

        let mut logs = Vec::with_capacity(parsed.data.len());
        for raw in parsed.data {
            logs.push(raw.into_entry()?);
        }

        Ok(TrackingResult {
            state: TrackingState::from_code(state)?,
            is_signed: false,
            logs,
        })
    }

    /// Register a push subscription; the provider will POST status changes to
    /// `callback_url`. Decode the body it sends with
    /// [`decode_callback`](crate::decode_callback).
    pub async fn subscribe(
        &self,
        carrier_name: &str,
        tracking_number: &str,
        callback_url: &str,
        phone: &str,
    ) -> Result<(), TrackError> {
        let company = self.resolve(carrier_name)?;

        let param = serde_json::to_string(&SubscribeParam {
            company,
            number: tracking_number,
            key: &self.config.customer_id,
            parameters: SubscribeParameters {
                callbackurl: callback_url,
                salt: fresh_salt(),
                resultv2: "1",
                auto_com: "1",
                phone,
            },
        })?;

        debug!(carrier = company, num = tracking_number, "registering push subscription");

        let response = self
            .http_client
            .post(&self.subscribe_url)
            .form(&[("schema", "json"), ("param", param.as_str())])
            .send()
            .await?;

        let body = response.text().await?;
        let parsed: SubscribeResponse = serde_json::from_str(&body)?;

        if parsed.result {
            return Ok(());
        }

        Err(TrackError::Rejected {
            message: parsed
                .return_code
                .map(return_code_message)
                .unwrap_or_default()
                .to_string(),
            code: parsed.return_code,
        })
    }

    fn registry(&self) -> &CarrierRegistry {
        self.registry
            .as_ref()
            .unwrap_or_else(|| CarrierRegistry::bundled())
    }

    fn resolve(&self, carrier_name: &str) -> Result<&str, TrackError> {
        self.registry()
            .resolve(carrier_name)
            .ok_or_else(|| TrackError::CarrierNotFound {
                name: carrier_name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_code_table_is_verbatim() {
        assert_eq!(return_code_message(200), "submission accepted");
        assert_eq!(return_code_message(701), "carrier rejects subscription");
        assert_eq!(
            return_code_message(700),
            "subscription data error (unsupported carrier / empty or oversized tracking number) or invalid callback URL"
        );
        assert_eq!(
            return_code_message(702),
            "tracking number's carrier could not be identified"
        );
        assert_eq!(
            return_code_message(600),
            "caller is not an authorized subscriber (bad key)"
        );
        assert_eq!(return_code_message(601), "subscription key has expired");
        assert_eq!(return_code_message(500), "provider server error");
        assert_eq!(return_code_message(501), "duplicate subscription");
        assert_eq!(return_code_message(999), "");
    }

    #[test]
    fn salt_is_32_hex_digits_and_fresh() {
        let a = fresh_salt();
        let b = fresh_salt();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn query_param_serializes_compact_in_field_order() {
        let param = serde_json::to_string(&QueryParam {
            com: "shunfeng",
            num: "123",
            phone: "",
            resultv2: 1,
        })
        .unwrap();
        assert_eq!(param, r#"{"com":"shunfeng","num":"123","phone":"","resultv2":1}"#);
    }

    #[test]
    fn subscribe_param_nests_parameters() {
        let param = serde_json::to_string(&SubscribeParam {
            company: "shunfeng",
            number: "123",
            key: "cust1",
            parameters: SubscribeParameters {
                callbackurl: "https://example.com/cb",
                salt: "0".repeat(32),
                resultv2: "1",
                auto_com: "1",
                phone: "",
            },
        })
        .unwrap();
        assert_eq!(
            param,
            format!(
                r#"{{"company":"shunfeng","number":"123","key":"cust1","parameters":{{"callbackurl":"https://example.com/cb","salt":"{}","resultv2":"1","autoCom":"1","phone":""}}}}"#,
                "0".repeat(32)
            )
        );
    }
}
