//! Stripe API client implementation.

use reqwest::{Client, StatusCode, Url};
use std::time::Duration;

use super::types::{Balance, StripeErrorResponse};

/// Error type for Stripe operations.
#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stripe API returned an error.
    #[error("Stripe API error: {error_type} - {message}")]
    Api {
        /// Error type.
        error_type: String,
        /// Error message.
        message: String,
        /// Error code.
        code: Option<String>,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The configured API base is not a usable URL.
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Client construction options.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// API base URL, without trailing slash.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: StripeClient::BASE_URL.to_string(),
            timeout_seconds: 30,
        }
    }
}

/// Status and raw body of a processor call.
///
/// The body is kept verbatim so the host can store it in its transaction log.
#[derive(Debug, Clone)]
pub struct ProcessorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Raw response body.
    pub body: String,
}

impl ProcessorResponse {
    /// ID of the created resource.
    ///
    /// `Some` only when the status is 200 and the body decodes to an object
    /// with a non-empty string `id`.
    #[must_use]
    pub fn resource_id(&self) -> Option<String> {
        if self.status != StatusCode::OK {
            return None;
        }
        let value: serde_json::Value = serde_json::from_str(&self.body).ok()?;
        value
            .get("id")
            .and_then(serde_json::Value::as_str)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }

    /// Decode the body.
    ///
    /// # Errors
    ///
    /// Returns `StripeError::Serialization` if the body does not match `T`.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, StripeError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Short description of a Stripe error body, for logging.
    #[must_use]
    pub fn error_summary(&self) -> Option<String> {
        let parsed: StripeErrorResponse = serde_json::from_str(&self.body).ok()?;
        Some(match parsed.error.code {
            Some(code) => format!("{}/{code}: {}", parsed.error.error_type, parsed.error.message),
            None => format!("{}: {}", parsed.error.error_type, parsed.error.message),
        })
    }
}

/// Card payment source for attaching to a customer.
#[derive(Clone, Copy)]
pub enum CardSource<'a> {
    /// Token created by the browser tokenization script.
    Token(&'a str),
    /// Raw card details.
    Card {
        /// Card number.
        number: &'a str,
        /// Two-digit expiry month.
        exp_month: &'a str,
        /// Expiry year.
        exp_year: &'a str,
        /// Card verification code.
        cvc: &'a str,
    },
}

impl std::fmt::Debug for CardSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Token(token) => f.debug_tuple("Token").field(token).finish(),
            Self::Card { .. } => f.write_str("Card(<redacted>)"),
        }
    }
}

impl CardSource<'_> {
    fn append_form(&self, params: &mut Vec<(&'static str, String)>) {
        match *self {
            Self::Token(token) => params.push(("source", token.to_string())),
            Self::Card {
                number,
                exp_month,
                exp_year,
                cvc,
            } => {
                params.push(("source[object]", "card".to_string()));
                params.push(("source[number]", number.to_string()));
                params.push(("source[exp_month]", exp_month.to_string()));
                params.push(("source[exp_year]", exp_year.to_string()));
                params.push(("source[cvc]", cvc.to_string()));
            }
        }
    }
}

/// Stripe API client.
#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl std::fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl StripeClient {
    /// Stripe API base URL.
    pub const BASE_URL: &'static str = "https://api.stripe.com/v1";

    /// Create a new Stripe client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Stripe secret API key (`sk_test_...` or `sk_live_...`)
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, StripeError> {
        Self::with_options(api_key, ClientOptions::default())
    }

    /// Create a new Stripe client with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the base URL
    /// does not parse.
    pub fn with_options(
        api_key: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, StripeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()?;

        let base_url = Url::parse(&options.base_url)
            .map_err(|e| StripeError::InvalidBaseUrl(format!("{}: {e}", options.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(StripeError::InvalidBaseUrl(options.base_url));
        }

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url,
        })
    }

    /// Build an endpoint URL. Each segment is percent-encoded on its own, so
    /// ids containing `/`, `?` or `..` stay inside their segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, StripeError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| StripeError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Create a charge against a customer's default card.
    ///
    /// # Arguments
    ///
    /// * `amount_minor` - Amount in minor units
    /// * `currency` - Lowercase ISO currency code
    /// * `customer_id` - Stripe customer ID
    /// * `description` - Charge description
    pub async fn create_charge(
        &self,
        amount_minor: i64,
        currency: &str,
        customer_id: &str,
        description: &str,
    ) -> Result<ProcessorResponse, StripeError> {
        let params = vec![
            ("amount", amount_minor.to_string()),
            ("currency", currency.to_string()),
            ("customer", customer_id.to_string()),
            ("description", description.to_string()),
        ];

        tracing::debug!(
            amount_minor = %amount_minor,
            currency = %currency,
            customer_id = %customer_id,
            "Creating Stripe charge"
        );

        let response = self
            .client
            .post(self.endpoint(&["charges"])?)
            .basic_auth(&self.api_key, Option::<&str>::None)
            .form(&params)
            .send()
            .await?;

        Self::read_response(response).await
    }

    /// Refund a charge, in full when `amount_minor` is `None`.
    pub async fn create_refund(
        &self,
        charge_id: &str,
        amount_minor: Option<i64>,
    ) -> Result<ProcessorResponse, StripeError> {
        let mut params = vec![("charge", charge_id.to_string())];
        if let Some(amount) = amount_minor {
            params.push(("amount", amount.to_string()));
        }

        tracing::debug!(charge_id = %charge_id, amount_minor = ?amount_minor, "Creating Stripe refund");

        let response = self
            .client
            .post(self.endpoint(&["refunds"])?)
            .basic_auth(&self.api_key, Option::<&str>::None)
            .form(&params)
            .send()
            .await?;

        Self::read_response(response).await
    }

    /// Create a customer with a card attached.
    pub async fn create_customer(
        &self,
        email: &str,
        source: CardSource<'_>,
    ) -> Result<ProcessorResponse, StripeError> {
        let mut params = vec![("email", email.to_string())];
        source.append_form(&mut params);

        let response = self
            .client
            .post(self.endpoint(&["customers"])?)
            .basic_auth(&self.api_key, Option::<&str>::None)
            .form(&params)
            .send()
            .await?;

        Self::read_response(response).await
    }

    /// Replace the default card of an existing customer.
    pub async fn update_customer(
        &self,
        customer_id: &str,
        email: &str,
        source: CardSource<'_>,
    ) -> Result<ProcessorResponse, StripeError> {
        let mut params = vec![("email", email.to_string())];
        source.append_form(&mut params);

        let response = self
            .client
            .post(self.endpoint(&["customers", customer_id])?)
            .basic_auth(&self.api_key, Option::<&str>::None)
            .form(&params)
            .send()
            .await?;

        Self::read_response(response).await
    }

    /// Detach a card from a customer.
    pub async fn delete_source(
        &self,
        customer_id: &str,
        source_id: &str,
    ) -> Result<ProcessorResponse, StripeError> {
        let response = self
            .client
            .delete(self.endpoint(&["customers", customer_id, "sources", source_id])?)
            .basic_auth(&self.api_key, Option::<&str>::None)
            .send()
            .await?;

        Self::read_response(response).await
    }

    /// Retrieve the account balance.
    pub async fn retrieve_balance(&self) -> Result<Balance, StripeError> {
        let response = self
            .client
            .get(self.endpoint(&["balance"])?)
            .basic_auth(&self.api_key, Option::<&str>::None)
            .send()
            .await?;

        let response = Self::read_response(response).await?;
        if response.status.is_success() {
            return response.json();
        }

        match response.json::<StripeErrorResponse>() {
            Ok(stripe_error) => Err(StripeError::Api {
                error_type: stripe_error.error.error_type,
                message: stripe_error.error.message,
                code: stripe_error.error.code,
            }),
            Err(_) => Err(StripeError::Api {
                error_type: "unknown".to_string(),
                message: format!("HTTP {}", response.status),
                code: None,
            }),
        }
    }

    /// Capture status and body without interpreting them.
    async fn read_response(response: reqwest::Response) -> Result<ProcessorResponse, StripeError> {
        let status = response.status();
        let body = response.text().await?;
        Ok(ProcessorResponse { status, body })
    }
}
