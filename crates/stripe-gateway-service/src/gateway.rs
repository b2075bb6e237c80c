//! Gateway operations invoked by the host platform.
//!
//! Each operation makes at most one processor call and reports a
//! [`GatewayResult`]. A processor refusal or transport failure is a result,
//! not an error; errors are reserved for local failures (bad input, storage).

use std::sync::Arc;

use stripe_gateway_core::{
    to_minor_units, CaptureParams, GatewayError, GatewayResult, RefundParams, StoreRemoteAction,
    StoreRemoteParams, TransactionStatus,
};
use stripe_gateway_store::{CustomerStore, StoreError};

use crate::stripe::{CardSource, Customer, ProcessorResponse, StripeClient, StripeError};

/// Raw data reported when a capture is attempted for a client with no stored
/// card.
const NO_CUSTOMER_RAW_DATA: &str = "no stored customer for client email";

/// The gateway module: processor client plus customer mapping store.
#[derive(Clone)]
pub struct Gateway {
    stripe: Arc<StripeClient>,
    store: Arc<dyn CustomerStore>,
}

impl Gateway {
    /// Create a gateway from its parts.
    #[must_use]
    pub fn new(stripe: Arc<StripeClient>, store: Arc<dyn CustomerStore>) -> Self {
        Self { stripe, store }
    }

    /// Create the customer mapping table if needed.
    pub async fn ensure_schema(&self) -> Result<(), GatewayError> {
        self.store.ensure_schema().await.map_err(|e| {
            tracing::error!(error = %e, "Unable to create customer mapping table");
            GatewayError::from(e)
        })
    }

    /// Charge the client's stored card.
    ///
    /// Reports `success` with the charge id, or `declined` with the raw
    /// processor response.
    pub async fn capture(&self, params: &CaptureParams) -> Result<GatewayResult, GatewayError> {
        self.ensure_schema().await?;

        let amount_minor = to_minor_units(params.amount)?;
        let currency = params.currency.to_lowercase();
        let email = &params.client_details.email;

        let Some(customer) = self.store.find_by_email(email).await? else {
            tracing::warn!("Capture declined: no stored customer");
            return Ok(GatewayResult::rejected(
                TransactionStatus::Declined,
                NO_CUSTOMER_RAW_DATA,
            ));
        };

        let outcome = self
            .stripe
            .create_charge(
                amount_minor,
                &currency,
                &customer.processor_customer_id,
                &params.description,
            )
            .await;

        let result = interpret(outcome, TransactionStatus::Declined);
        tracing::info!(
            status = %result.status,
            transaction_id = ?result.transaction_id,
            amount_minor = %amount_minor,
            currency = %currency,
            "Capture processed"
        );
        Ok(result)
    }

    /// Refund a previous capture, in full when no amount is given.
    ///
    /// Reports `success` with the refund id, or `failed` with the raw
    /// processor response.
    pub async fn refund(&self, params: &RefundParams) -> Result<GatewayResult, GatewayError> {
        self.ensure_schema().await?;

        let amount_minor = match params.amount {
            Some(amount) => Some(to_minor_units(amount)?).filter(|minor| *minor != 0),
            None => None,
        };

        let outcome = self
            .stripe
            .create_refund(&params.transaction_id, amount_minor)
            .await;

        let result = interpret(outcome, TransactionStatus::Failed);
        tracing::info!(
            status = %result.status,
            charge_id = %params.transaction_id,
            refund_id = ?result.transaction_id,
            amount_minor = ?amount_minor,
            "Refund processed"
        );
        Ok(result)
    }

    /// Store a card on the processor, or remove the stored one.
    ///
    /// Removal is requested with an empty card number. Without a stored
    /// customer or card id there is nothing to remove and the call succeeds
    /// without contacting the processor.
    pub async fn store_remote(
        &self,
        params: &StoreRemoteParams,
    ) -> Result<GatewayResult, GatewayError> {
        self.ensure_schema().await?;

        let email = &params.client_details.email;
        let customer = self.store.find_by_email(email).await?;

        if params.action() == StoreRemoteAction::Remove {
            let (Some(customer), Some(gateway_id)) = (customer, params.gateway_id_value()) else {
                tracing::debug!(email = %email, "Nothing stored to remove");
                return Ok(GatewayResult::success());
            };

            let raw = match self
                .stripe
                .delete_source(&customer.processor_customer_id, gateway_id)
                .await
            {
                Ok(response) => {
                    if response.resource_id().is_none() {
                        tracing::warn!(
                            status = %response.status,
                            error = ?response.error_summary(),
                            "Card removal not confirmed by Stripe"
                        );
                    }
                    response.body
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Card removal request failed");
                    e.to_string()
                }
            };

            tracing::info!(customer_id = %customer.processor_customer_id, gateway_id = %gateway_id, "Stored card removed");
            return Ok(GatewayResult::success().with_raw_data(raw));
        }

        let source = match params.token_value() {
            Some(token) => CardSource::Token(token),
            None => {
                let (exp_month, exp_year) = params.expiry_parts()?;
                CardSource::Card {
                    number: params.card_number.trim(),
                    exp_month,
                    exp_year,
                    cvc: params.card_cvv.trim(),
                }
            }
        };

        let outcome = match &customer {
            Some(existing) => {
                self.stripe
                    .update_customer(&existing.processor_customer_id, email, source)
                    .await
            }
            None => self.stripe.create_customer(email, source).await,
        };

        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Card storage request failed");
                return Ok(GatewayResult::rejected(TransactionStatus::Failed, e.to_string()));
            }
        };

        let Some(customer_id) = response.resource_id() else {
            tracing::info!(
                status = %response.status,
                error = ?response.error_summary(),
                "Card storage refused"
            );
            return Ok(GatewayResult::rejected(TransactionStatus::Failed, response.body));
        };

        if customer.is_none() {
            match self.store.insert(&customer_id, email).await {
                Ok(mapping) => {
                    tracing::info!(mapping_id = %mapping.id, customer_id = %customer_id, "Customer mapping created");
                }
                Err(StoreError::Duplicate { .. }) => {
                    tracing::warn!(customer_id = %customer_id, "Customer mapping already exists");
                }
                Err(e) => return Err(e.into()),
            }
        }

        let gateway_id = response
            .json::<Customer>()
            .ok()
            .and_then(|c| c.stored_source_id());

        tracing::info!(customer_id = %customer_id, gateway_id = ?gateway_id, "Card stored");
        Ok(GatewayResult::success()
            .with_gateway_id(gateway_id)
            .with_raw_data(response.body))
    }
}

/// Map a processor call to a result: success iff HTTP 200 with a resource id.
fn interpret(
    outcome: Result<ProcessorResponse, StripeError>,
    refused: TransactionStatus,
) -> GatewayResult {
    match outcome {
        Ok(response) => match response.resource_id() {
            Some(id) => GatewayResult::success()
                .with_transaction_id(id)
                .with_raw_data(response.body),
            None => {
                tracing::debug!(
                    status = %response.status,
                    error = ?response.error_summary(),
                    "Stripe refused request"
                );
                GatewayResult::rejected(refused, response.body)
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "Stripe request failed");
            GatewayResult::rejected(refused, e.to_string())
        }
    }
}
