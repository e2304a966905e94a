use std::sync::{Arc, Mutex};

use checkout_bridge_engine::{
    BridgeError,
    BridgeOptions,
    CheckoutBridgeApi,
    ForwardingError,
    NormalizedOrder,
    OrderForwarder,
};
use cucumber::World;
use utmify_tools::OrderSubmission;

#[derive(Default, Debug, World)]
pub struct BridgeWorld {
    pub options: BridgeOptions,
    pub downstream: Option<OrderSubmission>,
    pub api: Option<CheckoutBridgeApi<RecordingForwarder>>,
    pub last_result: Option<Result<OrderSubmission, BridgeError>>,
}

impl BridgeWorld {
    /// The bridge is built on first use so that the `Given` steps can keep adjusting the options.
    pub fn api(&mut self) -> &CheckoutBridgeApi<RecordingForwarder> {
        let options = self.options.clone();
        let response = self.downstream.clone().unwrap_or_else(|| OrderSubmission::new(200, r#"{"OK":true}"#));
        self.api.get_or_insert_with(|| CheckoutBridgeApi::new(RecordingForwarder::new(response), options))
    }

    pub fn forwarded_orders(&mut self) -> Vec<NormalizedOrder> {
        self.api().forwarder().orders()
    }

    pub fn last_error(&self) -> &BridgeError {
        match &self.last_result {
            Some(Err(e)) => e,
            Some(Ok(r)) => panic!("Expected the webhook to fail, but it succeeded with {r}"),
            None => panic!("No webhook has been received yet"),
        }
    }
}

/// Records every order it is handed and answers with a fixed response.
#[derive(Debug, Clone)]
pub struct RecordingForwarder {
    response: OrderSubmission,
    orders: Arc<Mutex<Vec<NormalizedOrder>>>,
}

impl RecordingForwarder {
    pub fn new(response: OrderSubmission) -> Self {
        Self { response, orders: Arc::new(Mutex::new(Vec::new())) }
    }

    pub fn orders(&self) -> Vec<NormalizedOrder> {
        self.orders.lock().expect("poisoned lock").clone()
    }
}

impl OrderForwarder for RecordingForwarder {
    async fn forward_order(&self, order: &NormalizedOrder) -> Result<OrderSubmission, ForwardingError> {
        self.orders.lock().expect("poisoned lock").push(order.clone());
        Ok(self.response.clone())
    }
}
