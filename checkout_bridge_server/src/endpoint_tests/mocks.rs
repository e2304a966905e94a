use checkout_bridge_engine::{ForwardingError, NormalizedOrder, OrderForwarder};
use mockall::mock;
use utmify_tools::OrderSubmission;

mock! {
    pub Forwarder {}
    impl OrderForwarder for Forwarder {
        async fn forward_order(&self, order: &NormalizedOrder) -> Result<OrderSubmission, ForwardingError>;
    }
}
