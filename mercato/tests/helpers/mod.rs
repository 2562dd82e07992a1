use std::sync::Arc;

use mercato::Mercato;
use mercato_mock::MockGateway;

/// Build an orchestrator over a mock gateway, keeping a handle to the mock
/// for call-count assertions.
pub fn mercato_with(gateway: MockGateway) -> (Mercato, Arc<MockGateway>) {
    let gateway = Arc::new(gateway);
    let mercato = Mercato::builder()
        .gateway(gateway.clone())
        .build()
        .expect("gateway is configured");
    (mercato, gateway)
}

pub fn mercato_default() -> (Mercato, Arc<MockGateway>) {
    mercato_with(MockGateway::new())
}
