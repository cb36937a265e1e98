mod gateway_factory;
mod http_gateway;
mod local_gateway;
mod mock_gateway;

pub use gateway_factory::StorageGatewayFactory;
pub use http_gateway::HttpStorageGateway;
pub use local_gateway::LocalStorageGateway;
pub use mock_gateway::{MockStorageGateway, RecordedPut};
