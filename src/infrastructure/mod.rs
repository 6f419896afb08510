// Infrastructure layer - External dependencies and adapters
pub mod chunked_json;
pub mod config;
pub mod http_response;
pub mod jsonrpc_source;
pub mod rpc_mapper;
pub mod surface_store;
