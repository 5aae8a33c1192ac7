mod adapter;
mod cors;
mod server;

pub use adapter::HyperGatewayAdapter;
pub use cors::CorsPolicy;
pub use server::serve;
