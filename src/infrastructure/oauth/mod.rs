pub mod request;
pub mod transport;

pub use request::{
    build_provider_request, grant_request, introspect_request, refresh_request, ProviderRequest,
    RequestKind,
};
pub use transport::{ProviderTransport, RawResponse, ReqwestTransport, TransportError};
