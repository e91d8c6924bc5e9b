pub mod domain;
pub mod ports;
pub mod response;

pub use domain::UserConfiguration;
pub use ports::{
    DatabaseService, ExternalApiService, FileSystemService, PortError, PortResult, SessionService,
};
pub use response::{build_response, ResponseEnvelope};
