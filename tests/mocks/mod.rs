mod mock_agency_client;

pub use mock_agency_client::MockAgencyClient;
