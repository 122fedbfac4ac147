pub mod mapper;
pub mod mock_data;
pub mod schema;
