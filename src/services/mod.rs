pub mod health_service;
pub mod ingest_service;
pub mod listing_service;
