// wallet_api 라이브러리 루트
// Library root: exposes modules for the binary and the integration tests
pub mod domains;
pub mod routes;
pub mod shared;
