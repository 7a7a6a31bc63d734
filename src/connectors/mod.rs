pub mod github;
pub mod wallet;
