pub mod composite;
pub mod fit;
