pub mod client;
pub mod energi_data;
pub mod fuel;
pub mod provider;
pub mod utilities;
