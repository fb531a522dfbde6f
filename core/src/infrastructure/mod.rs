pub mod db;
pub mod detection;
pub mod llm;
pub mod snapshot;
pub mod uploads;
