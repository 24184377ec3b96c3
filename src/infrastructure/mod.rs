pub mod db;
pub mod importer;
pub mod utils;
