pub mod entities;
pub mod importer;
pub mod repository;
pub mod value_objects;

pub use entities::{ImportSource, ImportSourceRecord, ImportState};
pub use importer::Importer;
pub use repository::ImportSourceRepository;
pub use value_objects::ImportStateDb;
