pub mod manager;
pub mod models;
pub mod postgres;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use repository::{
    CitizenRepository, MunicipalityRepository, QuestionnaireRepository, ReportRepository, Repositories,
};
