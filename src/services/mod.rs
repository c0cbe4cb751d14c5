pub mod error;
pub mod municipality;
pub mod questionnaire_service;
pub mod report_service;

pub use error::ServiceError;
pub use municipality::{MunicipalityResolver, MunicipalitySearch};
pub use questionnaire_service::{
    QuestionnaireFields, QuestionnaireService, QuestionnaireView, UpdateQuestionnaireRequest,
};
pub use report_service::{ReportFields, ReportService, ReportView, UpdateReportRequest};
