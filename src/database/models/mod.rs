pub mod address;
pub mod citizen;
pub mod municipality;
pub mod questionnaire;
pub mod report;

pub use address::Address;
pub use citizen::Citizen;
pub use municipality::{Municipality, State};
pub use questionnaire::{NewQuestionnaire, Questionnaire, QuestionnaireCriteria};
pub use report::{CitizenReport, NewReport, Report, ReportCriteria};
