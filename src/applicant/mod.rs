//! Applicant intake: profiles and batch loading

mod profile;
pub mod loader;

pub use profile::{
    bmi_from_build, history_years, ApplicantProfile, BMI_FACTOR, NO_HISTORY_SENTINEL,
};
pub use loader::{load_applicants, load_applicants_from_reader, ApplicantRecord};
