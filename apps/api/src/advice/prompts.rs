// LLM prompt constants for the recommendation and job-summary endpoints.

use serde_json::Value;

use crate::models::profile::{JobPosting, UserProfile};

pub const RECOMMENDATION_SYSTEM: &str = "You are a career counselor for Brazilian students. \
    Use simple, objective and motivating language. \
    Take into account the user's profile and also the IoT/IoB data \
    (habits, study time, app usage preferences, etc.).";

pub const JOB_SUMMARY_SYSTEM: &str = "You are a career assistant that summarizes job postings. \
    Answer in bullet points, in simple language.";

pub const RECOMMENDATION_TEMPERATURE: f32 = 0.7;
pub const JOB_SUMMARY_TEMPERATURE: f32 = 0.5;

/// Served when the AI path is unavailable for recommendations.
pub const OFFLINE_RECOMMENDATIONS: &str = "Offline mode (simulation):\n\n\
    1. Recommended course: **Backend Development with Java (beginner)**: ideal to strengthen your logic.\n\
    2. Recommended course: **Generative AI Fundamentals**: matches your interest in AI.\n\
    3. Recommended course: **Git and Code Versioning**: essential for collaborative projects.\n\n\
    Suggested jobs: Backend Internship, Technical Support, Young Apprentice in IT.\n\n\
    Note: based on the IoT data, your focus and study schedule suit evening routines.";

/// Served when the AI path is unavailable for job summaries.
pub const OFFLINE_JOB_SUMMARY: &str = "Offline mode (simulation):\n\n\
    Summary: Internship supporting API development and maintenance of backend systems.\n\
    Requirements: programming logic, basic Java and Git.\n\
    Benefits: not informed.\n\
    Points of attention: working hours and salary not specified.\n\
    Profile assessment: suitable, already knows Java and Python, just needs to go deeper into REST and databases.";

const JOB_SUMMARY_TASKS: &str = "\
Tasks:
1) SUMMARIZE the posting in at most 5 lines.
2) List the main REQUIREMENTS as bullet points.
3) List BENEFITS if any, or say they are not clear.
4) Point out POINTS OF ATTENTION (e.g. working hours, salary not informed, experience required).
5) If the user's profile was provided, say whether this posting suits them
   and what they still need to study or improve.";

pub fn build_recommendation_prompt(profile: &UserProfile) -> String {
    format!(
        "User profile:\n\
        - Name: {}\n\
        - Age: {}\n\
        {}",
        profile.name,
        profile.age,
        profile_lines(profile)
    )
}

pub fn build_job_summary_prompt(posting: &JobPosting) -> String {
    let profile_text = match &posting.profile {
        Some(p) => format!("User profile:\n- Age: {}\n{}", p.age, profile_lines(p)),
        None => "No profile provided.".to_string(),
    };

    format!(
        "Job title: {}\n\n\
        Full job description:\n'''{}'''\n\n\
        {}\n\n\
        {}",
        posting.title, posting.full_description, profile_text, JOB_SUMMARY_TASKS
    )
}

fn profile_lines(profile: &UserProfile) -> String {
    format!(
        "- Education level: {}\n\
        - Goals: {}\n\
        - Skills: {}\n\
        - Interests: {}\n\
        - IoT/IoB data: {}\n",
        profile.education_level,
        profile.goals,
        profile.skills.join(", "),
        profile.interests.join(", "),
        iot_summary(profile.iot_data.as_ref())
    )
}

fn iot_summary(data: Option<&Value>) -> String {
    match data {
        Some(value) if !value.is_null() => value.to_string(),
        _ => "Not provided".to_string(),
    }
}
